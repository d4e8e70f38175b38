use thiserror::Error;

/// Errors that can occur when normalizing a catalog response
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// A feature arrived without any properties bag. The catalog contract
    /// guarantees one per feature, so this means the response shape changed
    /// upstream and must not be swallowed as an ordinary filter drop.
    #[error("Feature {0} is missing its properties bag")]
    MissingProperties(usize),
}
