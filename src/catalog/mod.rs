pub mod client;
pub mod error;
pub mod fake;
pub mod models;
pub mod source;

pub use client::UsgsCatalog;
pub use source::EventSource;

#[cfg(test)]
mod tests;
