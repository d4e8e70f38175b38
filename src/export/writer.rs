use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use csv::Writer;
use tracing::{info, warn};

use crate::export::error::ExportError;
use crate::scheduler::consumer::Consumer;
use crate::scheduler::tick::TickReport;

/// Column order shared by every tabular consumer of the result set.
const COLUMNS: [&str; 6] = [
    "Time",
    "Place",
    "Magnitude",
    "Depth (km)",
    "Longitude",
    "Latitude",
];

/// Writes one CSV file per delivered report into a fixed output directory,
/// named by the report's generation timestamp.
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        CsvExporter {
            output_dir: output_dir.into(),
        }
    }

    /// Write the report's records and return the path of the created file.
    /// Absent values become empty cells.
    pub fn write_report(&self, report: &TickReport) -> Result<PathBuf, ExportError> {
        let filename = format!(
            "earthquakes_{}.csv",
            report.generated_at.format("%Y%m%d%H%M%S")
        );
        let path = self.output_dir.join(filename);

        let mut writer =
            Writer::from_path(&path).map_err(|e| ExportError::Create(path.clone(), e.to_string()))?;

        writer
            .write_record(COLUMNS)
            .map_err(|e| ExportError::Write(path.clone(), e.to_string()))?;

        for record in &report.records {
            let row = [
                record.time_string().unwrap_or_default(),
                record.place.clone().unwrap_or_default(),
                record.magnitude.map(|m| m.to_string()).unwrap_or_default(),
                record.depth_km.to_string(),
                record.longitude.to_string(),
                record.latitude.to_string(),
            ];
            writer
                .write_record(&row)
                .map_err(|e| ExportError::Write(path.clone(), e.to_string()))?;
        }

        writer
            .flush()
            .map_err(|e| ExportError::Write(path.clone(), e.to_string()))?;

        info!(
            "Saved {} records to {}",
            report.records.len(),
            path.display()
        );
        Ok(path)
    }
}

#[async_trait]
impl Consumer for CsvExporter {
    async fn deliver(&self, report: &TickReport) -> Result<()> {
        if let Some(error) = &report.error {
            warn!("Skipping export for failed tick: {error}");
            return Ok(());
        }

        self.write_report(report)?;
        Ok(())
    }
}
