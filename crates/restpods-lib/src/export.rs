//! CSV export of restart records

use crate::error::ReportError;
use crate::models::AggregatedReport;
use chrono::NaiveDate;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Column header written as the first row of every export
pub const EXPORT_HEADER: [&str; 6] = [
    "Pod",
    "Container",
    "Namespace",
    "Restart Count",
    "Terminated At",
    "Reason",
];

const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes the full, unfiltered restart record list as CSV
pub struct ReportExporter;

impl ReportExporter {
    /// File name used when exporting on `today`
    pub fn default_file_name(today: NaiveDate) -> String {
        format!("{}_restarting_pods_report.csv", today.format("%Y_%m_%d"))
    }

    /// Export to a file, replacing any existing content
    pub fn export(report: &AggregatedReport, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        Self::write(report, file)?;
        info!(
            path = %path.display(),
            records = report.restart_records.len(),
            "Report exported"
        );
        Ok(())
    }

    /// Export to any writer
    pub fn write<W: Write>(report: &AggregatedReport, writer: W) -> Result<(), ReportError> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b',')
            .quote(b'"')
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);

        wtr.write_record(EXPORT_HEADER)?;
        for record in &report.restart_records {
            wtr.write_record([
                record.pod.clone(),
                record.container.clone(),
                record.namespace.clone(),
                record.restart_count.to_string(),
                record.terminated_at.format(EXPORT_TIMESTAMP_FORMAT).to_string(),
                record.reason.clone(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
