//! Console rendering of the aggregated report

use crate::models::{AggregatedReport, NotReadyContainer, RestartRecord, WarningEntry};
use crate::report::filter_by_period;
use chrono::NaiveDateTime;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

/// Display format of terminated-at timestamps in the table
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d, %H:%M:%S";

/// Output format for the rendered report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Fixed-width table (default)
    #[default]
    Table,
    /// JSON document
    Json,
}

/// Display toggles for a single rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub period_days: u32,
    /// Summary, column header, warnings and count lines
    pub show_headers: bool,
    /// Only honored while headers are shown
    pub show_warnings: bool,
    /// Namespace the report was scoped to, `None` for all namespaces
    pub namespace: Option<String>,
    pub format: OutputFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            period_days: 2,
            show_headers: true,
            show_warnings: true,
            namespace: None,
            format: OutputFormat::Table,
        }
    }
}

/// JSON view of a rendered report
#[derive(Serialize)]
struct JsonReport<'a> {
    namespace: Option<&'a str>,
    period_days: u32,
    restart_records: Vec<&'a RestartRecord>,
    not_ready: &'a [NotReadyContainer],
    warnings: &'a [WarningEntry],
}

/// Renders an [`AggregatedReport`] without mutating it
pub struct ReportRenderer {
    options: RenderOptions,
}

impl ReportRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Write the report to `out`, filtering records against `now`
    pub fn render<W: Write>(
        &self,
        report: &AggregatedReport,
        now: NaiveDateTime,
        out: &mut W,
    ) -> io::Result<()> {
        match self.options.format {
            OutputFormat::Table => self.render_table(report, now, out),
            OutputFormat::Json => self.render_json(report, now, out),
        }
    }

    fn render_table<W: Write>(
        &self,
        report: &AggregatedReport,
        now: NaiveDateTime,
        out: &mut W,
    ) -> io::Result<()> {
        let opts = &self.options;

        if opts.show_headers {
            match &opts.namespace {
                Some(ns) => writeln!(out, "Listing pods with restarting containers on namespace {}", ns)?,
                None => writeln!(out, "Listing pods with restarting containers on all namespaces")?,
            }
            writeln!(
                out,
                "Report duration: {} {}.\n",
                opts.period_days,
                plural(opts.period_days as usize, "day", "days")
            )?;
            writeln!(
                out,
                "{:<60}\t{:<35}\t{:<35}\t{:<10}\t{:<5}\t{:<20}",
                "POD", "CONTAINER", "NAMESPACE", "RESTARTS", "READY", "LAST TERMINATION"
            )?;
        }

        for record in filter_by_period(report, opts.period_days, now.date()) {
            writeln!(out, "{}", format_row(record, now))?;
        }

        if opts.show_headers {
            if opts.show_warnings {
                writeln!(out, "\n")?;
                for warning in &report.warnings {
                    writeln!(
                        out,
                        "[WARNING] Pod {} state is {}",
                        warning.pod_name, warning.phase
                    )?;
                }
            }

            let count = report.not_ready_count();
            writeln!(
                out,
                "\nFound {} {} not running\n",
                count,
                plural(count, "container", "containers")
            )?;
        }

        Ok(())
    }

    fn render_json<W: Write>(
        &self,
        report: &AggregatedReport,
        now: NaiveDateTime,
        out: &mut W,
    ) -> io::Result<()> {
        let view = JsonReport {
            namespace: self.options.namespace.as_deref(),
            period_days: self.options.period_days,
            restart_records: filter_by_period(report, self.options.period_days, now.date()),
            not_ready: &report.not_ready,
            warnings: &report.warnings,
        };
        serde_json::to_writer_pretty(&mut *out, &view)?;
        writeln!(out)
    }
}

/// One fixed-width table row
fn format_row(record: &RestartRecord, now: NaiveDateTime) -> String {
    let ready = if record.ready {
        "True".normal()
    } else {
        "False".red()
    };
    let terminated = format!(
        "{} [{}]",
        record.terminated_at.format(TIMESTAMP_FORMAT),
        format_time_ago(record.terminated_at, now)
    );

    format!(
        "{:<60}\t{:<35}\t{:<35}\t{:<10}\t{:<5}\t{:<20}",
        record.pod.trim(),
        record.container,
        record.namespace,
        record.restart_count,
        ready,
        terminated
    )
}

/// Relative description of `then` as seen from `now`, e.g. `3 hours ago`
pub fn format_time_ago(then: NaiveDateTime, now: NaiveDateTime) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = MINUTE * 60;
    const DAY: i64 = HOUR * 24;
    const MONTH: i64 = DAY * 30;
    const YEAR: i64 = DAY * 365;

    let delta = (now - then).num_seconds();
    let secs = delta.abs();

    let (value, unit) = if secs < 1 {
        return "just now".to_string();
    } else if secs < MINUTE {
        (secs, "second")
    } else if secs < HOUR {
        (secs / MINUTE, "minute")
    } else if secs < DAY {
        (secs / HOUR, "hour")
    } else if secs < MONTH {
        (secs / DAY, "day")
    } else if secs < YEAR {
        (secs / MONTH, "month")
    } else {
        (secs / YEAR, "year")
    };

    let suffix = if value == 1 { "" } else { "s" };
    if delta < 0 {
        format!("in {} {}{}", value, unit, suffix)
    } else {
        format!("{} {}{} ago", value, unit, suffix)
    }
}

fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}
