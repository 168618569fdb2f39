//! Report command

use anyhow::{Context, Result};
use restpods_lib::{
    KubePodSource, PodSource, RenderOptions, ReportBuilder, ReportExporter, ReportRenderer,
    StaticPodSource, TimeNormalizer,
};
use std::io::{self, Write};
use tracing::{debug, info};

use crate::config::Settings;
use crate::output::{print_error, print_info};
use crate::Cli;

/// Fetch pods, build the report, then render and/or export it
pub async fn run(cli: &Cli, settings: &Settings) -> Result<()> {
    let normalizer = match &cli.time_zone {
        Some(zone) => TimeNormalizer::from_name(zone)?,
        None => settings.normalizer()?,
    };
    let namespace = cli.namespace.as_deref().or(settings.namespace.as_deref());
    let period_days = cli.period.unwrap_or(settings.period_days);

    let source: Box<dyn PodSource> = match &cli.from_file {
        Some(path) => Box::new(
            StaticPodSource::from_file(path)
                .with_context(|| format!("Failed to read pods from {}", path.display()))?,
        ),
        None => Box::new(
            KubePodSource::try_default()
                .await
                .context("Exception while listing pods")?,
        ),
    };

    let pods = source
        .list(namespace)
        .await
        .context("Exception while listing pods")?;

    let report = ReportBuilder::new(normalizer).build(&pods);
    let now = normalizer.now();
    info!(
        zone = normalizer.zone().name(),
        restarts = report.restart_records.len(),
        "Report ready"
    );

    if !cli.quiet {
        let renderer = ReportRenderer::new(RenderOptions {
            period_days,
            show_headers: !cli.remove_headers,
            show_warnings: !(cli.ignore_warnings || settings.ignore_warnings),
            namespace: namespace.map(str::to_string),
            format: cli.format.into(),
        });

        let stdout = io::stdout();
        let mut out = stdout.lock();
        renderer
            .render(&report, now, &mut out)
            .context("Failed to write report")?;
        out.flush()?;
    } else {
        debug!("Quiet mode, skipping report rendering");
    }

    if cli.export {
        let file_name = ReportExporter::default_file_name(now.date());
        print_info(&format!("Exporting {}", file_name));
        if let Err(e) = ReportExporter::export(&report, &file_name) {
            print_error("Failed to export report");
            print_error(&e.to_string());
        }
    }

    Ok(())
}
