//! End-to-end denoise: decode, extract luminance, filter, encode

use crate::analysis::FilterReport;
use crate::config::DenoiseConfig;
use crate::data::{load_luminance, save_grid, PixelGrid};
use crate::filter::{run_banded, Region, SeamPolicy};
use crate::logging::RunSpan;
use chrono::Utc;
use tracing::info;

/// Filter an in-memory luminance grid, returning the output and the bands used
pub fn denoise_grid(
    grid: &PixelGrid,
    threads: usize,
    policy: SeamPolicy,
) -> crate::Result<(PixelGrid, Vec<Region>)> {
    let (height, width) = grid.dimensions();
    let banded = run_banded(height, width, threads, policy, &grid.view())?;
    Ok(banded)
}

/// Read `config.input`, filter it and write an 8-bit grayscale `config.output`
pub fn denoise_file(config: &DenoiseConfig) -> crate::Result<FilterReport> {
    let grid = load_luminance(&config.input)?;
    let (height, width) = grid.dimensions();

    let run_span = RunSpan::new(height, width, config.threads, &config.seam_policy.to_string());
    let _enter = run_span.enter();
    info!(input = %config.input.display(), "Loaded image");

    let (filtered, bands) = denoise_grid(&grid, config.threads, config.seam_policy)?;
    let processing_time_ms = run_span.record_completion(bands.len());

    save_grid(&filtered, &config.output)?;
    info!(output = %config.output.display(), "Wrote filtered image");

    let report = FilterReport {
        run_id: run_span.run_id(),
        timestamp: Utc::now(),
        input: config.input.clone(),
        output: config.output.clone(),
        width,
        height,
        threads: config.threads,
        seam_policy: config.seam_policy,
        bands,
        processing_time_ms,
    };

    if let Some(ref report_path) = config.report {
        report.save_json(report_path)?;
        info!(report = %report_path.display(), "Saved run report");
    }

    Ok(report)
}
