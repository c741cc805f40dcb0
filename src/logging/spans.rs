//! Span for one denoise run
//!
//! Every run gets a fresh id so log lines from the load, filter and encode
//! steps can be correlated in the JSON log file.

use instant::Instant;
use tracing::{span, Level, Span};
use uuid::Uuid;

/// Span wrapping a single filter run with timing
pub struct RunSpan {
    span: Span,
    start_time: Instant,
    run_id: Uuid,
}

impl RunSpan {
    pub fn new(height: usize, width: usize, threads: usize, seam_policy: &str) -> Self {
        let run_id = Uuid::new_v4();
        let span = span!(
            Level::INFO,
            "denoise_run",
            run_id = %run_id,
            height = height,
            width = width,
            threads = threads,
            seam_policy = seam_policy
        );

        Self {
            span,
            start_time: Instant::now(),
            run_id,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }

    /// Record completion of the run
    pub fn record_completion(&self, bands: usize) -> f64 {
        let elapsed_ms = self.elapsed_ms();
        tracing::info!(
            parent: &self.span,
            bands = bands,
            processing_time_ms = elapsed_ms,
            "Median filter completed"
        );
        elapsed_ms
    }
}
