use crate::filter::{Region, SeamPolicy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Summary of one denoise run, written as JSON on request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterReport {
    pub run_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: usize,
    pub height: usize,
    pub threads: usize,
    pub seam_policy: SeamPolicy,
    pub bands: Vec<Region>,
    pub processing_time_ms: f64,
}

impl FilterReport {
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn print_summary(&self) {
        println!("Input:  {} ({}x{})", self.input.display(), self.width, self.height);
        println!("Output: {}", self.output.display());
        println!("Threads: {}, seam policy: {}", self.threads, self.seam_policy);
        for (i, band) in self.bands.iter().enumerate() {
            println!("  band {:>2}: rows {:>5}..{:<5}", i, band.start_y, band.end_y);
        }
        println!("Filtered in {:.1}ms", self.processing_time_ms);
    }
}
