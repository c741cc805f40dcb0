use clap::Parser;
use median_denoise::config::DenoiseConfig;
use median_denoise::filter::SeamPolicy;
use median_denoise::logging::init_logging;
use median_denoise::pipeline::denoise_file;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "denoise")]
#[command(about = "Convert an image to grayscale and remove noise with a 5x5 median filter")]
#[command(version = "0.1.0")]
struct Cli {
    /// Input image (PNG or JPEG)
    #[arg(long = "in", value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output image, written as 8-bit grayscale
    #[arg(long = "out", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Number of worker threads (row bands)
    #[arg(short, long)]
    threads: Option<usize>,

    /// How band seams are filtered: legacy or overlap
    #[arg(long)]
    seam_policy: Option<SeamPolicy>,

    /// TOML or JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a JSON run report to this file
    #[arg(short, long)]
    report: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Start from the config file (or defaults) and apply command-line overrides
    fn into_config(self) -> anyhow::Result<DenoiseConfig> {
        let mut config = match self.config {
            Some(ref path) => DenoiseConfig::load_from_file(path)?,
            None => DenoiseConfig::default(),
        };

        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(policy) = self.seam_policy {
            config.seam_policy = policy;
        }
        if self.report.is_some() {
            config.report = self.report;
        }
        config.logging = config.logging.with_verbosity(self.verbose);

        if let Err(errors) = config.validate() {
            let details = errors.join("\n  - ");
            return Err(anyhow::anyhow!("Invalid configuration:\n  - {}", details));
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config()?;

    let _log_guard = init_logging(&config.logging)?;

    let report = denoise_file(&config)?;
    report.print_summary();

    if let Some(ref report_path) = config.report {
        println!("Report saved to {}", report_path.display());
    }

    Ok(())
}
