pub mod cli;
pub mod toml_config;

pub use toml_config::FeedConfig;

#[cfg(feature = "cli")]
use clap::Parser;

/// Command line flags. All optional; a bare invocation runs the stock feed.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "deals-feed")]
#[command(about = "Builds a discounted-listings JSON feed from marketplace search results")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the feed file is written to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Feed file name
    #[arg(long)]
    pub output_file: Option<String>,

    /// Minimum discount percentage a listing needs to be kept
    #[arg(long)]
    pub min_discount: Option<f64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    /// Show the resolved configuration without fetching anything
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliArgs {
    /// Loads the config file (or the stock config) and applies flag overrides.
    pub fn resolve(&self) -> crate::Result<FeedConfig> {
        let mut config = match &self.config {
            Some(path) => FeedConfig::from_file(path)?,
            None => FeedConfig::default(),
        };

        if let Some(path) = &self.output_path {
            config.output.path = path.clone();
        }
        if let Some(file) = &self.output_file {
            config.output.filename = file.clone();
        }
        if let Some(min_discount) = self.min_discount {
            config.filter.min_discount = min_discount;
        }
        if self.monitor {
            config.monitoring.enabled = true;
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_bare_invocation_resolves_standard_config() {
        let args = CliArgs::parse_from(["deals-feed"]);
        let config = args.resolve().unwrap();

        assert_eq!(config.categories.len(), 4);
        assert_eq!(config.output_file_path(), FeedConfig::default().output_file_path());
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_flags_override_config() {
        let args = CliArgs::parse_from([
            "deals-feed",
            "--output-path",
            "/tmp/deals",
            "--output-file",
            "feed.json",
            "--min-discount",
            "30",
            "--monitor",
        ]);
        let config = args.resolve().unwrap();

        assert_eq!(config.output.path, "/tmp/deals");
        assert_eq!(config.output.filename, "feed.json");
        assert_eq!(config.filter.min_discount, 30.0);
        assert!(config.monitoring_enabled());
    }
}
