use crate::config::toml_config::AnalysisConfig;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "title-insights")]
#[command(about = "Exploratory analysis of a movies and TV shows catalogue")]
pub struct CliConfig {
    /// Zip archive holding the dataset CSV
    #[arg(long = "archive")]
    pub archive_path: Option<String>,

    #[arg(long)]
    pub output_path: Option<String>,

    /// Any of svg, csv, json
    #[arg(long, value_delimiter = ',')]
    pub output_formats: Option<Vec<String>>,

    #[arg(long)]
    pub top_countries: Option<usize>,

    /// Path to a TOML analysis config
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    /// Show what would be processed without executing
    #[arg(long)]
    pub dry_run: bool,
}

impl CliConfig {
    /// 載入 TOML（若有指定）並套用命令列覆蓋設定
    pub fn resolve(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                AnalysisConfig::from_file(path)?
            }
            None => AnalysisConfig::default(),
        };

        if let Some(archive) = &self.archive_path {
            config.dataset.archive = archive.clone();
        }
        if let Some(output_path) = &self.output_path {
            config.output.path = output_path.clone();
        }
        if let Some(formats) = &self.output_formats {
            config.output.formats = formats.clone();
        }
        if let Some(top_countries) = self.top_countries {
            config.set_top_countries(top_countries);
            tracing::info!("🔧 top_countries overridden to: {}", top_countries);
        }

        Ok(config)
    }

    pub fn monitor_enabled(&self, config: &AnalysisConfig) -> bool {
        self.monitor || config.monitoring_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;

    #[test]
    fn test_defaults_without_flags() {
        let cli = CliConfig::parse_from(["title-insights"]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.archive_path(), "netflix-shows.zip");
        assert_eq!(config.output_path(), "./output");
        assert_eq!(config.output_formats(), ["svg", "json"]);
        assert_eq!(config.settings().top_countries, 10);
    }

    #[test]
    fn test_flags_override() {
        let cli = CliConfig::parse_from([
            "title-insights",
            "--archive",
            "data/titles.zip",
            "--output-formats",
            "csv,json",
            "--top-countries",
            "3",
            "--monitor",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.archive_path(), "data/titles.zip");
        assert_eq!(config.output_formats(), ["csv", "json"]);
        assert_eq!(config.settings().top_countries, 3);
        assert!(cli.monitor_enabled(&config));
    }
}
