use crate::domain::ports::ConfigProvider;
use crate::domain::settings::AnalysisSettings;
use crate::utils::error::{EdaError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ARCHIVE: &str = "netflix-shows.zip";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_COMPRESSED_FILENAME: &str = "insights.zip";
pub const OUTPUT_FORMATS: [&str; 3] = ["svg", "csv", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub dataset: DatasetConfig,
    pub insights: Option<InsightsConfig>,
    pub crosstab: Option<CrosstabConfig>,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub archive: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightsConfig {
    pub countries_per_title: Option<usize>,
    pub categories_per_title: Option<usize>,
    pub categories: Option<usize>,
    pub category_combinations: Option<usize>,
    pub country_combinations: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrosstabConfig {
    pub top_countries: Option<usize>,
    pub lower_percentile: Option<f64>,
    pub upper_percentile: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig {
                archive: DEFAULT_ARCHIVE.to_string(),
            },
            insights: None,
            crosstab: None,
            output: OutputConfig {
                path: DEFAULT_OUTPUT_PATH.to_string(),
                formats: vec!["svg".to_string(), "json".to_string()],
                compression: None,
            },
            monitoring: None,
        }
    }
}

impl AnalysisConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EdaError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EdaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定者保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EdaError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("dataset.archive", &self.dataset.archive)?;
        validation::validate_file_extension("dataset.archive", &self.dataset.archive, &["zip"])?;
        validation::validate_path("output.path", &self.output.path)?;
        if self.output.formats.is_empty() {
            return Err(EdaError::MissingConfigError {
                field: "output.formats".to_string(),
            });
        }
        validation::validate_one_of("output.formats", &self.output.formats, &OUTPUT_FORMATS)?;

        let settings = self.settings();
        for (field, value) in [
            ("insights.countries_per_title", settings.countries_per_title),
            ("insights.categories_per_title", settings.categories_per_title),
            ("insights.categories", settings.categories),
            ("insights.category_combinations", settings.category_combinations),
            ("insights.country_combinations", settings.country_combinations),
            ("crosstab.top_countries", settings.top_countries),
        ] {
            validation::validate_positive_number(field, value, 1)?;
        }

        validation::validate_range("crosstab.lower_percentile", settings.lower_percentile, 0.0, 100.0)?;
        validation::validate_range("crosstab.upper_percentile", settings.upper_percentile, 0.0, 100.0)?;
        if settings.lower_percentile >= settings.upper_percentile {
            return Err(EdaError::ConfigValidationError {
                field: "crosstab".to_string(),
                message: "lower_percentile must be below upper_percentile".to_string(),
            });
        }

        if let Some(compression) = &self.output.compression {
            if compression.enabled {
                let filename = self.compression_filename().unwrap_or(DEFAULT_COMPRESSED_FILENAME);
                validation::validate_file_extension("output.compression.filename", filename, &["zip"])?;
            }
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn set_top_countries(&mut self, top_countries: usize) {
        self.crosstab.get_or_insert_with(CrosstabConfig::default).top_countries = Some(top_countries);
    }
}

impl ConfigProvider for AnalysisConfig {
    fn archive_path(&self) -> &str {
        &self.dataset.archive
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn settings(&self) -> AnalysisSettings {
        let defaults = AnalysisSettings::default();
        let insights = self.insights.clone().unwrap_or_default();
        let crosstab = self.crosstab.clone().unwrap_or_default();

        AnalysisSettings {
            countries_per_title: insights.countries_per_title.unwrap_or(defaults.countries_per_title),
            categories_per_title: insights.categories_per_title.unwrap_or(defaults.categories_per_title),
            categories: insights.categories.unwrap_or(defaults.categories),
            category_combinations: insights
                .category_combinations
                .unwrap_or(defaults.category_combinations),
            country_combinations: insights
                .country_combinations
                .unwrap_or(defaults.country_combinations),
            top_countries: crosstab.top_countries.unwrap_or(defaults.top_countries),
            lower_percentile: crosstab.lower_percentile.unwrap_or(defaults.lower_percentile),
            upper_percentile: crosstab.upper_percentile.unwrap_or(defaults.upper_percentile),
        }
    }

    fn compression_filename(&self) -> Option<&str> {
        self.output
            .compression
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.filename.as_deref().unwrap_or(DEFAULT_COMPRESSED_FILENAME))
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
