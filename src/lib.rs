pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{chart::SvgChartRenderer, storage::LocalStorage};
pub use config::AnalysisConfig;
pub use core::{engine::AnalysisEngine, pipeline::TitleAnalysisPipeline};
pub use utils::error::{EdaError, Result};
