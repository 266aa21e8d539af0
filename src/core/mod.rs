pub mod crosstab;
pub mod engine;
pub mod expander;
pub mod histogram;
pub mod imputer;
pub mod insights;
pub mod loader;
pub mod pipeline;

pub use crate::domain::model::{AnalysisReport, Dataset, Title};
pub use crate::domain::ports::{ChartRenderer, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
