use crate::domain::model::{AnalysisReport, BarChart, Dataset, HeatmapChart};
use crate::domain::settings::AnalysisSettings;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn archive_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn settings(&self) -> AnalysisSettings;
    /// 壓縮輸出的檔名，None 表示不壓縮
    fn compression_filename(&self) -> Option<&str> {
        None
    }
}

/// 將圖表描述轉為可寫入的文件（例如 SVG）
pub trait ChartRenderer: Send + Sync {
    fn file_extension(&self) -> &str;
    fn render_bar_chart(&self, chart: &BarChart) -> Result<String>;
    fn render_heatmap(&self, chart: &HeatmapChart) -> Result<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Dataset>;
    async fn transform(&self, data: Dataset) -> Result<AnalysisReport>;
    async fn load(&self, report: AnalysisReport) -> Result<String>;
}
