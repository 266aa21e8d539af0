use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs extract, transform and load in order. Any failure aborts the remaining steps.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting analysis");
        self.monitor.log_stats("Start");

        // Extract
        tracing::info!("📥 Loading dataset...");
        let dataset = self.pipeline.extract().await?;
        tracing::info!("Loaded {} records", dataset.len());
        self.monitor.log_stats("Extract");

        // Transform
        tracing::info!("🔬 Deriving insights...");
        let report = self.pipeline.transform(dataset).await?;
        tracing::info!(
            "Derived {} histograms and a {}x{} cross-tabulation",
            report.histograms.len(),
            report.crosstab.heatmap.table.row_labels.len(),
            report.crosstab.heatmap.table.column_labels.len()
        );
        self.monitor.log_stats("Transform");

        // Load
        tracing::info!("💾 Writing charts and tables...");
        let output_path = self.pipeline.load(report).await?;
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
