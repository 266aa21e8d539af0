use crate::core::insights;
use crate::core::loader;
use crate::core::{AnalysisReport, ChartRenderer, ConfigProvider, Dataset, Pipeline, Storage};
use crate::domain::model::{CrossTab, LabelledCount};
use crate::utils::error::{EdaError, Result};
use std::io::Write;
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const SUMMARY_FILENAME: &str = "summary.json";
pub const CROSSTAB_FILENAME: &str = "country_category_crosstab.csv";

/// Loads the catalogue archive, derives every insight and writes charts and tables.
pub struct TitleAnalysisPipeline<S: Storage, C: ConfigProvider, R: ChartRenderer> {
    storage: S,
    config: C,
    renderer: R,
}

impl<S: Storage, C: ConfigProvider, R: ChartRenderer> TitleAnalysisPipeline<S, C, R> {
    pub fn new(storage: S, config: C, renderer: R) -> Self {
        Self {
            storage,
            config,
            renderer,
        }
    }

    fn wants(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    fn chart_files(&self, report: &AnalysisReport) -> Result<Vec<(String, Vec<u8>)>> {
        let ext = self.renderer.file_extension();
        let mut files = Vec::with_capacity(report.histograms.len() + 1);

        for (i, histogram) in report.histograms.iter().enumerate() {
            let name = format!("{:02}_{}.{}", i + 1, histogram.name, ext);
            let document = self.renderer.render_bar_chart(&histogram.chart)?;
            files.push((name, document.into_bytes()));
        }

        let name = format!(
            "{:02}_{}.{}",
            report.histograms.len() + 1,
            report.crosstab.name,
            ext
        );
        let document = self.renderer.render_heatmap(&report.crosstab.heatmap)?;
        files.push((name, document.into_bytes()));

        Ok(files)
    }

    fn table_files(&self, report: &AnalysisReport) -> Result<Vec<(String, Vec<u8>)>> {
        let mut files = Vec::new();

        if self.wants("csv") {
            for histogram in &report.histograms {
                files.push((
                    format!("{}.csv", histogram.name),
                    counts_csv(&histogram.entries)?,
                ));
            }
            files.push((
                "country_counts.csv".to_string(),
                counts_csv(&report.crosstab.country_counts)?,
            ));
            files.push((
                CROSSTAB_FILENAME.to_string(),
                crosstab_csv(&report.crosstab.heatmap.table)?,
            ));
        }

        if self.wants("json") {
            let json_data = serde_json::to_string_pretty(report)?;
            files.push((SUMMARY_FILENAME.to_string(), json_data.into_bytes()));
        }

        Ok(files)
    }
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer.into_inner().map_err(|e| EdaError::ProcessingError {
        message: format!("Failed to finish CSV output: {}", e),
    })
}

fn counts_csv(entries: &[LabelledCount]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["label", "count"])?;
    for entry in entries {
        writer.write_record([entry.label.as_str(), entry.count.to_string().as_str()])?;
    }
    finish_csv(writer)
}

fn crosstab_csv(table: &CrossTab) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec![table.row_name.clone()];
    header.extend(table.column_labels.iter().cloned());
    writer.write_record(&header)?;

    for (label, row) in table.row_labels.iter().zip(&table.counts) {
        let mut record = vec![label.clone()];
        record.extend(row.iter().map(|c| c.to_string()));
        writer.write_record(&record)?;
    }
    finish_csv(writer)
}

fn zip_files(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in files {
        zip.start_file(name.as_str(), SimpleFileOptions::default())?;
        zip.write_all(data)?;
    }
    // 完成並取回底層 Vec<u8>
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, R: ChartRenderer> Pipeline for TitleAnalysisPipeline<S, C, R> {
    async fn extract(&self) -> Result<Dataset> {
        loader::load_dataset(&self.storage, self.config.archive_path()).await
    }

    async fn transform(&self, data: Dataset) -> Result<AnalysisReport> {
        let settings = self.config.settings();
        tracing::debug!("Analysis settings: {:?}", settings);
        Ok(insights::analyze(data, &settings))
    }

    async fn load(&self, report: AnalysisReport) -> Result<String> {
        let output_path = self.config.output_path().to_string();

        let mut written = Vec::new();

        if self.wants(self.renderer.file_extension()) {
            for (name, data) in self.chart_files(&report)? {
                let path = self.output_file(&name);
                self.storage.write_file(&path, &data).await?;
                written.push(path);
            }
        }

        let tables = self.table_files(&report)?;
        match self.config.compression_filename() {
            Some(filename) if !tables.is_empty() => {
                let zip_data = zip_files(&tables)?;
                tracing::debug!(
                    "Writing ZIP file with {} files ({} bytes)",
                    tables.len(),
                    zip_data.len()
                );
                let path = self.output_file(filename);
                self.storage.write_file(&path, &zip_data).await?;
                written.push(path);
            }
            _ => {
                for (name, data) in &tables {
                    let path = self.output_file(name);
                    self.storage.write_file(&path, data).await?;
                    written.push(path);
                }
            }
        }

        for path in &written {
            tracing::debug!("Wrote {}", path);
        }
        tracing::info!("💾 Wrote {} files to {}", written.len(), output_path);

        Ok(output_path)
    }
}
