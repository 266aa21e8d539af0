use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// `date_added` 欄位：原始日期，或補值後的上架年份
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateAdded {
    Date(NaiveDate),
    ReleaseYear(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Runtime {
    Minutes(u32),
    Seasons(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub show_id: Option<String>,
    pub kind: Option<String>,
    pub title: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    pub date_added: Option<DateAdded>,
    pub release_year: i32,
    pub rating: Option<String>,
    pub duration: Option<Runtime>,
    pub listed_in: Option<String>,
    pub description: Option<String>,
}

impl Title {
    /// 只有必要欄位的紀錄，其餘皆為 None
    pub fn new(release_year: i32) -> Self {
        Self {
            show_id: None,
            kind: None,
            title: None,
            director: None,
            cast: None,
            country: None,
            date_added: None,
            release_year,
            rating: None,
            duration: None,
            listed_in: None,
            description: None,
        }
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.country = Some(country.to_string());
        self
    }

    pub fn with_categories(mut self, listed_in: &str) -> Self {
        self.listed_in = Some(listed_in.to_string());
        self
    }

    pub fn with_date_added(mut self, date: NaiveDate) -> Self {
        self.date_added = Some(DateAdded::Date(date));
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub titles: Vec<Title>,
    /// 每個欄位的缺值數量（依 header 順序）
    pub missing: IndexMap<String, usize>,
    pub date_format: Option<String>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: Option<String>,
    pub y_label: String,
    pub bars: Vec<LabelledCount>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorRange {
    pub vmin: f64,
    pub vmax: f64,
}

impl ColorRange {
    /// 將數值映射到 [0, 1]，超出範圍者飽和
    pub fn normalize(&self, value: f64) -> f64 {
        if self.vmax <= self.vmin {
            return if value > self.vmin { 1.0 } else { 0.0 };
        }
        ((value - self.vmin) / (self.vmax - self.vmin)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    pub row_name: String,
    pub column_name: String,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    pub fn transpose(&self) -> CrossTab {
        let counts = (0..self.column_labels.len())
            .map(|c| self.counts.iter().map(|row| row[c]).collect())
            .collect();

        CrossTab {
            row_name: self.column_name.clone(),
            column_name: self.row_name.clone(),
            row_labels: self.column_labels.clone(),
            column_labels: self.row_labels.clone(),
            counts,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn get(&self, row: &str, column: &str) -> Option<usize> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.column_labels.iter().position(|l| l == column)?;
        Some(self.counts[r][c])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapChart {
    pub title: Option<String>,
    pub table: CrossTab,
    pub color_range: ColorRange,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramInsight {
    pub name: String,
    pub cutoff: usize,
    pub total: usize,
    pub entries: Vec<LabelledCount>,
    pub others: Option<usize>,
    #[serde(skip)]
    pub chart: BarChart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTabInsight {
    pub name: String,
    pub top_k: usize,
    pub exploded_rows: usize,
    pub retained_rows: usize,
    pub country_counts: Vec<LabelledCount>,
    pub heatmap: HeatmapChart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub records: usize,
    pub missing_before_imputation: IndexMap<String, usize>,
    pub imputed_date_added: usize,
    pub histograms: Vec<HistogramInsight>,
    pub crosstab: CrossTabInsight,
}
