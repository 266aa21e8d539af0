use crate::core::histogram::FrequencyTable;
use crate::domain::model::{ColorRange, CrossTab, HeatmapChart};
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub const COUNTRY_LABEL: &str = "Country";
pub const CATEGORY_LABEL: &str = "Category";

/// One exploded row: a single value from each of the two joined fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRow {
    pub first: String,
    pub second: String,
}

#[derive(Debug, Clone)]
pub struct ExplodedPairs {
    pub first_name: String,
    pub second_name: String,
    pub rows: Vec<PairRow>,
}

/// 依列位置合併兩個多值欄位並做笛卡兒展開，任一欄缺值的列會被丟棄
pub fn join_and_explode(
    first: &[Option<Vec<String>>],
    second: &[Option<Vec<String>>],
    first_name: &str,
    second_name: &str,
) -> ExplodedPairs {
    let mut rows = Vec::new();

    for (left, right) in first.iter().zip(second.iter()) {
        let (Some(left), Some(right)) = (left, right) else {
            continue;
        };
        for a in left {
            for b in right {
                rows.push(PairRow {
                    first: a.clone(),
                    second: b.clone(),
                });
            }
        }
    }

    ExplodedPairs {
        first_name: first_name.to_string(),
        second_name: second_name.to_string(),
        rows,
    }
}

impl ExplodedPairs {
    pub fn first_frequencies(&self) -> FrequencyTable<String> {
        FrequencyTable::count(self.rows.iter().map(|row| row.first.clone()))
    }

    /// Keeps only rows whose first value is among the `k` most frequent.
    pub fn retain_top(&mut self, k: usize) {
        let frequencies = self.first_frequencies();
        let keep: HashSet<&String> = frequencies.top_keys(k).collect();
        self.rows.retain(|row| keep.contains(&row.first));
    }

    /// Rows are the second dimension, columns the first. Labels sort ascending.
    pub fn crosstab(&self) -> CrossTab {
        let column_labels: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.first.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut cells: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for row in &self.rows {
            // labels 已排序，binary_search 一定找得到
            if let Ok(column) = column_labels.binary_search(&row.first) {
                cells
                    .entry(row.second.as_str())
                    .or_insert_with(|| vec![0; column_labels.len()])[column] += 1;
            }
        }

        let row_labels = cells.keys().map(|k| k.to_string()).collect();
        let counts = cells.into_values().collect();

        CrossTab {
            row_name: self.second_name.clone(),
            column_name: self.first_name.clone(),
            row_labels,
            column_labels,
            counts,
        }
    }
}

/// Linear-interpolated percentile over `values`; `q` in 0..=100.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// 以百分位數決定色階範圍，少數極端值不會壓縮其餘格子的顏色
pub fn robust_color_range(table: &CrossTab, lower_pct: f64, upper_pct: f64) -> ColorRange {
    let values: Vec<f64> = table.counts.iter().flatten().map(|&c| c as f64).collect();

    let vmin = percentile(&values, lower_pct).unwrap_or(0.0);
    let vmax = percentile(&values, upper_pct).unwrap_or(0.0);

    ColorRange { vmin, vmax }
}

pub fn to_heatmap(
    table: CrossTab,
    title: Option<&str>,
    lower_pct: f64,
    upper_pct: f64,
) -> HeatmapChart {
    let color_range = robust_color_range(&table, lower_pct, upper_pct);
    HeatmapChart {
        title: title.map(str::to_string),
        table,
        color_range,
        width: 2100,
        height: 400,
    }
}
