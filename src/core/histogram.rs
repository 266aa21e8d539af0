use crate::domain::model::{BarChart, LabelledCount};
use indexmap::IndexMap;
use std::fmt::Display;
use std::hash::Hash;

pub const OTHERS_LABEL: &str = "Others";
pub const Y_AXIS_LABEL: &str = "Number of Movies and TV shows";

const PIXELS_PER_INCH: f64 = 100.0;

/// 依出現次數遞減排序的次數表，同次數者維持首次出現的順序
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, usize)>,
}

impl<K: Hash + Eq> FrequencyTable<K> {
    pub fn count<I>(values: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut counts: IndexMap<K, usize> = IndexMap::new();
        for value in values {
            *counts.entry(value).or_insert(0) += 1;
        }

        let mut entries: Vec<(K, usize)> = counts.into_iter().collect();
        // sort_by 是穩定排序
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        Self { entries }
    }
}

impl<K> FrequencyTable<K> {
    pub fn entries(&self) -> &[(K, usize)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// The `k` most frequent values.
    pub fn top_keys(&self, k: usize) -> impl Iterator<Item = &K> {
        self.entries.iter().take(k).map(|(key, _)| key)
    }

    pub fn top_n(self, n: usize) -> TopN<K> {
        let mut entries = self.entries;
        let rest = if entries.len() > n {
            entries.split_off(n)
        } else {
            Vec::new()
        };

        let others = if rest.is_empty() {
            None
        } else {
            Some(rest.iter().map(|(_, count)| count).sum())
        };

        TopN {
            cutoff: n,
            entries,
            others,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopN<K> {
    pub cutoff: usize,
    pub entries: Vec<(K, usize)>,
    pub others: Option<usize>,
}

impl<K: Display> TopN<K> {
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum::<usize>() + self.others.unwrap_or(0)
    }

    /// 轉成顯示用標籤，"Others" 會附加在最後
    pub fn labelled(&self) -> Vec<LabelledCount> {
        let mut bars: Vec<LabelledCount> = self
            .entries
            .iter()
            .map(|(key, count)| LabelledCount {
                label: key.to_string(),
                count: *count,
            })
            .collect();

        if let Some(others) = self.others {
            bars.push(LabelledCount {
                label: OTHERS_LABEL.to_string(),
                count: others,
            });
        }
        bars
    }

    /// Figure width scales with the cutoff, not with the number of bars drawn.
    pub fn to_bar_chart(&self, title: Option<&str>) -> BarChart {
        let width_inches = self.cutoff as f64 * 0.4 + 3.0;
        BarChart {
            title: title.map(str::to_string),
            y_label: Y_AXIS_LABEL.to_string(),
            bars: self.labelled(),
            width: (width_inches * PIXELS_PER_INCH).round() as u32,
            height: (6.0 * PIXELS_PER_INCH) as u32,
        }
    }
}

/// Count, truncate to the top `n` and fold the remainder into "Others".
pub fn plot_hist<K, I>(values: I, n: usize, title: Option<&str>) -> (TopN<K>, BarChart)
where
    K: Hash + Eq + Display,
    I: IntoIterator<Item = K>,
{
    let top = FrequencyTable::count(values).top_n(n);
    let chart = top.to_bar_chart(title);
    (top, chart)
}
