use crate::core::crosstab::{self, ExplodedPairs, CATEGORY_LABEL, COUNTRY_LABEL};
use crate::core::expander::{expand, expand_aligned, group_ordered, group_unordered};
use crate::core::histogram::{plot_hist, FrequencyTable};
use crate::core::imputer::impute_date_added;
use crate::domain::model::{
    AnalysisReport, CrossTabInsight, Dataset, HistogramInsight, LabelledCount, Title,
};
use crate::domain::settings::AnalysisSettings;
use indexmap::IndexMap;
use std::fmt::{Display, Write};
use std::hash::Hash;

pub const HEATMAP_TITLE: &str = "Most common countries of production by category";

fn histogram_insight<K, I>(name: &str, title: &str, values: I, cutoff: usize) -> HistogramInsight
where
    K: Hash + Eq + Display,
    I: IntoIterator<Item = K>,
{
    let (top, chart) = plot_hist(values, cutoff, Some(title));
    tracing::debug!(
        "{}: {} bars, others = {:?}",
        name,
        top.entries.len(),
        top.others
    );

    HistogramInsight {
        name: name.to_string(),
        cutoff,
        total: top.total(),
        entries: chart.bars.clone(),
        others: top.others,
        chart,
    }
}

fn countries(titles: &[Title]) -> Vec<Vec<String>> {
    expand(titles.iter().map(|t| t.country.as_deref()))
}

fn categories(titles: &[Title]) -> Vec<Vec<String>> {
    expand(titles.iter().map(|t| t.listed_in.as_deref()))
}

/// The five frequency insights, in display order.
pub fn histogram_insights(titles: &[Title], settings: &AnalysisSettings) -> Vec<HistogramInsight> {
    vec![
        histogram_insight(
            "countries_per_title",
            "Number of countries a movie or a TV show was produced in",
            countries(titles).iter().map(Vec::len),
            settings.countries_per_title,
        ),
        histogram_insight(
            "categories_per_title",
            "Number of categories a movie or a TV show is listed in",
            categories(titles).iter().map(Vec::len),
            settings.categories_per_title,
        ),
        histogram_insight(
            "categories",
            "Most common categories (a movie or a TV show can be present in more than one)",
            categories(titles).into_iter().flatten(),
            settings.categories,
        ),
        histogram_insight(
            "category_combinations",
            "Most common combination of movie and TV show categories",
            group_ordered(categories(titles)),
            settings.category_combinations,
        ),
        histogram_insight(
            "country_combinations",
            "Most common combinations of movies and TV shows location of production",
            group_unordered(countries(titles)),
            settings.country_combinations,
        ),
    ]
}

pub fn country_category_pairs(titles: &[Title]) -> ExplodedPairs {
    let countries = expand_aligned(titles.iter().map(|t| t.country.as_deref()));
    let categories = expand_aligned(titles.iter().map(|t| t.listed_in.as_deref()));
    crosstab::join_and_explode(&countries, &categories, COUNTRY_LABEL, CATEGORY_LABEL)
}

pub fn crosstab_insight(mut pairs: ExplodedPairs, settings: &AnalysisSettings) -> CrossTabInsight {
    let exploded_rows = pairs.rows.len();
    let country_counts = labelled(&pairs.first_frequencies());

    pairs.retain_top(settings.top_countries);
    let table = pairs.crosstab().transpose();
    let heatmap = crosstab::to_heatmap(
        table,
        Some(HEATMAP_TITLE),
        settings.lower_percentile,
        settings.upper_percentile,
    );

    CrossTabInsight {
        name: "country_category_heatmap".to_string(),
        top_k: settings.top_countries,
        exploded_rows,
        retained_rows: pairs.rows.len(),
        country_counts,
        heatmap,
    }
}

fn labelled(table: &FrequencyTable<String>) -> Vec<LabelledCount> {
    table
        .entries()
        .iter()
        .map(|(label, count)| LabelledCount {
            label: label.clone(),
            count: *count,
        })
        .collect()
}

pub fn format_missing_counts(missing: &IndexMap<String, usize>) -> String {
    let width = missing.keys().map(String::len).max().unwrap_or(0);
    let mut out = String::new();
    for (column, count) in missing {
        let _ = writeln!(out, "{:<width$}  {}", column, count, width = width);
    }
    out
}

pub fn format_value_counts(name: &str, counts: &[LabelledCount]) -> String {
    let width = counts.iter().map(|c| c.label.len()).max().unwrap_or(0).max(name.len());
    let mut out = String::new();
    let _ = writeln!(out, "{}", name);
    for entry in counts {
        let _ = writeln!(out, "{:<width$}  {}", entry.label, entry.count, width = width);
    }
    out
}

/// Loader output to report: prints missing counts, imputes, then derives every insight.
pub fn analyze(mut dataset: Dataset, settings: &AnalysisSettings) -> AnalysisReport {
    print!("{}", format_missing_counts(&dataset.missing));

    let imputed_date_added = impute_date_added(&mut dataset.titles);
    tracing::info!("🩹 Imputed date_added for {} records from release_year", imputed_date_added);

    let histograms = histogram_insights(&dataset.titles, settings);

    let pairs = country_category_pairs(&dataset.titles);
    print!(
        "{}",
        format_value_counts(COUNTRY_LABEL, &labelled(&pairs.first_frequencies()))
    );
    let crosstab = crosstab_insight(pairs, settings);

    AnalysisReport {
        records: dataset.len(),
        missing_before_imputation: dataset.missing,
        imputed_date_added,
        histograms,
        crosstab,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::histogram::OTHERS_LABEL;
    use crate::domain::model::DateAdded;

    fn sample_titles() -> Vec<Title> {
        vec![
            Title::new(2020).with_country("USA").with_categories("Dramas, Comedies"),
            Title::new(2020).with_country("USA, UK").with_categories("Comedies, Dramas"),
            Title::new(2019).with_country("UK, USA").with_categories("Documentaries"),
            Title::new(2018).with_categories("Dramas"),
        ]
    }

    #[test]
    fn test_histogram_insights() {
        let insights = histogram_insights(&sample_titles(), &AnalysisSettings::default());
        assert_eq!(insights.len(), 5);

        // 只有三筆有國家
        assert_eq!(insights[0].total, 3);
        assert_eq!(insights[0].entries[0].label, "2");
        assert_eq!(insights[0].entries[0].count, 2);

        assert_eq!(insights[2].total, 6);
        assert_eq!(insights[2].entries[0].label, "Dramas");

        // tuple: (Dramas, Comedies) 與 (Comedies, Dramas) 不同
        assert_eq!(insights[3].entries.len(), 4);

        // set: {UK, USA} 合併為一組
        assert_eq!(insights[4].entries[0].label, "{UK, USA}");
        assert_eq!(insights[4].entries[0].count, 2);
    }

    #[test]
    fn test_small_cutoff_folds_into_others() {
        let settings = AnalysisSettings {
            categories: 1,
            ..AnalysisSettings::default()
        };
        let insights = histogram_insights(&sample_titles(), &settings);
        let categories = &insights[2];

        assert_eq!(categories.entries.len(), 2);
        assert_eq!(categories.entries[1].label, OTHERS_LABEL);
        assert_eq!(categories.others, Some(3));
        let sum: usize = categories.entries.iter().map(|e| e.count).sum();
        assert_eq!(sum, categories.total);
    }

    #[test]
    fn test_crosstab_insight() {
        let settings = AnalysisSettings {
            top_countries: 1,
            ..AnalysisSettings::default()
        };
        let insight = crosstab_insight(country_category_pairs(&sample_titles()), &settings);

        // USA: 2 + 2 + 1, UK: 2 + 1
        assert_eq!(insight.exploded_rows, 8);
        assert_eq!(insight.country_counts[0].label, "USA");
        assert_eq!(insight.retained_rows, 5);

        let table = &insight.heatmap.table;
        assert_eq!(table.row_labels, vec!["USA"]);
        assert_eq!(table.total(), insight.retained_rows);
    }

    #[test]
    fn test_analyze_imputes_and_reports() {
        let mut dataset = Dataset {
            columns: vec!["date_added".to_string()],
            titles: sample_titles(),
            ..Dataset::default()
        };
        dataset.missing.insert("date_added".to_string(), 4);

        let report = analyze(dataset, &AnalysisSettings::default());
        assert_eq!(report.records, 4);
        assert_eq!(report.imputed_date_added, 4);
        assert_eq!(report.missing_before_imputation["date_added"], 4);
        assert_eq!(report.histograms.len(), 5);
    }

    #[test]
    fn test_imputed_titles_use_release_year() {
        let mut titles = sample_titles();
        impute_date_added(&mut titles);
        assert_eq!(titles[2].date_added, Some(DateAdded::ReleaseYear(2019)));
    }

    #[test]
    fn test_format_value_counts() {
        let pairs = country_category_pairs(&sample_titles());
        let text = format_value_counts(COUNTRY_LABEL, &labelled(&pairs.first_frequencies()));

        assert_eq!(text, "Country\nUSA      5\nUK       3\n");
    }

    #[test]
    fn test_format_value_counts_empty() {
        assert_eq!(format_value_counts(COUNTRY_LABEL, &[]), "Country\n");
    }

    #[test]
    fn test_format_missing_counts() {
        let mut missing = IndexMap::new();
        missing.insert("country".to_string(), 831usize);
        missing.insert("date_added".to_string(), 10);

        let text = format_missing_counts(&missing);
        assert_eq!(text, "country     831\ndate_added  10\n");
    }
}
