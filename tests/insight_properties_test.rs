use title_insights::core::crosstab::{join_and_explode, CATEGORY_LABEL, COUNTRY_LABEL};
use title_insights::core::expander::{expand, expand_aligned, OrderedGroup, UnorderedGroup};
use title_insights::core::histogram::{FrequencyTable, OTHERS_LABEL};
use title_insights::core::imputer::impute_date_added;
use title_insights::core::Title;
use title_insights::domain::model::DateAdded;

fn categories(rows: &[&str]) -> Vec<Vec<String>> {
    expand(rows.iter().map(|r| Some(*r)))
}

#[test]
fn test_top_n_plus_others_equals_input_size() {
    let values: Vec<u32> = (0..200).map(|i| (i * 7919) % 37).collect();

    for n in [0, 1, 5, 15, 36, 37, 100] {
        let top = FrequencyTable::count(values.iter().copied()).top_n(n);
        assert_eq!(top.total(), values.len(), "cutoff {}", n);

        let labelled = top.labelled();
        let sum: usize = labelled.iter().map(|e| e.count).sum();
        assert_eq!(sum, values.len());

        if n >= 37 {
            assert!(top.others.is_none());
            assert_eq!(labelled.len(), 37);
        } else {
            assert_eq!(labelled.last().map(|e| e.label.as_str()), Some(OTHERS_LABEL));
        }
    }
}

#[test]
fn test_listed_in_tuple_and_set_examples() {
    let lists = categories(&["Dramas, Comedies", "Comedies, Dramas"]);

    let tuples = FrequencyTable::count(lists.iter().cloned().map(OrderedGroup::from));
    assert_eq!(tuples.len(), 2);
    assert!(tuples.entries().iter().all(|(_, count)| *count == 1));

    let sets = FrequencyTable::count(lists.into_iter().map(UnorderedGroup::from));
    assert_eq!(sets.entries().len(), 1);
    assert_eq!(sets.entries()[0].1, 2);
}

#[test]
fn test_imputation_example() {
    let mut titles = vec![
        Title::new(2020).with_country("USA"),
        Title::new(2020).with_country("USA"),
        Title::new(2020),
    ];

    impute_date_added(&mut titles);
    for title in &titles {
        assert_eq!(title.date_added, Some(DateAdded::ReleaseYear(2020)));
    }
}

#[test]
fn test_crosstab_cells_sum_to_retained_rows() {
    let countries = expand_aligned(
        [
            Some("United States"),
            Some("India, United States"),
            None,
            Some("Japan"),
            Some("France, India"),
        ]
        .into_iter(),
    );
    let listed_in = expand_aligned(
        [
            Some("Dramas"),
            Some("Comedies, International Movies"),
            Some("Dramas"),
            Some("Anime Features"),
            Some("Dramas"),
        ]
        .into_iter(),
    );

    for k in [1, 2, 3, 10] {
        let mut pairs = join_and_explode(&countries, &listed_in, COUNTRY_LABEL, CATEGORY_LABEL);
        pairs.retain_top(k);
        let table = pairs.crosstab().transpose();

        assert_eq!(table.total(), pairs.rows.len(), "top {}", k);
        assert!(table.row_labels.len() <= k);
    }
}
