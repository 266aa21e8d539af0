use crate::domain::model::{DateAdded, Title};

/// Replaces every missing `date_added` with the title's release year.
///
/// Dates already present are left alone. Returns how many rows were filled.
pub fn impute_date_added(titles: &mut [Title]) -> usize {
    let mut imputed = 0;
    for title in titles.iter_mut().filter(|t| t.date_added.is_none()) {
        title.date_added = Some(DateAdded::ReleaseYear(title.release_year));
        imputed += 1;
    }

    tracing::debug!("Imputed date_added for {} records", imputed);
    imputed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_missing_dates_take_release_year() {
        let mut titles = vec![
            Title::new(2020).with_country("USA"),
            Title::new(2020).with_country("USA"),
            Title::new(2020),
        ];

        assert_eq!(impute_date_added(&mut titles), 3);
        assert!(titles
            .iter()
            .all(|t| t.date_added == Some(DateAdded::ReleaseYear(2020))));
    }

    #[test]
    fn test_present_dates_unchanged() {
        let date = NaiveDate::from_ymd_opt(2021, 9, 25).unwrap();
        let mut titles = vec![Title::new(2019).with_date_added(date), Title::new(2018)];

        assert_eq!(impute_date_added(&mut titles), 1);
        assert_eq!(titles[0].date_added, Some(DateAdded::Date(date)));
        assert_eq!(titles[1].date_added, Some(DateAdded::ReleaseYear(2018)));
        assert_eq!(titles[0].release_year, 2019);
    }

    #[test]
    fn test_second_pass_is_noop() {
        let mut titles = vec![Title::new(2001)];
        impute_date_added(&mut titles);
        assert_eq!(impute_date_added(&mut titles), 0);
    }
}
