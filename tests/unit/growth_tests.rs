/// Growth, trailing window and ranking behaviour
use keyword_trend_insights::*;
use std::collections::BTreeMap;

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).expect("valid month")
}

fn series(points: &[(i32, u32, u64)]) -> KeywordSeries {
    let monthly: BTreeMap<YearMonth, u64> = points
        .iter()
        .map(|(year, month, volume)| (ym(*year, *month), *volume))
        .collect();
    KeywordSeries::from_monthly(monthly)
}

#[cfg(test)]
mod growth_unit_tests {
    use super::*;

    #[test]
    fn test_all_zero_series_has_no_growth() {
        let s = series(&[(2025, 5, 0), (2025, 6, 0), (2025, 7, 0)]);
        let record = growth_for(&s, ym(2025, 7));
        assert_eq!(record.growth, 0.0);
        assert_eq!(record.volume, 0);
    }

    #[test]
    fn test_average_ignores_zero_months() {
        let s = series(&[(2025, 5, 0), (2025, 6, 0), (2025, 7, 100)]);
        assert_eq!(average_volume(&s), 100.0);
        assert_eq!(growth_for(&s, ym(2025, 7)).growth, 0.0);
    }

    #[test]
    fn test_unrecorded_month_reads_as_zero_volume() {
        let s = series(&[(2025, 6, 200)]);
        let record = growth_for(&s, ym(2025, 7));
        assert_eq!(record.volume, 0);
        assert_eq!(record.growth, -100.0);
    }

    #[test]
    fn test_vat_example_growth() {
        // five months of 200 plus July 5,000 averages to 1,000
        let s = series(&[
            (2025, 2, 200),
            (2025, 3, 200),
            (2025, 4, 200),
            (2025, 5, 200),
            (2025, 6, 200),
            (2025, 7, 5000),
        ]);
        assert_eq!(average_volume(&s), 1000.0);

        let record = growth_for(&s, ym(2025, 7));
        assert_eq!(record.growth, 400.0);
        assert_eq!(record.volume, 5000);
    }

    #[test]
    fn test_growth_does_not_modify_series() {
        let s = series(&[(2025, 6, 10), (2025, 7, 30)]);
        let before = s.clone();
        let _ = growth_for(&s, ym(2025, 7));
        let _ = previous_months(&s, ym(2025, 7), TRAILING_WINDOW);
        assert_eq!(s, before);
    }

    #[test]
    fn test_window_crosses_year_boundary() {
        let s = series(&[(2024, 8, 1), (2025, 1, 6)]);
        let window = previous_months(&s, ym(2025, 1), TRAILING_WINDOW);

        let labels: Vec<&str> = window.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(
            labels,
            vec!["2024.08", "2024.09", "2024.10", "2024.11", "2024.12", "2025.01"]
        );
        assert_eq!(window[0].volume, 1);
        assert_eq!(window[1].volume, 0);
        assert_eq!(window[5].volume, 6);
    }

    #[test]
    fn test_ranking_ties_keep_dataset_order() {
        let dataset = JsonDataset::from_entries(vec![
            ("b".to_string(), series(&[(2025, 7, 10)])),
            ("a".to_string(), series(&[(2025, 6, 10), (2025, 7, 30)])),
            ("c".to_string(), series(&[(2025, 7, 99)])),
        ])
        .expect("valid dataset");

        let ranking = AnalyticsEngine::new().rank_keywords(&dataset, ym(2025, 7));
        let order: Vec<&str> = ranking.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ranking_is_sorted_descending() {
        let dataset = JsonDataset::from_entries(vec![
            ("low".to_string(), series(&[(2025, 6, 100), (2025, 7, 10)])),
            ("high".to_string(), series(&[(2025, 6, 10), (2025, 7, 100)])),
            ("none".to_string(), series(&[])),
        ])
        .expect("valid dataset");

        let ranking = AnalyticsEngine::new().rank_keywords(&dataset, ym(2025, 7));
        for pair in ranking.windows(2) {
            assert!(pair[0].growth >= pair[1].growth);
        }
        assert_eq!(ranking.len(), dataset.len());
    }
}
