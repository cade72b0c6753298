/// Insight request assembly from dataset selections
use keyword_trend_insights::insights::{month_over_month, InsightParams};
use keyword_trend_insights::*;

const DATASET: &str = r#"{
    "부가세": {"monthlyData": {
        "2025-02": 200, "2025-03": 200, "2025-04": 200,
        "2025-05": 200, "2025-06": 200, "2025-07": 5000
    }},
    "알바": {"monthlyData": {"2025-06": 800, "2025-07": 1000}}
}"#;

fn july() -> YearMonth {
    YearMonth::new(2025, 7).expect("valid month")
}

fn selection_metrics(keywords: &[&str]) -> Vec<KeywordMetrics> {
    let dataset = JsonDataset::from_json_str(DATASET).expect("valid dataset");
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_string()).collect();
    AnalyticsEngine::new().selection_metrics(&dataset, &keywords, july())
}

#[cfg(test)]
mod insight_request_unit_tests {
    use super::*;

    #[test]
    fn test_month_over_month_examples() {
        let window = vec![
            MonthVolume { month: "2025.06".to_string(), volume: 200 },
            MonthVolume { month: "2025.07".to_string(), volume: 300 },
        ];
        assert_eq!(month_over_month(300, &window), "50.0");

        let window = vec![
            MonthVolume { month: "2025.06".to_string(), volume: 0 },
            MonthVolume { month: "2025.07".to_string(), volume: 300 },
        ];
        assert_eq!(month_over_month(300, &window), "0");
    }

    #[test]
    fn test_vat_and_alba_request() {
        let metrics = selection_metrics(&["부가세", "알바"]);
        let request = build_insight_request(&metrics, july()).expect("valid request");
        let params: Vec<&InsightParams> = request.params().collect();

        assert_eq!(params.len(), 2);
        let vat = params[0];
        assert_eq!(vat.keyword, "부가세");
        assert_eq!(vat.growth, 400.0);
        assert_eq!(vat.volume, 5000);
        assert_eq!(vat.category, KeywordCategory::Sidejob);
        assert_eq!(vat.month_over_month, "2400.0");
        assert!(vat.trend_text.ends_with("2025.07: 5,000건"));

        let window = &request.keywords[0].metrics.previous_months;
        assert_eq!(window.len(), 6);
        assert_eq!(window.last().map(|m| m.month.as_str()), Some("2025.07"));

        assert_eq!(params[1].keyword, "알바");
        assert_eq!(params[1].category, KeywordCategory::Sidejob);
        assert_eq!(params[1].month_over_month, "25.0");
    }

    #[test]
    fn test_request_building_is_idempotent() {
        let metrics = selection_metrics(&["알바", "부가세"]);
        let first = build_insight_request(&metrics, july()).expect("valid request");
        let second = build_insight_request(&metrics, july()).expect("valid request");
        assert_eq!(first, second);
        assert_eq!(first.keywords[0].params.keyword, "알바");
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let metrics = selection_metrics(&["없는키워드"]);
        assert!(metrics.is_empty());
        assert!(matches!(
            build_insight_request(&metrics, july()),
            Err(InsightError::Validation(_))
        ));
    }

    #[test]
    fn test_window_for_an_earlier_month_is_rejected() {
        // June's window sent for a July request
        let june = YearMonth::new(2025, 6).expect("valid month");
        let dataset = JsonDataset::from_json_str(DATASET).expect("valid dataset");
        let metrics = AnalyticsEngine::new().selection_metrics(&dataset, &["알바".to_string()], june);

        let result = build_insight_request(&metrics, july());
        assert!(matches!(result, Err(InsightError::Validation(ref m)) if m.contains("2025.07")));
    }

    #[test]
    fn test_params_serialize_camel_case() {
        let metrics = selection_metrics(&["부가세"]);
        let request = build_insight_request(&metrics, july()).expect("valid request");
        let value = serde_json::to_value(&request.keywords[0].params).expect("serializable");

        assert_eq!(value["monthOverMonth"], "2400.0");
        assert_eq!(value["category"], "sidejob");
        assert_eq!(value["year"], 2025);
        assert!(value.get("trendText").is_some());
    }
}
