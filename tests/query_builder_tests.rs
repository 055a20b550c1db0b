use chrono::{NaiveDate, TimeZone, Utc};

use vidsearch::data_models::{
    SafeSearch, SearchFilter, SortOrder, VideoDefinition, VideoDuration,
};
use vidsearch::error::SearchError;
use vidsearch::query_builder::{QueryBuilder, build};

fn relativity_filter() -> SearchFilter {
    let mut filter = SearchFilter::new("theory of relativity");
    filter.max_results = 5;
    filter.duration = VideoDuration::Short;
    filter.safe_search = SafeSearch::Strict;
    filter.order = SortOrder::Relevance;
    filter
}

mod params {
    use super::*;

    #[test]
    fn test_relativity_scenario() {
        let params = build(&relativity_filter()).unwrap();

        assert_eq!(params.get("q"), Some("theory of relativity"));
        assert_eq!(params.get("maxResults"), Some("5"));
        assert_eq!(params.get("videoDuration"), Some("short"));
        assert_eq!(params.get("safeSearch"), Some("strict"));
        assert_eq!(params.get("order"), Some("relevance"));
        assert_eq!(params.get("type"), Some("video"));
    }

    #[test]
    fn test_fixed_policy_params_always_present() {
        let params = build(&SearchFilter::new("cats")).unwrap();

        assert_eq!(params.get("part"), Some("snippet"));
        assert_eq!(params.get("type"), Some("video"));
        assert_eq!(params.get("videoEmbeddable"), Some("true"));
        assert_eq!(params.get("relevanceLanguage"), Some("en"));
        assert_eq!(params.get("videoCaption"), Some("any"));
        assert_eq!(params.get("videoDimension"), Some("any"));
    }

    #[test]
    fn test_defaults() {
        let params = build(&SearchFilter::new("cats")).unwrap();

        assert_eq!(params.get("maxResults"), Some("5"));
        assert_eq!(params.get("videoDuration"), Some("short"));
        assert_eq!(params.get("regionCode"), Some("NL"));
        assert_eq!(params.get("safeSearch"), Some("strict"));
        assert_eq!(params.get("order"), Some("relevance"));
        assert_eq!(params.get("videoDefinition"), Some("any"));
        assert!(!params.contains("publishedAfter"));
        assert!(!params.contains("publishedBefore"));
    }

    #[test]
    fn test_never_contains_api_key() {
        let params = build(&relativity_filter()).unwrap();
        assert!(!params.contains("key"));
    }

    #[test]
    fn test_query_is_trimmed() {
        let params = build(&SearchFilter::new("  black holes \n")).unwrap();
        assert_eq!(params.get("q"), Some("black holes"));
    }

    #[test]
    fn test_enum_wire_names() {
        let mut filter = SearchFilter::new("q");
        filter.duration = VideoDuration::Long;
        filter.safe_search = SafeSearch::None;
        filter.order = SortOrder::ViewCount;
        filter.definition = VideoDefinition::High;

        let params = build(&filter).unwrap();
        assert_eq!(params.get("videoDuration"), Some("long"));
        assert_eq!(params.get("safeSearch"), Some("none"));
        assert_eq!(params.get("order"), Some("viewCount"));
        assert_eq!(params.get("videoDefinition"), Some("high"));
    }

    #[test]
    fn test_region_is_uppercased() {
        let mut filter = SearchFilter::new("q");
        filter.region_code = "us".to_string();
        assert_eq!(build(&filter).unwrap().get("regionCode"), Some("US"));
    }

    #[test]
    fn test_pinned_language_comes_from_builder() {
        let builder = QueryBuilder::new("nl");
        let params = builder.build(&SearchFilter::new("q")).unwrap();
        assert_eq!(params.get("relevanceLanguage"), Some("nl"));
    }

    #[test]
    fn test_date_window_formatting() {
        let filter = SearchFilter::new("q")
            .published_after_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .published_before_date(NaiveDate::from_ymd_opt(2025, 7, 31).unwrap());

        let params = build(&filter).unwrap();
        assert_eq!(params.get("publishedAfter"), Some("2024-01-01T00:00:00Z"));
        assert_eq!(params.get("publishedBefore"), Some("2025-07-31T23:59:59Z"));
    }

    #[test]
    fn test_single_sided_date_window() {
        let mut filter = SearchFilter::new("q");
        filter.published_before = Some(Utc.with_ymd_and_hms(2020, 6, 1, 8, 0, 0).unwrap());

        let params = build(&filter).unwrap();
        assert!(!params.contains("publishedAfter"));
        assert_eq!(params.get("publishedBefore"), Some("2020-06-01T08:00:00Z"));
    }

    #[test]
    fn test_same_day_window_is_valid() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let filter = SearchFilter::new("q")
            .published_after_date(day)
            .published_before_date(day);
        assert!(build(&filter).is_ok());
    }

    #[test]
    fn test_build_is_deterministic() {
        let filter = relativity_filter()
            .published_after_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let first = build(&filter).unwrap();
        let second = build(&filter).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.pairs(), second.pairs());
    }

    #[test]
    fn test_param_order_is_stable() {
        let params = build(&SearchFilter::new("q")).unwrap();
        let names: Vec<&str> = params.pairs().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "part",
                "type",
                "videoEmbeddable",
                "q",
                "maxResults",
                "videoDuration",
                "regionCode",
                "relevanceLanguage",
                "safeSearch",
                "videoCaption",
                "videoDefinition",
                "videoDimension",
                "order",
            ]
        );
    }
}

mod validation {
    use super::*;

    fn assert_invalid(filter: &SearchFilter) {
        match build(filter) {
            Err(SearchError::InvalidInput(_)) => {}
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_empty_query() {
        assert_invalid(&SearchFilter::new(""));
    }

    #[test]
    fn test_rejects_whitespace_query() {
        assert_invalid(&SearchFilter::new(" \t\n "));
    }

    #[test]
    fn test_max_results_bounds() {
        for (count, ok) in [(0, false), (1, true), (50, true), (51, false)] {
            let mut filter = SearchFilter::new("q");
            filter.max_results = count;
            assert_eq!(build(&filter).is_ok(), ok, "max_results = {count}");
        }
    }

    #[test]
    fn test_rejects_bad_region() {
        let mut filter = SearchFilter::new("q");
        filter.region_code = "NLD".to_string();
        assert_invalid(&filter);
    }

    #[test]
    fn test_rejects_inverted_date_window() {
        let filter = SearchFilter::new("q")
            .published_after_date(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap())
            .published_before_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_invalid(&filter);
    }
}
