use clap::Parser;
use skyscan_cli::{args::Cli, error::CliError, run};
use skyscan_core::{FlightProvider, ProviderError};
use skyscan_results::{ResultsConfig, SearchSession, ToggleOutcome};
use skyscan_shared::SearchParams;
use skyscan_store::app_config::Config;
use skyscan_store::MockFlightProvider;
use chrono::NaiveDate;

const CONFIG: &str = r#"
[provider]
kind = "mock"
seed = 7
offers_per_search = 24

[results]
default_sort = "price"
comparison_capacity = 3
"#;

fn config() -> Config {
    Config::from_toml(CONFIG).unwrap()
}

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["skyscan"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn params() -> SearchParams {
    SearchParams::one_way("LHR", "JFK", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
}

#[tokio::test]
async fn test_text_report_for_successful_search() {
    let output = run(cli(&["lhr", "jfk", "--date", "2025-06-01"]), config()).await.unwrap();

    assert!(!output.search_failed);
    assert!(output.rendered.starts_with("London (LHR) -> New York (JFK)  2025-06-01  1 passenger\n"));
    assert!(output.rendered.contains("of 24 flights"));
    assert!(output.rendered.contains("Stops: 0 "));
}

#[tokio::test]
async fn test_json_report_honours_filters_and_limit() {
    let output = run(
        cli(&["LHR", "JFK", "-d", "2025-06-01", "--stops", "0,1", "--sort", "duration", "--limit", "5", "--json"]),
        config(),
    )
    .await
    .unwrap();

    let report: serde_json::Value = serde_json::from_str(&output.rendered).unwrap();
    assert_eq!(report["stats"]["total_count"], 24);
    assert_eq!(report["active_filters"], 1);
    assert_eq!(report["event"]["type"], "RESULTS_REPLACED");

    let flights = report["flights"].as_array().unwrap();
    assert!(flights.len() <= 5);
    assert!(flights.iter().all(|f| f["stops"].as_u64().unwrap() <= 1));

    let durations: Vec<i64> = flights.iter().map(|f| f["duration_minutes"].as_i64().unwrap()).collect();
    assert!(durations.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[tokio::test]
async fn test_unknown_airport_renders_failure_state() {
    let output = run(cli(&["LHR", "XYZ", "-d", "2025-06-01"]), config()).await.unwrap();

    assert!(output.search_failed);
    assert!(output.rendered.contains("!! Search failed: Invalid search request: Unknown airport XYZ"));
    assert!(output.rendered.contains("0 of 0 flights, prices: no data"));
    assert!(output.rendered.contains("No flights match the current filters."));
}

#[tokio::test]
async fn test_invalid_search_is_rejected_before_provider() {
    let err = run(cli(&["LHR", "LHR", "-d", "2025-06-01"]), config()).await.unwrap_err();
    assert!(matches!(err, CliError::InvalidSearch(_)));

    let err = run(cli(&["LHR", "JFK", "-d", "2025-06-01", "-p", "12"]), config()).await.unwrap_err();
    assert!(matches!(err, CliError::InvalidSearch(_)));
}

#[tokio::test]
async fn test_comparison_survives_filters_and_resets_on_new_search() {
    let config = config();
    let provider = MockFlightProvider::new(&config.provider);
    let mut session = SearchSession::new(config.results.clone());

    let flights = provider.search(&params()).await.unwrap();
    let ids: Vec<String> = flights.iter().map(|f| f.id.clone()).collect();
    session.replace(params(), flights);

    assert_eq!(session.toggle_compare(&ids[0]), ToggleOutcome::Added);
    assert_eq!(session.toggle_compare(&ids[1]), ToggleOutcome::Added);
    assert_eq!(session.toggle_compare(&ids[2]), ToggleOutcome::Added);
    assert_eq!(session.toggle_compare(&ids[3]), ToggleOutcome::RejectedAtCapacity);
    assert_eq!(session.comparison().ids(), &ids[..3]);

    let cheapest = session.stats().min_price;
    session
        .apply(skyscan_results::FilterAction::SetPriceRange { min: cheapest, max: cheapest })
        .unwrap();
    assert_eq!(session.comparison_flights().len(), 3);
    assert!(session.comparison_rows().iter().any(|row| row.best_price));

    let next = SearchParams::one_way("LHR", "CDG", NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
    let flights = provider.search(&next).await.unwrap();
    session.replace(next, flights);
    assert!(session.comparison().is_empty());
    assert_eq!(session.active_filter_count(), 0);
}

#[tokio::test]
async fn test_provider_failure_leaves_empty_session() {
    let config = config();
    let provider = MockFlightProvider::new(&config.provider)
        .with_failure(ProviderError::RateLimited { retry_after_seconds: 30 });
    let mut session = SearchSession::new(ResultsConfig::default());

    let err = provider.search(&params()).await.unwrap_err();
    session.fail(params(), err.to_string());

    assert!(session.flights().is_empty());
    assert_eq!(session.stats().visible_count, 0);
    assert_eq!(session.last_error(), Some("Rate limited, retry after 30s"));
}
