// tests/answer_client.rs
use std::env;

use discussion_scout::config::SearchConfig;
use discussion_scout::{
    build_client, run_report, search_discussions, AnswerPayload, ExtractOptions, FixedClient,
    PerplexityClient, ReportStatus,
};

#[serial_test::serial]
#[test]
fn missing_api_key_is_a_config_error() {
    env::remove_var("SCOUT_TEST_MODE");
    env::remove_var("PERPLEXITY_API_KEY");
    let err = build_client(&SearchConfig::default()).err().expect("must fail");
    assert!(err.is_config(), "{err}");

    let err = PerplexityClient::from_config(&SearchConfig::default())
        .err()
        .expect("must fail");
    assert!(err.to_string().contains("PERPLEXITY_API_KEY"));
}

#[serial_test::serial]
#[tokio::test]
async fn mock_mode_builds_fixed_client() {
    env::set_var("SCOUT_TEST_MODE", "mock");
    let client = build_client(&SearchConfig::default()).expect("mock client");
    env::remove_var("SCOUT_TEST_MODE");

    assert_eq!(client.provider_name(), "fixed");
    let out = search_discussions(client.as_ref(), "anything", &ExtractOptions::default())
        .await
        .unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].platform, "Reddit");
    assert_eq!(out[1].platform, "Hacker News");
    assert_eq!(out[2].platform, "Product Hunt");
    assert_eq!(out[2].title, "Open Video on Product Hunt");
}

#[tokio::test]
async fn zero_discussions_is_a_completed_report() {
    let client = FixedClient::new(AnswerPayload::text("Nothing relevant was found."));
    let report = run_report(&client, "q", &ExtractOptions::default())
        .await
        .unwrap();
    assert_eq!(report.status, ReportStatus::Completed);
    assert!(report.discussions.is_empty());

    let v = serde_json::to_value(&report).unwrap();
    assert_eq!(v["searchQuery"], "q");
    assert_eq!(v["status"], "completed");
    assert!(v.get("createdAt").is_some());
}
