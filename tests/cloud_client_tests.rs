//! Integration tests for the CloudApiClient using mockito for HTTP mocking.

use mockito::{Matcher, Server};
use serde_json::json;
use veracity_context::{BatchRequest, CloudApiClient, ContextError, Datasource, ExpectationSuite};

fn test_client(server: &Server) -> CloudApiClient {
    CloudApiClient::with_base_url(server.url(), "test-token".to_string())
}

#[test]
fn test_create_datasource() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/datasources")
        .match_header("authorization", "Bearer test-token")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "name": "warehouse",
            "kind": "sql"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "name": "warehouse",
            "kind": "sql",
            "assets": ["orders", "customers"]
        }"#,
        )
        .create();

    let client = test_client(&server);
    let created = client
        .create_datasource(&Datasource::new("warehouse", "sql"))
        .unwrap();

    mock.assert();
    assert_eq!(created.name, "warehouse");
    assert!(created.has_asset("orders"));
}

#[test]
fn test_list_datasources() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/datasources")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "data": [
                {"name": "warehouse", "kind": "sql", "assets": ["orders"]},
                {"name": "lake", "kind": "filesystem"}
            ]
        }"#,
        )
        .create();

    let client = test_client(&server);
    let datasources = client.list_datasources().unwrap();

    mock.assert();
    assert_eq!(datasources.len(), 2);
    assert_eq!(datasources[0].name, "warehouse");
    assert_eq!(datasources[1].kind, "filesystem");
    assert!(datasources[1].assets.is_empty());
}

#[test]
fn test_get_batch_list() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/batches")
        .match_body(Matcher::PartialJson(json!({
            "datasource_name": "warehouse",
            "data_asset_name": "orders"
        })))
        .with_status(200)
        .with_body(
            r#"{
            "data": [{
                "id": "warehouse::orders",
                "datasource_name": "warehouse",
                "data_asset_name": "orders"
            }]
        }"#,
        )
        .create();

    let client = test_client(&server);
    let batches = client
        .get_batch_list(&BatchRequest::new("warehouse", "orders"))
        .unwrap();

    mock.assert();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].id, "warehouse::orders");
}

#[test]
fn test_put_expectation_suite() {
    let mut server = Server::new();

    let mock = server
        .mock("PUT", "/expectation-suites")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::PartialJson(json!({"name": "orders.warning"})))
        .with_status(200)
        .with_body("{}")
        .create();

    let client = test_client(&server);
    let suite = ExpectationSuite::new("orders.warning");
    let result = client.put_expectation_suite(&suite);

    mock.assert();
    assert!(result.is_ok());
}

#[test]
fn test_get_expectation_suite() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/expectation-suites/orders.warning")
        .with_status(200)
        .with_body(
            r#"{
            "name": "orders.warning",
            "expectations": [{
                "expectation_type": "expect_table_row_count_to_be_between",
                "kwargs": {"min_value": 1}
            }],
            "meta": {}
        }"#,
        )
        .create();

    let client = test_client(&server);
    let suite = client.get_expectation_suite("orders.warning").unwrap();

    mock.assert();
    assert_eq!(suite.name, "orders.warning");
    assert_eq!(suite.len(), 1);
    assert_eq!(
        suite.expectations[0].expectation_type,
        "expect_table_row_count_to_be_between"
    );
}

#[test]
fn test_get_expectation_suite_not_found() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/expectation-suites/missing.suite")
        .with_status(404)
        .with_body("Expectation suite not found")
        .create();

    let client = test_client(&server);
    let result = client.get_expectation_suite("missing.suite");

    mock.assert();
    assert!(result.is_err());
    match result {
        Err(ContextError::NotFound(msg)) => {
            assert!(msg.contains("not found"));
        }
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_run_checkpoint() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/checkpoints/nightly/runs")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(
            r#"{
            "checkpoint_name": "nightly",
            "run_id": {
                "run_name": "nightly-2024-01-15",
                "run_time": "2024-01-15T10:00:00Z"
            },
            "success": true,
            "validated_suites": ["orders.warning"]
        }"#,
        )
        .create();

    let client = test_client(&server);
    let result = client.run_checkpoint("nightly").unwrap();

    mock.assert();
    assert!(result.success);
    assert_eq!(result.checkpoint_name, "nightly");
    assert_eq!(
        result.run_id.run_name,
        Some("nightly-2024-01-15".to_string())
    );
    assert_eq!(result.validated_suites, vec!["orders.warning".to_string()]);
}

#[test]
fn test_run_validation_operator() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/validation-operators/warning_operator/runs")
        .match_body(Matcher::PartialJson(json!({
            "batch_requests": [{
                "datasource_name": "warehouse",
                "data_asset_name": "orders"
            }]
        })))
        .with_status(200)
        .with_body(
            r#"{
            "operator_name": "warning_operator",
            "run_id": {"run_name": null, "run_time": "2024-01-15T10:00:00Z"},
            "success": true,
            "batch_count": 1
        }"#,
        )
        .create();

    let client = test_client(&server);
    let requests = vec![BatchRequest::new("warehouse", "orders")];
    let result = client
        .run_validation_operator("warning_operator", &requests)
        .unwrap();

    mock.assert();
    assert!(result.success);
    assert_eq!(result.batch_count, 1);
}

#[test]
fn test_run_profiler_on_data() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/profilers/default/runs")
        .match_body(Matcher::PartialJson(json!({
            "batch_request": {
                "datasource_name": "warehouse",
                "data_asset_name": "orders"
            }
        })))
        .with_status(200)
        .with_body(
            r#"{
            "name": "default_profiled",
            "expectations": [],
            "meta": {"profiler": "default"}
        }"#,
        )
        .create();

    let client = test_client(&server);
    let suite = client
        .run_profiler_on_data(
            "default",
            &BatchRequest::new("warehouse", "orders"),
        )
        .unwrap();

    mock.assert();
    assert_eq!(suite.name, "default_profiled");
    assert_eq!(suite.meta["profiler"], "default");
}

#[test]
fn test_build_data_docs() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/data-docs/builds")
        .with_status(200)
        .with_body(
            r#"{
            "sites": {
                "cloud_site": "https://docs.veracity-data.io/org/site"
            }
        }"#,
        )
        .create();

    let client = test_client(&server);
    let sites = client.build_data_docs().unwrap();

    mock.assert();
    assert_eq!(
        sites.get("cloud_site").map(String::as_str),
        Some("https://docs.veracity-data.io/org/site")
    );
}

#[test]
fn test_unauthorized_error() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/datasources")
        .with_status(401)
        .with_body("Unauthorized")
        .create();

    let client = CloudApiClient::with_base_url(server.url(), "invalid-token".to_string());
    let result = client.list_datasources();

    mock.assert();
    assert!(result.is_err());
    match result {
        Err(ContextError::Unauthorized) => {}
        _ => panic!("Expected Unauthorized error"),
    }
}

#[test]
fn test_rate_limit_error() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/datasources")
        .with_status(429)
        .with_body("Rate limit exceeded")
        .create();

    let client = test_client(&server);
    let result = client.list_datasources();

    mock.assert();
    assert!(result.is_err());
    match result {
        Err(ContextError::RateLimitExceeded) => {}
        _ => panic!("Expected RateLimitExceeded error"),
    }
}

#[test]
fn test_generic_api_error() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/datasources")
        .with_status(500)
        .with_body("Internal server error")
        .create();

    let client = test_client(&server);
    let result = client.list_datasources();

    mock.assert();
    assert!(result.is_err());
    match result {
        Err(ContextError::ApiError { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal server error"));
        }
        _ => panic!("Expected ApiError"),
    }
}
