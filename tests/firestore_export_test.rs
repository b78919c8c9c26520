//! End-to-end export against a mock Firestore REST endpoint

use docsheet::config::{DocsheetConfig, ExportConfig, FirestoreConfig};
use docsheet::core::workflow::{ExportWorkflow, Stage};
use docsheet::domain::{DocsheetError, StoreError};
use mockito::Matcher;
use tempfile::TempDir;

const ORDERS_PATH: &str = "/v1/projects/shop/databases/(default)/documents/orders";

const ORDERS_BODY: &str = r#"{
    "documents": [
        {
            "name": "projects/shop/databases/(default)/documents/orders/o-1",
            "fields": {
                "total": {"doubleValue": 19.99},
                "paid": {"booleanValue": true},
                "placedAt": {"timestampValue": "2025-03-01T10:00:00.000000Z"}
            },
            "createTime": "2025-03-01T10:00:00.000000Z",
            "updateTime": "2025-03-01T10:00:00.000000Z"
        },
        {
            "name": "projects/shop/databases/(default)/documents/orders/o-2",
            "fields": {
                "total": {"integerValue": "5"},
                "customer": {"mapValue": {"fields": {"name": {"stringValue": "Ada"}}}}
            }
        }
    ]
}"#;

fn config(server_url: &str, output_dir: &TempDir) -> DocsheetConfig {
    DocsheetConfig {
        application: Default::default(),
        firestore: FirestoreConfig {
            project_id: "shop".to_string(),
            base_url: format!("{server_url}/v1"),
            ..Default::default()
        },
        export: ExportConfig {
            output_dir: output_dir.path().to_string_lossy().to_string(),
            sheet_label: "Orders".to_string(),
            ..Default::default()
        },
        logging: Default::default(),
    }
}

#[tokio::test]
async fn test_check_and_export_over_rest() {
    let mut server = mockito::Server::new_async().await;
    let list = server
        .mock("GET", ORDERS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ORDERS_BODY)
        .expect(2)
        .create_async()
        .await;

    let output_dir = TempDir::new().unwrap();
    let workflow = ExportWorkflow::from_config(&config(&server.url(), &output_dir)).unwrap();

    assert_eq!(workflow.check_existence("orders").await.unwrap(), 2);
    let summary = workflow.export_collection("orders", "orders-march").await.unwrap();

    list.assert_async().await;
    assert_eq!(summary.record_count, 2);
    // id, paid, placedAt, total, customer
    assert_eq!(summary.column_count, 5);
    assert_eq!(summary.path, output_dir.path().join("orders-march.xlsx"));
    assert!(summary.path.is_file());
    assert_eq!(workflow.snapshot().stage, Stage::ExportSucceeded);
}

#[tokio::test]
async fn test_missing_collection_is_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/projects/shop/databases/(default)/documents/ghosts")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let output_dir = TempDir::new().unwrap();
    let workflow = ExportWorkflow::from_config(&config(&server.url(), &output_dir)).unwrap();

    let err = workflow.check_existence("ghosts").await.unwrap_err();
    assert!(matches!(err, DocsheetError::EmptyCollection(ref name) if name == "ghosts"));
    assert_eq!(workflow.snapshot().stage, Stage::Idle);
}

#[tokio::test]
async fn test_server_error_reported_as_store_query() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", ORDERS_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal")
        .create_async()
        .await;

    let output_dir = TempDir::new().unwrap();
    let workflow = ExportWorkflow::from_config(&config(&server.url(), &output_dir)).unwrap();

    let err = workflow.check_existence("orders").await.unwrap_err();
    assert!(matches!(
        err,
        DocsheetError::StoreQuery(StoreError::ServerError { status: 500, .. })
    ));
    assert!(!workflow.snapshot().loading);
    assert!(!workflow.snapshot().is_confirmed());
}
