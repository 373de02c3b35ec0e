use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use records::{
    ClientError, DeletePayload, HttpRecordClient, Query, RecordClient, RecordsPayload,
    SortDirection,
};
use serde_json::{Value, json};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/")
}

fn client(base_url: &str) -> HttpRecordClient {
    HttpRecordClient::builder()
        .base_url(base_url)
        .credentials("project-1", "public-key")
        .build()
        .unwrap()
}

fn header(headers: &HeaderMap, name: &str) -> Value {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(Value::from)
        .unwrap_or(Value::Null)
}

async fn echo_fetch(
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(query): Json<Value>,
) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [{
            "Id": 1,
            "table": table,
            "project": header(&headers, "x-project-id"),
            "key": header(&headers, "x-public-key"),
            "query": query
        }]
    }))
}

#[tokio::test]
async fn fetch_posts_query_with_credentials() {
    let base_url = serve(Router::new().route("/tables/{table}/fetch", post(echo_fetch))).await;
    let query = Query::select(["Name", "month_c"])
        .order_by("month_c", SortDirection::Desc)
        .paging(100, 0);

    let response = client(&base_url)
        .fetch_records("budget_c", &query)
        .await
        .unwrap();

    assert!(response.success);
    let record = &response.data.unwrap()[0];
    assert_eq!(record["table"], "budget_c");
    assert_eq!(record["project"], "project-1");
    assert_eq!(record["key"], "public-key");
    assert_eq!(record["query"]["orderBy"][0]["sorttype"], "DESC");
    assert_eq!(record["query"]["pagingInfo"]["limit"], 100);
}

#[tokio::test]
async fn remote_failure_envelope_is_not_an_error() {
    let router = Router::new().route(
        "/tables/{table}/fetch",
        post(|| async { Json(json!({ "success": false, "message": "quota exceeded" })) }),
    );
    let base_url = serve(router).await;

    let response = client(&base_url)
        .fetch_records("budget_c", &Query::default())
        .await
        .unwrap();
    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("quota exceeded"));
}

#[tokio::test]
async fn error_status_carries_body_message() {
    let router = Router::new().route(
        "/tables/{table}/records/{id}",
        post(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "success": false, "message": "slow down" })),
            )
        }),
    );
    let base_url = serve(router).await;

    let err = client(&base_url)
        .get_record_by_id("category_c", 4, &Query::default())
        .await
        .unwrap_err();
    match &err {
        ClientError::Server { status, message } => {
            assert_eq!(*status, StatusCode::TOO_MANY_REQUESTS);
            assert_eq!(message.as_deref(), Some("slow down"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.message(), "slow down");
}

#[tokio::test]
async fn error_status_without_body_uses_status() {
    let router = Router::new().route(
        "/tables/{table}/records",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base_url = serve(router).await;

    let err = client(&base_url)
        .create_records("transaction_c", &RecordsPayload::default())
        .await
        .unwrap_err();
    assert_eq!(err.message(), "500 Internal Server Error: server error");
}

#[tokio::test]
async fn writes_use_expected_verbs() {
    let router = Router::new().route(
        "/tables/{table}/records",
        post(|Json(body): Json<Value>| async move {
            Json(json!({
                "success": true,
                "results": [{ "success": true, "data": { "Id": 10, "verb": "POST", "body": body } }]
            }))
        })
        .put(|Json(body): Json<Value>| async move {
            Json(json!({
                "success": true,
                "results": [{ "success": true, "data": { "Id": 10, "verb": "PUT", "body": body } }]
            }))
        })
        .delete(|Json(body): Json<Value>| async move {
            Json(json!({
                "success": true,
                "results": [{ "success": false, "message": format!("locked {}", body["RecordIds"][0]) }]
            }))
        }),
    );
    let base_url = serve(router).await;
    let client = client(&base_url);

    let mut record = serde_json::Map::new();
    record.insert("Name".to_string(), json!("Rent"));
    let payload = RecordsPayload {
        records: vec![record],
    };

    let created = client.create_records("transaction_c", &payload).await.unwrap();
    let data = created.results.unwrap()[0].data.clone().unwrap();
    assert_eq!(data["verb"], "POST");
    assert_eq!(data["body"]["records"][0]["Name"], "Rent");

    let updated = client.update_records("transaction_c", &payload).await.unwrap();
    assert_eq!(updated.results.unwrap()[0].data.as_ref().unwrap()["verb"], "PUT");

    let deleted = client
        .delete_records("transaction_c", &DeletePayload { record_ids: vec![3] })
        .await
        .unwrap();
    let results = deleted.results.unwrap();
    assert!(!results[0].success);
    assert_eq!(results[0].message.as_deref(), Some("locked 3"));
}

#[test]
fn builder_rejects_missing_or_invalid_base_url() {
    let err = HttpRecordClient::builder()
        .credentials("p", "k")
        .build()
        .unwrap_err();
    assert!(matches!(err, ClientError::Config(_)));

    let err = HttpRecordClient::builder()
        .base_url("not a url")
        .credentials("p", "k")
        .build()
        .unwrap_err();
    assert!(matches!(err, ClientError::Config(_)));
}
