use httpmock::{Method::GET, MockServer};
use ns_core::{Error, NewsProvider, NewsQuery};
use ns_news::{NewsApiClient, NewsApiConfig};
use serde_json::json;

fn client(server: &MockServer) -> NewsApiClient {
    NewsApiClient::new(NewsApiConfig::new("test-key").with_base_url(server.base_url())).unwrap()
}

#[tokio::test]
async fn offline_fetch_articles() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/everything")
                .header("x-api-key", "test-key")
                .query_param("q", "\"Apple\" OR AAPL")
                .query_param("sortBy", "publishedAt")
                .query_param("pageSize", "30")
                .query_param("language", "en");
            then.status(200).json_body(json!({
                "status": "ok",
                "totalResults": 2,
                "articles": [
                    {
                        "source": {"id": "reuters", "name": "Reuters"},
                        "author": "Jane Doe",
                        "title": "Apple beats expectations",
                        "description": "Strong iPhone sales",
                        "url": "https://example.com/1",
                        "publishedAt": "2024-05-02T20:30:00Z",
                        "content": "..."
                    },
                    {
                        "source": {"id": null, "name": null},
                        "title": null,
                        "description": "No headline",
                        "url": "https://example.com/2",
                        "publishedAt": "2024-05-01T08:00:00Z"
                    }
                ]
            }));
        })
        .await;

    let query = NewsQuery::new("aapl").with_company(Some("Apple".to_string()));
    let articles = client(&server).fetch_articles(&query).await.unwrap();

    mock.assert_async().await;
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].source.as_deref(), Some("Reuters"));
    assert_eq!(articles[0].title.as_deref(), Some("Apple beats expectations"));
    assert!(articles[0].published_at.is_some());
    assert!(articles[1].title.is_none());
    assert!(articles[1].source.is_none());
}

#[tokio::test]
async fn offline_missing_articles_field_is_empty() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/everything");
            then.status(200).json_body(json!({"status": "ok", "totalResults": 0}));
        })
        .await;

    let articles = client(&server)
        .fetch_articles(&NewsQuery::new("ZZZZ"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(articles.is_empty());
}

#[tokio::test]
async fn offline_upstream_error_keeps_status_and_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/everything").query_param("q", "TSLA");
            then.status(429)
                .body(r#"{"status":"error","code":"rateLimited","message":"Too many requests"}"#);
        })
        .await;

    let err = client(&server)
        .fetch_articles(&NewsQuery::new("TSLA"))
        .await
        .unwrap_err();

    mock.assert_async().await;
    match err {
        Error::Upstream { status, detail } => {
            assert_eq!(status, 429);
            assert!(detail.contains("rateLimited"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
