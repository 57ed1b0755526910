//! HTTP transport tests against a mock Graph server

#[cfg(test)]
mod tests {
    use crate::common::{TEST_TOKEN, graph_page, ids, objects, test_config};
    use figaro_rs::{AdsClient, BatchTransport, FetchError, GraphTransport, GroupRequest, ObjectKind};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn batch_element(code: u16, body: serde_json::Value) -> serde_json::Value {
        json!({ "code": code, "headers": [], "body": body.to_string() })
    }

    #[test]
    fn test_transport_requires_access_token() {
        let mut config = test_config("http://localhost:1");
        config.api.access_token = None;
        assert!(matches!(
            GraphTransport::new(&config.api),
            Err(FetchError::Config(_))
        ));
    }

    #[test]
    fn test_resolve_url() {
        let config = test_config("http://localhost:1/");
        let transport = GraphTransport::new(&config.api).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:1/v3.3/");
        assert_eq!(
            transport.resolve_url(&GroupRequest::edge("act_42", "campaigns")),
            "http://localhost:1/v3.3/act_42/campaigns"
        );
    }

    #[tokio::test]
    async fn test_submit_batch_maps_each_element() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3.3/"))
            .and(body_string_contains("access_token=test-token"))
            .and(body_string_contains("batch="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                batch_element(200, graph_page(&["a1", "a2"], Some("http://next.test/page2"))),
                batch_element(400, json!({ "error": { "message": "Invalid parameter", "code": 100 } })),
                batch_element(400, json!({ "error": { "message": "User request limit reached", "code": 17 } })),
                null
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let transport = GraphTransport::new(&test_config(&server.uri()).api).unwrap();
        let requests = vec![
            GroupRequest::edge("c1", "adsets").with_fields(["id", "name"]),
            GroupRequest::edge("c2", "adsets"),
            GroupRequest::edge("c3", "adsets"),
            GroupRequest::edge("c4", "adsets"),
        ];

        let entries = transport.submit_batch(&requests).await.unwrap();
        assert_eq!(entries.len(), 4);

        let first = entries[0].outcome.as_ref().unwrap();
        assert_eq!(first.next_url.as_deref(), Some("http://next.test/page2"));
        assert_eq!(entries[0].request.parent_id, "c1");

        match &entries[1].outcome {
            Err(FetchError::Request { status, code, .. }) => {
                assert_eq!(*status, Some(400));
                assert_eq!(*code, Some(100));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(entries[2].outcome.as_ref().unwrap_err().is_throttled());
        assert!(matches!(
            entries[3].outcome,
            Err(FetchError::Request { status: None, .. })
        ));
    }

    #[tokio::test]
    async fn test_batch_post_rejected_as_a_whole() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3.3/"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&server)
            .await;

        let transport = GraphTransport::new(&test_config(&server.uri()).api).unwrap();
        let result = transport.submit_batch(&[GroupRequest::object("1")]).await;
        assert!(result.unwrap_err().is_throttled());
    }

    #[tokio::test]
    async fn test_fetch_page_appends_access_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3.3/act_42/campaigns"))
            .and(query_param("fields", "id,name"))
            .and(query_param("access_token", TEST_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(graph_page(&["c1"], None)))
            .expect(1)
            .mount(&server)
            .await;

        let transport = GraphTransport::new(&test_config(&server.uri()).api).unwrap();
        let request = GroupRequest::edge("act_42", "campaigns").with_fields(["id", "name"]);
        let page = transport
            .fetch_page(&transport.resolve_url(&request), &request.query_params())
            .await
            .unwrap();

        assert!(!page.has_next());
        assert_eq!(page.page["data"][0]["id"], "c1");
    }

    #[tokio::test]
    async fn test_fetch_page_skips_params_already_in_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3.3/cr1"))
            .and(query_param("after", "x"))
            .respond_with(ResponseTemplate::new(200).set_body_json(graph_page(&["cr1"], None)))
            .expect(1)
            .mount(&server)
            .await;

        let transport = GraphTransport::new(&test_config(&server.uri()).api).unwrap();
        let next = format!(
            "{}/v3.3/cr1?thumbnail_height=256&access_token=cursor-token&after=x",
            server.uri()
        );
        let params = GroupRequest::object("cr1")
            .with_fields(["id"])
            .with_param("thumbnail_height", 256)
            .with_param("thumbnail_width", 256)
            .follow_up_params();
        transport.fetch_page(&next, &params).await.unwrap();

        let received = server.received_requests().await.unwrap();
        let query: Vec<(String, String)> = received[0]
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let count = |name: &str| query.iter().filter(|(k, _)| k == name).count();
        assert_eq!(count("thumbnail_height"), 1);
        assert_eq!(count("thumbnail_width"), 1);
        assert_eq!(count("access_token"), 1);
        assert_eq!(count("fields"), 0);
    }

    #[tokio::test]
    async fn test_fetch_page_error_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3.3/act_42"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "message": "(#80004) There have been too many calls", "code": 80004 }
            })))
            .mount(&server)
            .await;

        let transport = GraphTransport::new(&test_config(&server.uri()).api).unwrap();
        let url = transport.resolve_url(&GroupRequest::object("act_42"));
        let error = transport.fetch_page(&url, &[]).await.unwrap_err();
        assert!(error.is_throttled());
        assert_eq!(error.provider_code(), Some(80004));
    }

    #[tokio::test]
    async fn test_client_follows_paging_over_http() {
        let server = MockServer::start().await;
        let next = format!(
            "{}/v3.3/act_42/campaigns?after=abc&access_token={}",
            server.uri(),
            TEST_TOKEN
        );

        Mock::given(method("GET"))
            .and(path("/v3.3/act_42/campaigns"))
            .and(query_param("fields", "id,name"))
            .respond_with(ResponseTemplate::new(200).set_body_json(graph_page(&["c1", "c2"], Some(&next))))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v3.3/act_42/campaigns"))
            .and(query_param("after", "abc"))
            .and(query_param("access_token", TEST_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(graph_page(&["c3"], None)))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = test_config(&server.uri());
        config.fields.campaign = vec!["id".to_string(), "name".to_string()];
        let client = AdsClient::new(&config).unwrap();

        let campaigns = client.get_campaigns().await.unwrap();
        assert_eq!(ids(&campaigns), vec!["c1", "c2", "c3"]);
        assert_eq!(campaigns[0].get("name"), Some(&json!("name c1")));
    }

    #[tokio::test]
    async fn test_client_batches_ad_sets_over_http() {
        let server = MockServer::start().await;
        let next = format!("{}/v3.3/c1/adsets?after=p2", server.uri());

        Mock::given(method("POST"))
            .and(path("/v3.3/"))
            .and(body_string_contains("c1%2Fadsets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                batch_element(200, graph_page(&["s1"], Some(&next))),
                batch_element(200, graph_page(&["s3"], None)),
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v3.3/c1/adsets"))
            .and(query_param("after", "p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(graph_page(&["s2"], None)))
            .expect(1)
            .mount(&server)
            .await;

        let client = AdsClient::new(&test_config(&server.uri())).unwrap();
        let fetch = client
            .get_ad_sets(&objects(ObjectKind::Campaign, &["c1", "c2"]))
            .await
            .unwrap();

        assert!(fetch.is_complete());
        assert_eq!(ids(&fetch.objects), vec!["s1", "s2", "s3"]);
        assert_eq!(fetch.stats.batches_submitted, 1);
        assert_eq!(fetch.stats.pages_fetched, 1);
    }
}
