//! Insight report tests

#[cfg(test)]
mod tests {
    use crate::common::{FakeTransport, objects, test_config};
    use figaro_rs::{AdsClient, DateRange, FetchError, InsightsReporter, ObjectKind};
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use std::sync::Arc;

    const COLUMNS: [&str; 4] = ["campaign_id", "impressions", "spend", "date_start"];

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2019, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2019, 5, 3).unwrap(),
        )
        .unwrap()
    }

    fn reporter(transport: Arc<FakeTransport>) -> InsightsReporter {
        InsightsReporter::new(AdsClient::with_transport(
            transport,
            &test_config("http://unused.test"),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_campaign_report_for_given_campaigns() {
        let transport = Arc::new(FakeTransport::new(2, 3));
        let reporter = reporter(transport.clone());
        let campaigns = objects(ObjectKind::Campaign, &["c1", "c2"]);

        let report = reporter
            .campaign_insights_report(range(), Some(campaigns.as_slice()), &COLUMNS)
            .await
            .unwrap();

        assert_eq!(report.columns(), &COLUMNS);
        assert_eq!(report.len(), 12);
        assert_eq!(report.rows()[0], vec![json!("c1"), json!(7), Value::Null, json!("2019-05-01")]);
        assert_eq!(report.rows()[6][0], json!("c2"));

        // two pages per parent, each first page fetched directly
        assert_eq!(transport.batch_count(), 0);
        assert_eq!(transport.fetch_count(), 4);

        let seen = transport.seen.lock();
        let (path, params) = &seen[0];
        assert_eq!(path, "c1/insights");
        assert!(params.contains(&(
            "fields".to_string(),
            "campaign_id,impressions,spend,date_start".to_string()
        )));
        assert!(params.contains(&("time_increment".to_string(), "1".to_string())));
        assert!(params.contains(&(
            "time_range".to_string(),
            r#"{"since":"2019-05-01","until":"2019-05-03"}"#.to_string()
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn test_campaign_report_fetches_account_campaigns() {
        let transport = Arc::new(FakeTransport::new(1, 2));
        let reporter = reporter(transport.clone());

        let report = reporter
            .campaign_insights_report(range(), None, &["campaign_id"])
            .await
            .unwrap();

        // act_42 has two campaigns, each with two insight rows
        assert_eq!(report.len(), 4);
        let paths = transport.seen_paths();
        assert_eq!(paths[0], "act_42/campaigns");
        assert_eq!(paths[1], "act_42-campaigns-0-0/insights");
        assert_eq!(paths[2], "act_42-campaigns-0-1/insights");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ad_report_walks_down_to_ads() {
        let transport = Arc::new(FakeTransport::new(1, 1));
        let reporter = reporter(transport.clone());

        let report = reporter
            .ad_insights_report(range(), None, &["campaign_id", "impressions"])
            .await
            .unwrap();

        assert_eq!(report.len(), 1);
        let paths = transport.seen_paths();
        assert_eq!(
            paths,
            vec![
                "act_42/campaigns",
                "act_42-campaigns-0-0/adsets",
                "act_42-campaigns-0-0-adsets-0-0/ads",
                "act_42-campaigns-0-0-adsets-0-0-ads-0-0/insights",
            ]
        );
        assert_eq!(transport.batch_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ad_set_report_with_no_ad_sets_is_empty() {
        let transport = Arc::new(FakeTransport::new(1, 1));
        let reporter = reporter(transport.clone());

        let report = reporter
            .ad_set_insights_report(range(), Some(&[]), &COLUMNS)
            .await
            .unwrap();

        assert!(report.is_empty());
        assert_eq!(report.columns(), &COLUMNS);
        assert_eq!(transport.fetch_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_needs_account_when_parents_absent() {
        let transport = Arc::new(FakeTransport::new(1, 1));
        let mut client = AdsClient::with_transport(transport, &test_config("http://unused.test"));
        client.set_account_id(None);
        let reporter = InsightsReporter::new(client);

        let result = reporter
            .campaign_insights_report(range(), None, &COLUMNS)
            .await;
        assert!(matches!(result, Err(FetchError::Config(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_ad_set_fetch_fails_the_report() {
        let transport = Arc::new(FakeTransport::new(1, 1).failing(["act_42-campaigns-0-0"]));
        let reporter = reporter(transport);

        let result = reporter
            .ad_set_insights_report(range(), None, &COLUMNS)
            .await;
        assert!(matches!(result, Err(FetchError::Request { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_activity_history_params() {
        let transport = Arc::new(FakeTransport::new(1, 1));
        let client = AdsClient::with_transport(transport.clone(), &test_config("http://unused.test"));
        let start = chrono::DateTime::parse_from_rfc3339("2019-05-01T00:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let end = start + chrono::Duration::days(1);

        let activities = client
            .get_ad_activity_history(start, end, &["a1".to_string(), "a2".to_string()])
            .await
            .unwrap();
        assert_eq!(activities.len(), 1);

        let seen = transport.seen.lock();
        let (path, params) = &seen[0];
        assert_eq!(path, "act_42/activities");
        assert!(params.contains(&("category".to_string(), "ad".to_string())));
        assert!(params.contains(&("since".to_string(), "1556668800".to_string())));
        assert!(params.contains(&("until".to_string(), "1556755200".to_string())));
        assert!(params.contains(&("extra_oids".to_string(), r#"["a1","a2"]"#.to_string())));
        drop(seen);

        let inverted = client.get_ad_activity_history(end, start, &[]).await;
        assert!(matches!(inverted, Err(FetchError::Config(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_creatives_request_thumbnails() {
        let transport = Arc::new(FakeTransport::new(1, 1));
        let client = AdsClient::with_transport(transport.clone(), &test_config("http://unused.test"));

        let fetch = client
            .get_ad_creatives(&["cr1".to_string(), "cr2".to_string()])
            .await
            .unwrap();
        assert_eq!(fetch.len(), 2);

        let seen = transport.seen.lock();
        assert_eq!(seen[0].0, "cr1");
        assert!(seen[0].1.contains(&("thumbnail_height".to_string(), "256".to_string())));
        assert!(seen[0].1.contains(&("thumbnail_width".to_string(), "256".to_string())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_creative_follow_up_pages_resend_thumbnails() {
        let transport = Arc::new(FakeTransport::new(2, 1));
        let mut config = test_config("http://unused.test");
        config.fields.ad_creative = vec!["id".to_string(), "thumbnail_url".to_string()];
        let client = AdsClient::with_transport(transport.clone(), &config);

        let fetch = client.get_ad_creatives(&["cr1".to_string()]).await.unwrap();
        assert_eq!(fetch.len(), 2);
        assert_eq!(transport.fetch_count(), 1);

        let seen = transport.seen.lock();
        let (path, params) = &seen[1];
        assert_eq!(path, "cr1");
        assert!(params.contains(&("thumbnail_height".to_string(), "256".to_string())));
        assert!(params.contains(&("thumbnail_width".to_string(), "256".to_string())));
        assert!(params.iter().all(|(name, _)| name != "fields"));
    }

}
