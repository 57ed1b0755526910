//! Ads API client

use crate::config::Config;
use crate::config::models::FieldsConfig;
use crate::core::batch::{BatchPaginator, GroupRequest, GroupedFetch, ObjectKind, ParsedObject};
use crate::core::providers::GraphTransport;
use crate::core::rate_limiter::RateLimiter;
use crate::core::traits::BatchTransport;
use crate::utils::error::{FetchError, Result};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Thumbnail edge length requested with creatives
pub const THUMBNAIL_SIZE: u32 = 256;

/// Client for account, campaign, ad set, ad, creative and activity objects
#[derive(Clone)]
pub struct AdsClient {
    paginator: BatchPaginator,
    fields: FieldsConfig,
    account_id: Option<u64>,
}

impl AdsClient {
    /// Create a client speaking to the Graph API
    pub fn new(config: &Config) -> Result<Self> {
        let transport = GraphTransport::new(&config.api)?;
        info!("Created ads client for {}", transport.base_url());
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn BatchTransport>, config: &Config) -> Self {
        let limiter = RateLimiter::new(config.rate_limit.clone());
        Self::with_limiter(transport, limiter, config)
    }

    /// Create a client sharing an existing limiter
    pub fn with_limiter(
        transport: Arc<dyn BatchTransport>,
        limiter: RateLimiter,
        config: &Config,
    ) -> Self {
        Self {
            paginator: BatchPaginator::new(transport, limiter, config.batch.clone()),
            fields: config.fields.clone(),
            account_id: config.api.account_id,
        }
    }

    pub fn paginator(&self) -> &BatchPaginator {
        &self.paginator
    }

    pub fn fields(&self) -> &FieldsConfig {
        &self.fields
    }

    pub fn set_account_id(&mut self, account_id: Option<u64>) {
        self.account_id = account_id;
    }

    /// Current account in `act_<id>` form
    pub fn account_id(&self) -> Option<String> {
        self.account_id.map(account_node)
    }

    fn require_account(&self) -> Result<String> {
        self.account_id()
            .ok_or_else(|| FetchError::config("no account id set"))
    }

    /// Fetch one ad account
    pub async fn get_account(&self, account_id: u64) -> Result<ParsedObject> {
        let request = GroupRequest::object(account_node(account_id)).with_fields(&self.fields.account);
        self.paginator
            .fetch_one_object(&request, ObjectKind::Account)
            .await
    }

    /// Campaigns of the current account
    pub async fn get_campaigns(&self) -> Result<Vec<ParsedObject>> {
        let account = self.require_account()?;
        let request = GroupRequest::edge(account, "campaigns").with_fields(&self.fields.campaign);
        let campaigns = self
            .paginator
            .fetch_one(&request, ObjectKind::Campaign)
            .await?;
        debug!("Fetched {} campaigns", campaigns.len());
        Ok(campaigns)
    }

    /// Ad sets below each campaign, batched
    pub async fn get_ad_sets(&self, campaigns: &[ParsedObject]) -> Result<GroupedFetch> {
        let parents = object_ids(campaigns)?;
        self.paginator
            .fetch_grouped(&parents, ObjectKind::AdSet, |id| {
                GroupRequest::edge(id.clone(), "adsets").with_fields(&self.fields.ad_set)
            })
            .await
    }

    /// Ads below each ad set, batched
    pub async fn get_ads(&self, ad_sets: &[ParsedObject]) -> Result<GroupedFetch> {
        let parents = object_ids(ad_sets)?;
        self.paginator
            .fetch_grouped(&parents, ObjectKind::Ad, |id| {
                GroupRequest::edge(id.clone(), "ads").with_fields(&self.fields.ad)
            })
            .await
    }

    /// Creative objects by id, batched, with 256px thumbnails
    pub async fn get_ad_creatives(&self, object_ids: &[String]) -> Result<GroupedFetch> {
        self.paginator
            .fetch_grouped(object_ids, ObjectKind::AdCreative, |id| {
                GroupRequest::object(id.clone())
                    .with_fields(&self.fields.ad_creative)
                    .with_param("thumbnail_height", THUMBNAIL_SIZE)
                    .with_param("thumbnail_width", THUMBNAIL_SIZE)
            })
            .await
    }

    /// Ad-category activity of the current account between `start` and `end`,
    /// optionally narrowed to `object_ids`
    pub async fn get_ad_activity_history(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        object_ids: &[String],
    ) -> Result<Vec<ParsedObject>> {
        if start > end {
            return Err(FetchError::config(format!(
                "activity range starts after it ends: {} > {}",
                start, end
            )));
        }

        let account = self.require_account()?;
        let mut request = GroupRequest::edge(account, "activities")
            .with_fields(&self.fields.activity)
            .with_param("category", "ad")
            .with_param("since", start.timestamp())
            .with_param("until", end.timestamp());
        if !object_ids.is_empty() {
            request = request.with_param("extra_oids", json!(object_ids));
        }

        self.paginator
            .fetch_one(&request, ObjectKind::Activity)
            .await
    }
}

pub(crate) fn account_node(account_id: u64) -> String {
    format!("act_{}", account_id)
}

/// Ids of already-fetched objects; an object without one is a parse error
pub fn object_ids(objects: &[ParsedObject]) -> Result<Vec<String>> {
    objects
        .iter()
        .map(|object| {
            object
                .id()
                .map(str::to_string)
                .ok_or_else(|| FetchError::parse(format!("{:?} object has no id", object.kind)))
        })
        .collect()
}
