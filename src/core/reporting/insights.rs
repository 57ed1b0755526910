//! Insight reports over campaigns, ad sets and ads

use super::table::ReportTable;
use crate::core::batch::{GroupRequest, ObjectKind, ParsedObject};
use crate::sdk::{AdsClient, object_ids};
use crate::utils::error::{FetchError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Value, json};
use tracing::info;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar-day range reported with daily granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    since: NaiveDate,
    until: NaiveDate,
}

impl DateRange {
    pub fn new(since: NaiveDate, until: NaiveDate) -> Result<Self> {
        if since > until {
            return Err(FetchError::config(format!(
                "date range starts after it ends: {} > {}",
                since, until
            )));
        }
        Ok(Self { since, until })
    }

    /// Range covering the UTC calendar days of two instants
    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        Self::new(start.date_naive(), end.date_naive())
    }

    pub fn since(&self) -> NaiveDate {
        self.since
    }

    pub fn until(&self) -> NaiveDate {
        self.until
    }

    /// `{"since": "YYYY-MM-DD", "until": "YYYY-MM-DD"}`
    pub fn time_range(&self) -> Value {
        json!({
            "since": self.since.format(DATE_FORMAT).to_string(),
            "until": self.until.format(DATE_FORMAT).to_string(),
        })
    }

    /// Add daily `time_increment` and `time_range` to a request
    pub fn apply(&self, request: GroupRequest) -> GroupRequest {
        request
            .with_param("time_increment", 1)
            .with_param("time_range", self.time_range())
    }
}

/// Builds insight tables, one rate-limited call per parent object
#[derive(Clone)]
pub struct InsightsReporter {
    client: AdsClient,
}

impl InsightsReporter {
    pub fn new(client: AdsClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AdsClient {
        &self.client
    }

    /// Daily insights per campaign; all campaigns of the account when `campaigns` is `None`
    pub async fn campaign_insights_report<S: AsRef<str>>(
        &self,
        range: DateRange,
        campaigns: Option<&[ParsedObject]>,
        columns: &[S],
    ) -> Result<ReportTable> {
        let campaigns = match campaigns {
            Some(campaigns) => campaigns.to_vec(),
            None => self.client.get_campaigns().await?,
        };
        self.insights_report(&campaigns, range, columns).await
    }

    /// Daily insights per ad set; every ad set of every campaign when `ad_sets` is `None`
    pub async fn ad_set_insights_report<S: AsRef<str>>(
        &self,
        range: DateRange,
        ad_sets: Option<&[ParsedObject]>,
        columns: &[S],
    ) -> Result<ReportTable> {
        let ad_sets = match ad_sets {
            Some(ad_sets) => ad_sets.to_vec(),
            None => self.all_ad_sets().await?,
        };
        self.insights_report(&ad_sets, range, columns).await
    }

    /// Daily insights per ad; every ad of every ad set when `ads` is `None`
    pub async fn ad_insights_report<S: AsRef<str>>(
        &self,
        range: DateRange,
        ads: Option<&[ParsedObject]>,
        columns: &[S],
    ) -> Result<ReportTable> {
        let ads = match ads {
            Some(ads) => ads.to_vec(),
            None => {
                let ad_sets = self.all_ad_sets().await?;
                self.client.get_ads(&ad_sets).await?.into_result()?
            }
        };
        self.insights_report(&ads, range, columns).await
    }

    async fn all_ad_sets(&self) -> Result<Vec<ParsedObject>> {
        let campaigns = self.client.get_campaigns().await?;
        self.client.get_ad_sets(&campaigns).await?.into_result()
    }

    async fn insights_report<S: AsRef<str>>(
        &self,
        parents: &[ParsedObject],
        range: DateRange,
        columns: &[S],
    ) -> Result<ReportTable> {
        let fields: Vec<&str> = columns.iter().map(AsRef::as_ref).collect();
        let mut report = ReportTable::new(columns);

        for parent_id in object_ids(parents)? {
            let request = range.apply(
                GroupRequest::edge(parent_id, "insights").with_fields(fields.iter().copied()),
            );
            let insights = self
                .client
                .paginator()
                .fetch_one(&request, ObjectKind::Insights)
                .await?;
            report.append(ReportTable::from_records(&insights, columns))?;
        }

        info!(
            "Built insights report: {} rows from {} parents ({} to {})",
            report.len(),
            parents.len(),
            range.since,
            range.until
        );
        Ok(report)
    }
}
