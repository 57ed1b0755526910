//! Grouped, paginated, rate-limited fetching

use super::schema::ObjectKind;
use super::types::{
    BatchEntry, FetchStats, GroupRequest, GroupedFetch, PageCursor, ParsedObject, RequestFailure,
};
use crate::config::models::{BatchConfig, FailurePolicy, MAX_CHUNK_SIZE};
use crate::core::rate_limiter::RateLimiter;
use crate::core::traits::BatchTransport;
use crate::utils::error::{FetchError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Walks batch responses and their cursor chains through a shared rate limiter
#[derive(Clone)]
pub struct BatchPaginator {
    transport: Arc<dyn BatchTransport>,
    limiter: RateLimiter,
    config: BatchConfig,
}

impl BatchPaginator {
    pub fn new(transport: Arc<dyn BatchTransport>, limiter: RateLimiter, config: BatchConfig) -> Self {
        Self {
            transport,
            limiter,
            config,
        }
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Fetch one request per parent in chunks of the configured size
    pub async fn fetch_grouped<P, F>(
        &self,
        parents: &[P],
        kind: ObjectKind,
        build: F,
    ) -> Result<GroupedFetch>
    where
        F: Fn(&P) -> GroupRequest,
    {
        self.fetch_grouped_with_chunk_size(parents, self.config.chunk_size, kind, build)
            .await
    }

    /// Fetch one request per parent in chunks of `chunk_size`
    pub async fn fetch_grouped_with_chunk_size<P, F>(
        &self,
        parents: &[P],
        chunk_size: usize,
        kind: ObjectKind,
        build: F,
    ) -> Result<GroupedFetch>
    where
        F: Fn(&P) -> GroupRequest,
    {
        if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
            return Err(FetchError::config(format!(
                "chunk_size must be between 1 and {}, got {}",
                MAX_CHUNK_SIZE, chunk_size
            )));
        }

        let mut fetch = GroupedFetch::default();
        if parents.is_empty() {
            return Ok(fetch);
        }

        for chunk in parents.chunks(chunk_size) {
            let requests: Vec<GroupRequest> = chunk.iter().map(&build).collect();
            fetch.stats.requests += requests.len();

            let cost = self.config.batch_cost(requests.len());
            let entries = self
                .limiter
                .execute_weighted(cost, || self.transport.submit_batch(&requests))
                .await?;
            fetch.stats.batches_submitted += 1;

            let mut entries = correlate(&requests, entries);
            self.retry_throttled(&mut entries, &mut fetch.stats).await?;

            for entry in entries {
                let BatchEntry {
                    request, outcome, ..
                } = entry;

                let (objects, error) = match outcome {
                    Ok(first) => {
                        let params = request.follow_up_params();
                        self.walk(first, kind, &params, &mut fetch.stats).await
                    }
                    Err(e) => (Vec::new(), Some(e)),
                };

                match error {
                    None => fetch.objects.extend(objects),
                    Some(error) => {
                        if self.config.failure_policy == FailurePolicy::FailFast {
                            return Err(error);
                        }
                        warn!(
                            error_type = error.error_type(),
                            "Request {} failed after {} objects: {}",
                            request.relative_path(),
                            objects.len(),
                            error
                        );
                        fetch.failures.push(RequestFailure {
                            request,
                            error,
                            recovered: objects,
                        });
                    }
                }
            }
        }

        info!(
            "Grouped fetch: {} objects from {} requests in {} batches ({} follow-up pages, {} failed)",
            fetch.objects.len(),
            fetch.stats.requests,
            fetch.stats.batches_submitted,
            fetch.stats.pages_fetched,
            fetch.failures.len()
        );
        Ok(fetch)
    }

    /// Single non-batched request, following every page
    pub async fn fetch_one(&self, request: &GroupRequest, kind: ObjectKind) -> Result<Vec<ParsedObject>> {
        let url = self.transport.resolve_url(request);
        let params = request.query_params();

        let first = self
            .limiter
            .execute_with_retry(|| self.transport.fetch_page(&url, &params))
            .await?;

        let mut stats = FetchStats {
            requests: 1,
            ..Default::default()
        };
        let follow_up = request.follow_up_params();
        let (objects, error) = self.walk(first, kind, &follow_up, &mut stats).await;
        if let Some(error) = error {
            return Err(error);
        }

        debug!(
            "Fetched {} objects from {} over {} pages",
            objects.len(),
            request.relative_path(),
            stats.pages_parsed
        );
        Ok(objects)
    }

    /// Single request expected to return exactly one object
    pub async fn fetch_one_object(&self, request: &GroupRequest, kind: ObjectKind) -> Result<ParsedObject> {
        let mut objects = self.fetch_one(request, kind).await?;
        if objects.len() != 1 {
            return Err(FetchError::parse(format!(
                "expected one object from {}, got {}",
                request.relative_path(),
                objects.len()
            )));
        }
        Ok(objects.remove(0))
    }

    /// Resubmit the throttled entries of a batch once, after a single cooldown.
    /// A sub-request throttled again keeps its error.
    async fn retry_throttled(&self, entries: &mut [BatchEntry], stats: &mut FetchStats) -> Result<()> {
        let throttled: Vec<usize> = entries
            .iter()
            .filter(|entry| matches!(&entry.outcome, Err(e) if e.is_throttled()))
            .map(|entry| entry.index)
            .collect();
        let Some(&first) = throttled.first() else {
            return Ok(());
        };

        let retry: Vec<GroupRequest> = throttled
            .iter()
            .map(|&index| entries[index].request.clone())
            .collect();
        debug!("Resubmitting {} throttled requests", retry.len());

        if let Err(cause) = &entries[first].outcome {
            self.limiter.cool_down(cause).await;
        }
        self.limiter
            .acquire_n(self.config.batch_cost(retry.len()))
            .await?;
        let retried = self.transport.submit_batch(&retry).await?;
        stats.batches_submitted += 1;

        for (entry, &index) in correlate(&retry, retried).into_iter().zip(&throttled) {
            entries[index].outcome = entry.outcome;
        }
        Ok(())
    }

    /// Parse `first` and every page after it, resending `params` with each
    /// follow-up; returns what was parsed and the error that stopped the walk, if any
    async fn walk(
        &self,
        first: PageCursor,
        kind: ObjectKind,
        params: &[(String, String)],
        stats: &mut FetchStats,
    ) -> (Vec<ParsedObject>, Option<FetchError>) {
        let mut objects = Vec::new();
        let mut cursor = first;

        loop {
            match kind.parse_page(&cursor.page) {
                Ok(page_objects) => {
                    stats.pages_parsed += 1;
                    objects.extend(page_objects);
                }
                Err(e) => return (objects, Some(e)),
            }

            let Some(next) = cursor.next_url.take() else {
                break;
            };

            debug!("Following page cursor: {}", next);
            match self
                .limiter
                .execute_with_retry(|| self.transport.fetch_page(&next, params))
                .await
            {
                Ok(page) => {
                    stats.pages_fetched += 1;
                    cursor = page;
                }
                Err(e) => return (objects, Some(e)),
            }
        }

        (objects, None)
    }
}

/// Order entries by submitted index; a request with no entry fails with "no response"
fn correlate(requests: &[GroupRequest], entries: Vec<BatchEntry>) -> Vec<BatchEntry> {
    let mut slots: Vec<Option<BatchEntry>> = requests.iter().map(|_| None).collect();

    for entry in entries {
        let index = entry.index;
        match slots.get_mut(index) {
            Some(slot) if slot.is_none() => *slot = Some(entry),
            Some(_) => warn!("Duplicate batch entry for index {}", index),
            None => warn!(
                "Batch entry index {} outside the {} submitted requests",
                index,
                requests.len()
            ),
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| BatchEntry {
                index,
                request: requests[index].clone(),
                outcome: Err(FetchError::request(None, "no response for request in batch")),
            })
        })
        .collect()
}
