//! Shared limiter tests through the public API

#[cfg(test)]
mod tests {
    use crate::assert_elapsed_between;
    use figaro_rs::config::models::{RateLimitConfig, RateLimitStrategy};
    use figaro_rs::{FetchError, RateLimiter};
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_holders_share_one_budget() {
        let limiter = RateLimiter::new(RateLimitConfig::default());
        let start = Instant::now();

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move {
                    for _ in 0..100 {
                        limiter.acquire().await.unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_elapsed_between!(start.elapsed(), 20, 21);
        assert_eq!(limiter.stats().acquisitions, 300);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_window_strategy_from_config() {
        let limiter = RateLimiter::new(RateLimitConfig {
            max_calls: 5,
            period_secs: 2,
            strategy: RateLimitStrategy::FixedWindow,
            ..Default::default()
        });
        let start = Instant::now();

        for _ in 0..11 {
            limiter.acquire().await.unwrap();
        }

        assert_elapsed_between!(start.elapsed(), 4, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_limits_and_status() {
        let limiter = RateLimiter::with_limits(3, 5);
        assert_eq!(limiter.limit(), 3);
        assert_eq!(limiter.period(), Duration::from_secs(5));
        assert_eq!(limiter.cooldown(), Duration::from_secs(90));
        assert!(limiter.is_enabled());

        limiter.acquire_n(3).await.unwrap();
        let status = limiter.status();
        assert!(!status.allowed);
        assert_eq!(status.remaining, 0);
        assert_eq!(status.retry_after, Some(Duration::from_secs(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_is_configurable() {
        let limiter = RateLimiter::new(RateLimitConfig {
            cooldown_secs: 3,
            ..Default::default()
        });
        let start = Instant::now();
        let mut attempts = 0;

        let result = limiter
            .execute_with_retry(|| {
                attempts += 1;
                let first = attempts == 1;
                async move {
                    if first {
                        Err(FetchError::throttled(Some(4), "Application request limit reached"))
                    } else {
                        Ok(())
                    }
                }
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(attempts, 2);
        assert_elapsed_between!(start.elapsed(), 3, 4);
    }
}
