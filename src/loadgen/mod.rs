//! # Load Generator
//!
//! Drives synthetic shopper traffic through a [`StorefrontApi`] to exercise
//! the gateway and the services behind it.
//!
//! Every simulated user loops until the run's deadline (or its round budget):
//!
//! 1. list the catalog,
//! 2. look up one random product,
//! 3. with probability `error_rate`, look up a product id that does not exist,
//! 4. with probability `order_probability`, order 1 to `max_order_quantity`
//!    units of that product,
//! 5. pause for a random time between `min_pause` and `max_pause`.
//!
//! Failures are logged and counted; they never stop a user.

use crate::api::{ApiError, StorefrontApi};
use crate::model::{OrderRequest, ProductId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{error, info, info_span, warn, Instrument};

/// Product id no catalog is expected to contain; used for error probes.
pub const MISSING_PRODUCT_ID: u64 = 999_999;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadTestError {
    #[error("Invalid load test configuration: {0}")]
    InvalidConfig(String),

    #[error("Simulated user task failed: {0}")]
    UserTaskFailed(String),
}

#[derive(Debug, Clone)]
pub struct LoadTestConfig {
    pub users: usize,
    pub duration: Duration,
    /// Chance per round of probing [`MISSING_PRODUCT_ID`].
    pub error_rate: f64,
    /// Chance per round of placing an order.
    pub order_probability: f64,
    pub max_order_quantity: u32,
    pub min_pause: Duration,
    pub max_pause: Duration,
    /// Stop each user after this many rounds even if time remains.
    pub rounds: Option<u32>,
    /// Seed for reproducible runs. User `n` is seeded with `seed + n`.
    pub seed: Option<u64>,
}

impl Default for LoadTestConfig {
    fn default() -> Self {
        Self {
            users: 10,
            duration: Duration::from_secs(300),
            error_rate: 0.05,
            order_probability: 0.3,
            max_order_quantity: 5,
            min_pause: Duration::from_millis(100),
            max_pause: Duration::from_secs(2),
            rounds: None,
            seed: None,
        }
    }
}

impl LoadTestConfig {
    pub fn validate(&self) -> Result<(), LoadTestError> {
        let invalid =
            |msg: String| -> Result<(), LoadTestError> { Err(LoadTestError::InvalidConfig(msg)) };

        if self.users == 0 {
            return invalid("at least one user is required".to_string());
        }
        for (name, value) in [
            ("error_rate", self.error_rate),
            ("order_probability", self.order_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return invalid(format!("{name} must be within 0..=1, got {value}"));
            }
        }
        if self.max_order_quantity == 0 {
            return invalid("max_order_quantity must be at least 1".to_string());
        }
        if Instant::now().checked_add(self.duration).is_none() {
            return invalid(format!("duration {:?} is too long", self.duration));
        }
        if self.min_pause > self.max_pause {
            return invalid(format!(
                "min_pause {:?} exceeds max_pause {:?}",
                self.min_pause, self.max_pause
            ));
        }
        Ok(())
    }
}

/// Counters for one user, or summed over all users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficStats {
    pub rounds: u64,
    pub requests: u64,
    pub errors: u64,
    pub probes: u64,
    pub orders_placed: u64,
}

impl std::ops::AddAssign for TrafficStats {
    fn add_assign(&mut self, other: Self) {
        self.rounds += other.rounds;
        self.requests += other.requests;
        self.errors += other.errors;
        self.probes += other.probes;
        self.orders_placed += other.orders_placed;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub users: usize,
    pub elapsed: Duration,
    pub totals: TrafficStats,
}

impl Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} users, {:.1}s: {} rounds, {} requests, {} errors, {} probes, {} orders placed",
            self.users,
            self.elapsed.as_secs_f64(),
            self.totals.rounds,
            self.totals.requests,
            self.totals.errors,
            self.totals.probes,
            self.totals.orders_placed
        )
    }
}

/// Runs the configured number of users concurrently and sums their counters.
pub async fn run_load_test(
    api: Arc<dyn StorefrontApi>,
    config: LoadTestConfig,
) -> Result<LoadReport, LoadTestError> {
    config.validate()?;
    info!(
        users = config.users,
        duration = ?config.duration,
        "Starting load test"
    );

    let started = Instant::now();
    let deadline = started.checked_add(config.duration).ok_or_else(|| {
        LoadTestError::InvalidConfig(format!("duration {:?} is too long", config.duration))
    })?;
    let config = Arc::new(config);

    let mut users = JoinSet::new();
    for user in 0..config.users {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(user as u64)),
            None => StdRng::from_entropy(),
        };
        let span = info_span!("user", user = user + 1);
        users.spawn(simulate_user(api.clone(), config.clone(), rng, deadline).instrument(span));
    }

    let mut totals = TrafficStats::default();
    while let Some(joined) = users.join_next().await {
        match joined {
            Ok(stats) => totals += stats,
            Err(e) => return Err(LoadTestError::UserTaskFailed(e.to_string())),
        }
    }

    let report = LoadReport {
        users: config.users,
        elapsed: started.elapsed(),
        totals,
    };
    info!(%report, "Load test completed");
    Ok(report)
}

async fn simulate_user(
    api: Arc<dyn StorefrontApi>,
    config: Arc<LoadTestConfig>,
    mut rng: StdRng,
    deadline: Instant,
) -> TrafficStats {
    let mut stats = TrafficStats::default();

    while Instant::now() < deadline {
        if config.rounds.is_some_and(|rounds| stats.rounds >= u64::from(rounds)) {
            break;
        }
        stats.rounds += 1;

        if let Err(e) = shop_once(api.as_ref(), &config, &mut rng, &mut stats).await {
            stats.errors += 1;
            error!(error = %e, "Request error");
        }

        let pause = pause_between(&config, &mut rng);
        let wake = Instant::now().checked_add(pause).unwrap_or(deadline);
        tokio::time::sleep_until(wake.min(deadline)).await;
    }

    info!(requests = stats.requests, "User simulation completed");
    stats
}

/// One round of browsing and maybe buying.
async fn shop_once(
    api: &dyn StorefrontApi,
    config: &LoadTestConfig,
    rng: &mut StdRng,
    stats: &mut TrafficStats,
) -> Result<(), ApiError> {
    stats.requests += 1;
    let products = api.list_products().await?;

    let Some(product_id) = products.choose(rng).map(|product| product.id.clone()) else {
        warn!("No products found");
        return Ok(());
    };

    stats.requests += 1;
    api.get_product(&product_id).await?;

    if rng.gen_bool(config.error_rate) {
        stats.requests += 1;
        stats.probes += 1;
        // Expected to fail; only the gateway's handling of it matters.
        let _ = api.get_product(&ProductId::from(MISSING_PRODUCT_ID)).await;
    }

    if rng.gen_bool(config.order_probability) {
        let quantity = rng.gen_range(1..=config.max_order_quantity);
        stats.requests += 1;
        api.submit_order(OrderRequest::new(product_id, quantity)).await?;
        stats.orders_placed += 1;
    }

    Ok(())
}

fn pause_between(config: &LoadTestConfig, rng: &mut StdRng) -> Duration {
    let min = config.min_pause.as_millis() as u64;
    let max = config.max_pause.as_millis() as u64;
    Duration::from_millis(rng.gen_range(min..=max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::model::Product;

    fn quick(rounds: u32) -> LoadTestConfig {
        LoadTestConfig {
            users: 1,
            duration: Duration::from_secs(30),
            error_rate: 0.0,
            order_probability: 1.0,
            min_pause: Duration::ZERO,
            max_pause: Duration::ZERO,
            rounds: Some(rounds),
            seed: Some(7),
            ..LoadTestConfig::default()
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(LoadTestConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_out_of_range_rates() {
        let config = LoadTestConfig {
            error_rate: 1.5,
            ..LoadTestConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LoadTestError::InvalidConfig(msg)) if msg.contains("error_rate")
        ));

        let config = LoadTestConfig {
            users: 0,
            ..LoadTestConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_rejects_unbounded_duration() {
        let config = LoadTestConfig {
            duration: Duration::from_secs(u64::MAX),
            rounds: Some(0),
            ..LoadTestConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LoadTestError::InvalidConfig(msg)) if msg.contains("duration")
        ));

        let mock = MockApi::new();
        let outcome = run_load_test(Arc::new(mock.clone()), config).await;
        assert!(matches!(outcome, Err(LoadTestError::InvalidConfig(_))));
        assert_eq!(mock.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_single_round_browses_then_orders() {
        let mock = MockApi::new();
        let widget = Product::new(1u64, "Widget", 9.99);
        mock.expect_list_products().return_ok(vec![widget.clone()]);
        mock.expect_get_product().return_ok(widget.clone());
        mock.expect_submit_order().return_ok(None);

        let report = run_load_test(Arc::new(mock.clone()), quick(1)).await.unwrap();

        assert_eq!(report.totals.rounds, 1);
        assert_eq!(report.totals.requests, 3);
        assert_eq!(report.totals.errors, 0);
        assert_eq!(report.totals.orders_placed, 1);
        assert_eq!(mock.product_lookups(), vec![widget.id.clone()]);

        let orders = mock.submitted_orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].product_id, widget.id);
        assert!((1..=5).contains(&orders[0].quantity));
        mock.verify();
    }

    #[tokio::test]
    async fn test_failures_are_counted_not_fatal() {
        let mock = MockApi::new();
        mock.expect_list_products().return_err(ApiError::Status {
            status: 503,
            detail: Some("Service unavailable".to_string()),
        });
        mock.expect_list_products().return_ok(vec![]);

        let report = run_load_test(Arc::new(mock.clone()), quick(2)).await.unwrap();

        assert_eq!(report.totals.rounds, 2);
        assert_eq!(report.totals.requests, 2);
        assert_eq!(report.totals.errors, 1);
        assert_eq!(report.totals.orders_placed, 0);
        mock.verify();
    }
}
