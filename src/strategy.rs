//! Revenue and bonus strategies.
//!
//! The analysis does not hard-code how line revenue or seller bonuses are
//! computed. Callers inject both behaviors through the two traits below.
//! Plain closures with the matching signature implement them too.

use crate::models::{Item, Product, SellerAccumulator};
use serde::{Deserialize, Serialize};

/// Computes the revenue of one line item after discount.
///
/// Implementations must be pure. The aggregator does not check the sign or
/// magnitude of the returned value.
pub trait RevenueStrategy {
    fn revenue(&self, item: &Item, product: &Product) -> f64;
}

impl<F> RevenueStrategy for F
where
    F: Fn(&Item, &Product) -> f64,
{
    fn revenue(&self, item: &Item, product: &Product) -> f64 {
        self(item, product)
    }
}

/// Computes a seller's bonus from their 0-based rank after sorting by profit.
pub trait BonusStrategy {
    fn bonus(&self, rank: usize, total_sellers: usize, seller: &SellerAccumulator) -> f64;
}

impl<F> BonusStrategy for F
where
    F: Fn(usize, usize, &SellerAccumulator) -> f64,
{
    fn bonus(&self, rank: usize, total_sellers: usize, seller: &SellerAccumulator) -> f64 {
        self(rank, total_sellers, seller)
    }
}

/// Receipt price times quantity, minus the percentage discount.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRevenue;

impl RevenueStrategy for SimpleRevenue {
    fn revenue(&self, item: &Item, _product: &Product) -> f64 {
        let discount_factor = 1.0 - item.discount / 100.0;
        item.sale_price * item.quantity as f64 * discount_factor
    }
}

/// Share of profit paid out per rank tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusRates {
    /// Rank 0.
    pub first: f64,
    /// Ranks 1 and 2.
    pub runner_up: f64,
    /// The last rank.
    pub last: f64,
    /// Everyone else.
    pub other: f64,
}

impl Default for BonusRates {
    fn default() -> Self {
        Self {
            first: 0.15,
            runner_up: 0.10,
            last: 0.0,
            other: 0.05,
        }
    }
}

/// Tiered bonus as a share of the seller's profit.
///
/// Tiers are checked in a fixed order: first place, then second and third,
/// then last, then everyone else. With three or fewer sellers several tiers
/// overlap and the earlier check wins, so a lone seller gets the first-place
/// rate and the third of three gets the runner-up rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BonusByProfit {
    pub rates: BonusRates,
}

impl BonusByProfit {
    pub fn new(rates: BonusRates) -> Self {
        Self { rates }
    }

    /// Returns the rate applied at a rank.
    pub fn rate_for(&self, rank: usize, total_sellers: usize) -> f64 {
        if rank == 0 {
            self.rates.first
        } else if rank == 1 || rank == 2 {
            self.rates.runner_up
        } else if rank + 1 == total_sellers {
            self.rates.last
        } else {
            self.rates.other
        }
    }
}

impl BonusStrategy for BonusByProfit {
    fn bonus(&self, rank: usize, total_sellers: usize, seller: &SellerAccumulator) -> f64 {
        self.rate_for(rank, total_sellers) * seller.profit
    }
}
