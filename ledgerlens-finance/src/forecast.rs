//! Monthly spending forecast: a least-squares linear trend over monthly expense totals.

use ledgerlens_core::Category;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::normalize::NormalizedTransaction;
use crate::summary::YearMonth;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: YearMonth,
    pub amount: f64,
}

/// Spend magnitude per month, oldest first, with empty months in between filled as 0.
///
/// Without a category every expense-group row counts; with one, only that category's rows.
pub fn monthly_expense_series(
    txns: &[NormalizedTransaction],
    category: Option<Category>,
) -> Vec<MonthlyPoint> {
    let mut totals: BTreeMap<YearMonth, f64> = BTreeMap::new();
    for t in txns {
        let counted = match category {
            Some(c) => t.category == c,
            None => t.category.is_expense(),
        };
        if !counted {
            continue;
        }
        let Some(date) = t.transaction.date.resolved() else {
            continue;
        };
        *totals.entry(YearMonth::of(date)).or_insert(0.0) += t.signed_amount.abs();
    }

    let (Some(&first), Some(&last)) = (totals.keys().next(), totals.keys().next_back()) else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut month = first;
    while month <= last {
        series.push(MonthlyPoint {
            month,
            amount: totals.get(&month).copied().unwrap_or(0.0),
        });
        month = month.next();
    }
    series
}

/// Project `horizon` months past the end of `series` along its linear trend.
/// Projections never go below zero. An empty series yields no forecast.
pub fn forecast_monthly(series: &[MonthlyPoint], horizon: usize) -> Vec<MonthlyPoint> {
    let Some(last) = series.last() else {
        return Vec::new();
    };

    let n = series.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = series.iter().map(|p| p.amount).sum::<f64>() / n;

    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (i, p) in series.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxy += dx * (p.amount - mean_y);
        sxx += dx * dx;
    }
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = mean_y - slope * mean_x;

    let mut month = last.month;
    (1..=horizon)
        .map(|h| {
            month = month.next();
            let x = n - 1.0 + h as f64;
            MonthlyPoint {
                month,
                amount: (intercept + slope * x).max(0.0),
            }
        })
        .collect()
}

/// Memoizes forecasts keyed by the shape of the input data.
///
/// Entries live for the TTL; a changed row count, date span or amount total produces a
/// different key, so stale data is not served after new statements are imported.
#[derive(Debug)]
pub struct ForecastCache {
    ttl: Duration,
    entries: HashMap<u64, (Vec<MonthlyPoint>, Instant)>,
}

impl Default for ForecastCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl ForecastCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn key(txns: &[NormalizedTransaction], category: Option<Category>, horizon: usize) -> u64 {
        let dates = txns.iter().filter_map(|t| t.transaction.date.resolved());
        let first = dates.clone().min();
        let last = dates.max();
        let total: f64 = txns.iter().map(|t| t.signed_amount).sum();

        let mut hasher = DefaultHasher::new();
        txns.len().hash(&mut hasher);
        first.hash(&mut hasher);
        last.hash(&mut hasher);
        total.to_bits().hash(&mut hasher);
        horizon.hash(&mut hasher);
        category.hash(&mut hasher);
        hasher.finish()
    }

    pub fn forecast(
        &mut self,
        txns: &[NormalizedTransaction],
        category: Option<Category>,
        horizon: usize,
    ) -> Vec<MonthlyPoint> {
        self.forecast_at(txns, category, horizon, Instant::now())
    }

    pub fn forecast_at(
        &mut self,
        txns: &[NormalizedTransaction],
        category: Option<Category>,
        horizon: usize,
        now: Instant,
    ) -> Vec<MonthlyPoint> {
        let key = Self::key(txns, category, horizon);
        if let Some((points, expires)) = self.entries.get(&key) {
            if now < *expires {
                debug!(key, "forecast cache hit");
                return points.clone();
            }
        }

        debug!(key, "forecast cache miss");
        let points = forecast_monthly(&monthly_expense_series(txns, category), horizon);
        self.entries.insert(key, (points.clone(), now + self.ttl));
        points
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop expired entries.
    pub fn evict_expired(&mut self, now: Instant) {
        self.entries.retain(|_, (_, expires)| now < *expires);
    }
}
