use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Exchange rates keyed by ISO-4217 code, relative to one base currency.
pub type RateTable = HashMap<String, f64>;

/// Consider a rate table stale after 1 hour.
/// Retail exchange rates move slowly; an hour keeps conversions honest without
/// hammering the free rate APIs.
const RATES_STALE_MINUTES: i64 = 60;

/// One fetched rate table plus when it was fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedRates {
    pub base: String,
    pub rates: RateTable,
    pub fetched_at: DateTime<Utc>,
}

impl CachedRates {
    pub fn new(base: &str, rates: RateTable) -> Self {
        Self {
            base: base.to_uppercase(),
            rates,
            fetched_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        let now = Utc::now();
        (now - self.fetched_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew (negative ages)
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }

    pub fn is_stale(&self) -> bool {
        self.age_minutes() > RATES_STALE_MINUTES
    }

    /// Rate from the base currency to `code`. The base itself is always 1.
    pub fn rate_for(&self, code: &str) -> Option<f64> {
        let code = code.trim().to_uppercase();
        if code == self.base {
            return Some(1.0);
        }
        self.rates.get(&code).copied().filter(|r| r.is_finite() && *r > 0.0)
    }
}

/// On-disk rate cache: one JSON file per base currency under the cache dir.
#[derive(Clone)]
pub struct RateCache {
    cache_dir: PathBuf,
}

impl RateCache {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    fn cache_path(&self, base: &str) -> PathBuf {
        self.cache_dir.join(format!("rates_{}.json", base.to_uppercase()))
    }

    pub fn load(&self, base: &str) -> Result<Option<CachedRates>> {
        let path = self.cache_path(base);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read rate cache for {}", base))?;

        let cached: CachedRates = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse rate cache for {}", base))?;

        Ok(Some(cached))
    }

    pub fn save(&self, cached: &CachedRates) -> Result<()> {
        let path = self.cache_path(&cached.base);
        let contents = serde_json::to_string_pretty(cached)?;
        std::fs::write(&path, contents)?;
        debug!(base = %cached.base, rates = cached.rates.len(), "Rate cache written");
        Ok(())
    }

    /// Humanized age of the cached table for the status bar, if any.
    pub fn age_display(&self, base: &str) -> Option<String> {
        match self.load(base) {
            Ok(Some(cached)) => Some(cached.age_display()),
            Ok(None) => None,
            Err(e) => {
                debug!(base, error = %e, "Failed to load rate cache for age display");
                None
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_table() -> RateTable {
        let mut rates = RateTable::new();
        rates.insert("EUR".to_string(), 0.23);
        rates.insert("USD".to_string(), 0.25);
        rates
    }

    #[test]
    fn test_fresh_rates_are_not_stale() {
        let cached = CachedRates::new("PLN", sample_table());
        assert!(!cached.is_stale());
        assert_eq!(cached.age_display(), "just now");
    }

    #[test]
    fn test_rates_stale_after_an_hour() {
        let mut cached = CachedRates::new("PLN", sample_table());
        cached.fetched_at = Utc::now() - Duration::minutes(61);
        assert!(cached.is_stale());
        assert_eq!(cached.age_display(), "1h ago");
    }

    #[test]
    fn test_clock_skew_reads_as_just_now() {
        let mut cached = CachedRates::new("PLN", sample_table());
        cached.fetched_at = Utc::now() + Duration::minutes(30);
        assert!(!cached.is_stale());
        assert_eq!(cached.age_display(), "just now");
    }

    #[test]
    fn test_rate_for_base_is_identity_without_data() {
        let cached = CachedRates::new("PLN", RateTable::new());
        assert_eq!(cached.rate_for("pln"), Some(1.0));
        assert_eq!(cached.rate_for("EUR"), None);
    }

    #[test]
    fn test_rate_for_rejects_junk_rates() {
        let mut rates = sample_table();
        rates.insert("XAG".to_string(), 0.0);
        rates.insert("XXX".to_string(), f64::NAN);
        let cached = CachedRates::new("PLN", rates);
        assert_eq!(cached.rate_for("XAG"), None);
        assert_eq!(cached.rate_for("XXX"), None);
        assert_eq!(cached.rate_for("eur"), Some(0.23));
    }

    #[test]
    fn test_cache_round_trip_per_base() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RateCache::new(dir.path().to_path_buf()).unwrap();

        assert!(cache.load("PLN").unwrap().is_none());

        cache.save(&CachedRates::new("PLN", sample_table())).unwrap();
        cache.save(&CachedRates::new("EUR", RateTable::new())).unwrap();

        let loaded = cache.load("pln").unwrap().unwrap();
        assert_eq!(loaded.base, "PLN");
        assert_eq!(loaded.rates.len(), 2);

        let eur = cache.load("EUR").unwrap().unwrap();
        assert!(eur.rates.is_empty());
    }
}
