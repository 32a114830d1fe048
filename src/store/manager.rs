use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::TripState;

/// Trip state file name in the data directory
const TRIP_FILE: &str = "trip.json";

/// Mirrors the trip state to a single JSON document on every mutation, and
/// handles export/import of the same document at arbitrary paths.
pub struct TripStore {
    data_dir: PathBuf,
}

impl TripStore {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn trip_path(&self) -> PathBuf {
        self.data_dir.join(TRIP_FILE)
    }

    /// Load the trip from disk. First run (no file yet) is `Ok(None)`.
    pub fn load(&self) -> Result<Option<TripState>> {
        let path = self.trip_path();
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read trip file: {}", path.display()))?;

        let mut trip: TripState = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse trip file: {}", path.display()))?;
        trip.normalize();

        Ok(Some(trip))
    }

    pub fn save(&self, trip: &TripState) -> Result<()> {
        let path = self.trip_path();
        let contents = serde_json::to_string_pretty(trip)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write trip file: {}", path.display()))?;
        debug!(expenses = trip.expenses.len(), days = trip.days.len(), "Trip saved");
        Ok(())
    }

    /// Write the trip to a caller-supplied path.
    pub fn export(&self, trip: &TripState, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(trip)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to export trip to {}", path.display()))?;
        Ok(())
    }

    /// Read a trip document from a caller-supplied path, make it the current
    /// trip and persist it. A file that does not parse leaves the stored
    /// state untouched.
    pub fn import(&self, path: &Path) -> Result<TripState> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read import file: {}", path.display()))?;

        let mut trip: TripState = serde_json::from_str(&contents)
            .with_context(|| format!("Not a valid trip document: {}", path.display()))?;
        trip.normalize();

        self.save(&trip)?;
        Ok(trip)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn store() -> (tempfile::TempDir, TripStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TripStore::new(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_first_run_has_no_trip() {
        let (_dir, store) = store();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, store) = store();
        let mut trip = TripState::new("PLN");
        trip.add_expense("Hostel", Category::Lodging, 350.0).unwrap();
        store.save(&trip).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.base_currency, "PLN");
        assert_eq!(loaded.expenses.len(), 1);
        assert_eq!(loaded.expenses[0].name, "Hostel");
    }

    #[test]
    fn test_import_normalizes_and_persists() {
        let (dir, store) = store();
        let import_path = dir.path().join("shared-trip.json");
        std::fs::write(
            &import_path,
            r#"{"baseCurrency":"PLN","currency":"EUR","people":0,
                "expenses":[{"id":"x1","name":"Bus","category":"Transport","baseAmount":12.0,"amount":2.8}]}"#,
        )
        .unwrap();

        let trip = store.import(&import_path).unwrap();
        assert_eq!(trip.people, 1);
        assert_eq!(trip.currency, "EUR");

        let reloaded = store.load().unwrap().unwrap();
        assert_eq!(reloaded.expenses.len(), 1);
    }

    #[test]
    fn test_import_garbage_leaves_state_untouched() {
        let (dir, store) = store();
        let mut trip = TripState::new("PLN");
        trip.add_expense("Hostel", Category::Lodging, 350.0).unwrap();
        store.save(&trip).unwrap();

        let bad_path = dir.path().join("bad.json");
        std::fs::write(&bad_path, "not json at all").unwrap();
        assert!(store.import(&bad_path).is_err());

        let reloaded = store.load().unwrap().unwrap();
        assert_eq!(reloaded.expenses.len(), 1);
    }

    #[test]
    fn test_export_round_trip() {
        let (dir, store) = store();
        let mut trip = TripState::new("PLN");
        trip.add_expense("Pierogi", Category::Food, 48.5).unwrap();

        let out = dir.path().join("out.json");
        store.export(&trip, &out).unwrap();

        let imported = store.import(&out).unwrap();
        assert_eq!(imported.expenses[0].name, "Pierogi");
        assert_eq!(imported.expenses[0].base_amount, 48.5);
    }
}
