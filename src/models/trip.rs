use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Category, Day, Expense, RouteSegment, TravelMode};

fn default_people() -> u32 {
    1
}

fn default_currency() -> String {
    crate::config::DEFAULT_BASE_CURRENCY.to_string()
}

/// The whole trip: expenses, itinerary days, route segments, budget and
/// headcount. All monetary `*_base` fields are canonical and recorded in
/// `base_currency`; the matching display fields are derived from them and the
/// last applied exchange rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripState {
    #[serde(default = "default_currency")]
    pub base_currency: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub days: Vec<Day>,
    #[serde(default)]
    pub segments: Vec<RouteSegment>,
    #[serde(default)]
    pub budget_target_base: f64,
    #[serde(default)]
    pub budget_target: f64,
    #[serde(default = "default_people")]
    pub people: u32,
}

impl Default for TripState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BASE_CURRENCY)
    }
}

impl TripState {
    pub fn new(base_currency: &str) -> Self {
        let base_currency = base_currency.trim().to_uppercase();
        Self {
            currency: base_currency.clone(),
            base_currency,
            expenses: Vec::new(),
            days: Vec::new(),
            segments: Vec::new(),
            budget_target_base: 0.0,
            budget_target: 0.0,
            people: 1,
        }
    }

    /// Repair invariants after deserializing: headcount at least one, display
    /// currency never empty, itinerary in date order.
    pub fn normalize(&mut self) {
        self.base_currency = self.base_currency.trim().to_uppercase();
        if self.base_currency.is_empty() {
            self.base_currency = crate::config::DEFAULT_BASE_CURRENCY.to_string();
        }
        self.currency = self.currency.trim().to_uppercase();
        if self.currency.is_empty() {
            self.currency = self.base_currency.clone();
        }
        self.people = self.people.max(1);
        self.days.sort_by_key(|d| d.date);
    }

    // ===== Expenses =====

    pub fn add_expense(&mut self, name: &str, category: Category, base_amount: f64) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Expense name required");
        }
        if !(base_amount > 0.0) {
            bail!("Amount must be a positive number");
        }
        self.expenses.push(Expense::new(name, category, base_amount));
        Ok(())
    }

    pub fn remove_expense(&mut self, id: &str) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        self.expenses.len() != before
    }

    /// Trip total in the display currency (expenses only; route segments
    /// are tracked separately)
    pub fn total(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Trip total in the base currency
    pub fn total_base(&self) -> f64 {
        self.expenses.iter().map(|e| e.base_amount).sum()
    }

    // ===== Itinerary =====

    pub fn add_day(&mut self, date: NaiveDate, title: &str, notes: Option<String>) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            bail!("Day title required");
        }
        self.days.push(Day::new(date, title, notes));
        self.days.sort_by_key(|d| d.date);
        Ok(())
    }

    pub fn remove_day(&mut self, id: &str) -> bool {
        let before = self.days.len();
        self.days.retain(|d| d.id != id);
        self.days.len() != before
    }

    // ===== Route =====

    pub fn add_segment(
        &mut self,
        from: &str,
        to: &str,
        mode: TravelMode,
        base_cost: f64,
    ) -> Result<()> {
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            bail!("Both ends of the segment are required");
        }
        if base_cost < 0.0 || base_cost.is_nan() {
            bail!("Segment cost must not be negative");
        }
        self.segments.push(RouteSegment::new(from, to, mode, base_cost));
        Ok(())
    }

    pub fn remove_segment(&mut self, id: &str) -> bool {
        let before = self.segments.len();
        self.segments.retain(|s| s.id != id);
        self.segments.len() != before
    }

    /// Combined cost of all route segments, display currency
    pub fn segments_total(&self) -> f64 {
        self.segments.iter().map(|s| s.cost).sum()
    }

    // ===== Budget & headcount =====

    /// Budget target is entered and recorded in the base currency.
    pub fn set_budget_target_base(&mut self, value: f64) -> Result<()> {
        if value < 0.0 || value.is_nan() {
            bail!("Budget must not be negative");
        }
        self.budget_target_base = value;
        Ok(())
    }

    pub fn set_people(&mut self, people: u32) {
        self.people = people.max(1);
    }

    // ===== Currency =====

    /// Recompute every display amount from its base value. Display values are
    /// never multiplied in place, so repeated application cannot drift.
    pub fn apply_rate(&mut self, rate: f64) {
        for expense in &mut self.expenses {
            expense.amount = expense.base_amount * rate;
        }
        for segment in &mut self.segments {
            segment.cost = segment.base_cost * rate;
        }
        self.budget_target = self.budget_target_base * rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trip() -> TripState {
        let mut trip = TripState::new("PLN");
        trip.add_expense("Train tickets", Category::Transport, 200.0).unwrap();
        trip.add_expense("Hostel", Category::Lodging, 350.0).unwrap();
        trip.add_expense("Pierogi", Category::Food, 48.5).unwrap();
        trip
    }

    #[test]
    fn test_add_expense_rejects_blank_name_and_bad_amounts() {
        let mut trip = TripState::new("PLN");
        assert!(trip.add_expense("   ", Category::Food, 10.0).is_err());
        assert!(trip.add_expense("Lunch", Category::Food, 0.0).is_err());
        assert!(trip.add_expense("Lunch", Category::Food, -5.0).is_err());
        assert!(trip.add_expense("Lunch", Category::Food, f64::NAN).is_err());
        assert!(trip.expenses.is_empty());
    }

    #[test]
    fn test_remove_expense_by_id() {
        let mut trip = sample_trip();
        let id = trip.expenses[1].id.clone();
        assert!(trip.remove_expense(&id));
        assert!(!trip.remove_expense(&id));
        assert_eq!(trip.expenses.len(), 2);
    }

    #[test]
    fn test_apply_rate_recomputes_from_base() {
        let mut trip = sample_trip();
        trip.set_budget_target_base(1000.0).unwrap();

        trip.apply_rate(0.25);
        trip.apply_rate(0.25); // applying twice must not compound
        assert!((trip.total() - 598.5 * 0.25).abs() < 1e-9);
        assert!((trip.budget_target - 250.0).abs() < 1e-9);

        trip.apply_rate(1.0);
        assert!((trip.total() - 598.5).abs() < 1e-9);
    }

    #[test]
    fn test_budget_edit_updates_display_value() {
        // Display values follow every base edit, not just currency switches.
        let mut trip = sample_trip();
        trip.apply_rate(0.5);
        trip.set_budget_target_base(800.0).unwrap();
        trip.apply_rate(0.5);
        assert!((trip.budget_target - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_days_stay_sorted_by_date() {
        let mut trip = TripState::new("PLN");
        let d2 = NaiveDate::from_ymd_opt(2026, 8, 15).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2026, 8, 14).unwrap();
        trip.add_day(d2, "Vienna", None).unwrap();
        trip.add_day(d1, "Krakow", None).unwrap();
        assert_eq!(trip.days[0].title, "Krakow");
        assert_eq!(trip.days[1].title, "Vienna");
    }

    #[test]
    fn test_normalize_repairs_hostile_state() {
        let json = r#"{"baseCurrency":"pln","currency":"","people":0}"#;
        let mut trip: TripState = serde_json::from_str(json).unwrap();
        trip.normalize();
        assert_eq!(trip.base_currency, "PLN");
        assert_eq!(trip.currency, "PLN");
        assert_eq!(trip.people, 1);
    }

    #[test]
    fn test_segment_costs_stay_out_of_the_expense_total() {
        let mut trip = sample_trip();
        trip.add_segment("Krakow", "Vienna", TravelMode::Train, 90.0).unwrap();
        assert!((trip.total_base() - 598.5).abs() < 1e-9);
        assert!((trip.segments_total() - 90.0).abs() < 1e-9);
    }
}
