//! Aggregations over the trip state: category totals, donut geometry,
//! budget progress and the per-person split.

use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::models::{Category, TripState};

/// Total display-currency spend for one category, with its share of the
/// grand total (0..=1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
    pub share: f64,
}

/// One donut slice. Angles are radians measured clockwise from 12 o'clock;
/// slice sweeps of a non-empty trip sum to a full circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutSlice {
    pub category: Category,
    pub total: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

/// Sum display amounts per category, largest first. Non-positive amounts are
/// skipped so a half-converted or hand-edited state file cannot produce
/// negative slices.
pub fn category_totals(trip: &TripState) -> Vec<CategoryTotal> {
    let mut sums: HashMap<Category, f64> = HashMap::new();
    for expense in &trip.expenses {
        if expense.amount > 0.0 {
            *sums.entry(expense.category).or_insert(0.0) += expense.amount;
        }
    }

    let grand_total: f64 = sums.values().sum();
    if grand_total <= 0.0 {
        return Vec::new();
    }

    let mut totals: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category,
            total,
            share: total / grand_total,
        })
        .collect();

    // Largest slice first; tie-break on the fixed category order so the
    // ordering is stable across redraws.
    totals.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                let pos = |c: Category| Category::ALL.iter().position(|x| *x == c).unwrap_or(0);
                pos(a.category).cmp(&pos(b.category))
            })
    });
    totals
}

/// Proportional arc slices for the donut, starting at 12 o'clock and sweeping
/// clockwise. Empty expense list yields no slices.
pub fn donut_slices(trip: &TripState) -> Vec<DonutSlice> {
    let totals = category_totals(trip);
    let mut angle = 0.0;

    totals
        .iter()
        .map(|t| {
            let sweep = t.share * TAU;
            let slice = DonutSlice {
                category: t.category,
                total: t.total,
                start_angle: angle,
                sweep,
            };
            angle += sweep;
            slice
        })
        .collect()
}

/// Spent fraction of the budget target, clamped to [0, 1].
/// No target means no meaningful progress, reported as 0.
pub fn budget_progress(trip: &TripState) -> f64 {
    if trip.budget_target <= 0.0 {
        return 0.0;
    }
    (trip.total() / trip.budget_target).clamp(0.0, 1.0)
}

/// Display-currency spend per traveller.
pub fn per_person(trip: &TripState) -> f64 {
    trip.total() / f64::from(trip.people.max(1))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn trip_with(amounts: &[(Category, f64)]) -> TripState {
        let mut trip = TripState::new("PLN");
        for (i, (category, amount)) in amounts.iter().enumerate() {
            trip.add_expense(&format!("e{}", i), *category, *amount).unwrap();
        }
        trip
    }

    #[test]
    fn test_category_totals_grouped_and_sorted() {
        let trip = trip_with(&[
            (Category::Food, 30.0),
            (Category::Transport, 100.0),
            (Category::Food, 20.0),
        ]);

        let totals = category_totals(&trip);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category, Category::Transport);
        assert!((totals[0].share - 100.0 / 150.0).abs() < 1e-9);
        assert_eq!(totals[1].category, Category::Food);
        assert!((totals[1].total - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_trip_has_no_slices() {
        let trip = TripState::new("PLN");
        assert!(category_totals(&trip).is_empty());
        assert!(donut_slices(&trip).is_empty());
    }

    #[test]
    fn test_donut_sweeps_cover_the_full_circle() {
        let trip = trip_with(&[
            (Category::Food, 10.0),
            (Category::Lodging, 25.0),
            (Category::Attractions, 65.0),
        ]);

        let slices = donut_slices(&trip);
        assert_eq!(slices.len(), 3);
        assert!((slices[0].start_angle).abs() < 1e-9);

        let total_sweep: f64 = slices.iter().map(|s| s.sweep).sum();
        assert!((total_sweep - TAU).abs() < 1e-9);

        // Slices tile: each starts where the previous one ended.
        assert!((slices[1].start_angle - slices[0].sweep).abs() < 1e-9);
        assert!((slices[2].start_angle - (slices[0].sweep + slices[1].sweep)).abs() < 1e-9);
    }

    #[test]
    fn test_budget_progress_caps_at_one() {
        let mut trip = trip_with(&[(Category::Food, 500.0)]);
        trip.set_budget_target_base(200.0).unwrap();
        trip.apply_rate(1.0);
        assert_eq!(budget_progress(&trip), 1.0);

        trip.set_budget_target_base(1000.0).unwrap();
        trip.apply_rate(1.0);
        assert!((budget_progress(&trip) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_budget_progress_without_target_is_zero() {
        let trip = trip_with(&[(Category::Food, 500.0)]);
        assert_eq!(budget_progress(&trip), 0.0);
    }

    #[test]
    fn test_per_person_split() {
        let mut trip = trip_with(&[(Category::Food, 90.0)]);
        trip.set_people(3);
        assert!((per_person(&trip) - 30.0).abs() < 1e-9);
    }
}
