use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One itinerary entry: what happens on a given day of the trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Day {
    pub fn new(date: NaiveDate, title: &str, notes: Option<String>) -> Self {
        Self {
            id: super::new_id(),
            date,
            title: title.to_string(),
            notes: notes.filter(|n| !n.trim().is_empty()),
        }
    }

    pub fn formatted_date(&self) -> String {
        self.date.format("%a %b %d, %Y").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TravelMode {
    #[default]
    Car,
    Train,
    Bus,
    Plane,
    Ferry,
    Walk,
}

impl TravelMode {
    pub const ALL: [TravelMode; 6] = [
        TravelMode::Car,
        TravelMode::Train,
        TravelMode::Bus,
        TravelMode::Plane,
        TravelMode::Ferry,
        TravelMode::Walk,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TravelMode::Car => "Car",
            TravelMode::Train => "Train",
            TravelMode::Bus => "Bus",
            TravelMode::Plane => "Plane",
            TravelMode::Ferry => "Ferry",
            TravelMode::Walk => "Walk",
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One leg of the route. Segment costs convert with the display currency but
/// stay separate from the expense total and the budget bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub mode: TravelMode,
    pub base_cost: f64,
    #[serde(default)]
    pub cost: f64,
}

impl RouteSegment {
    pub fn new(from: &str, to: &str, mode: TravelMode, base_cost: f64) -> Self {
        Self {
            id: super::new_id(),
            from: from.to_string(),
            to: to.to_string(),
            mode,
            base_cost,
            cost: base_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_blank_notes_dropped() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 14).unwrap();
        let day = Day::new(date, "Old town walk", Some("   ".to_string()));
        assert!(day.notes.is_none());
    }

    #[test]
    fn test_segment_wire_names_are_camel_case() {
        let segment = RouteSegment::new("Krakow", "Vienna", TravelMode::Train, 45.0);
        let json = serde_json::to_string(&segment).unwrap();
        assert!(json.contains("\"baseCost\":45.0"));
        assert!(!json.contains("base_cost"));
    }
}
