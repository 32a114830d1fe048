use serde::{Deserialize, Serialize};

/// Expense category. The set is fixed; anything that doesn't fit goes in Other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    Transport,
    Lodging,
    Food,
    Attractions,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Transport,
        Category::Lodging,
        Category::Food,
        Category::Attractions,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Transport => "Transport",
            Category::Lodging => "Lodging",
            Category::Food => "Food",
            Category::Attractions => "Attractions",
            Category::Other => "Other",
        }
    }

    /// RGB display color for this category, shared by the donut and the lists.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Category::Transport => (0x00, 0xea, 0xff),
            Category::Lodging => (0x7b, 0x2f, 0xf7),
            Category::Food => (0x10, 0xb9, 0x81),
            Category::Attractions => (0xfb, 0x92, 0x3c),
            Category::Other => (0xf4, 0x3f, 0x5e),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single expense. `base_amount` is canonical and recorded in the trip's
/// base currency; `amount` is the derived value in the display currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    pub base_amount: f64,
    #[serde(default)]
    pub amount: f64,
}

impl Expense {
    pub fn new(name: &str, category: Category, base_amount: f64) -> Self {
        Self {
            id: super::new_id(),
            name: name.to_string(),
            category,
            base_amount,
            amount: base_amount,
        }
    }
}

// Sorting options for the expenses table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseSortColumn {
    #[default]
    Name,
    Category,
    Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_as_plain_string() {
        let json = serde_json::to_string(&Category::Attractions).unwrap();
        assert_eq!(json, "\"Attractions\"");
    }

    #[test]
    fn test_expense_wire_names_are_camel_case() {
        let expense = Expense::new("Museum tickets", Category::Attractions, 120.0);
        let json = serde_json::to_string(&expense).unwrap();
        assert!(json.contains("\"baseAmount\":120.0"));
        assert!(!json.contains("base_amount"));
    }

    #[test]
    fn test_expense_missing_display_amount_defaults() {
        // Older state files may predate the derived display amount.
        let json = r#"{"id":"abc1234","name":"Bus","category":"Transport","baseAmount":12.5}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.base_amount, 12.5);
        assert_eq!(expense.amount, 0.0);
    }
}
