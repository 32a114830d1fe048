mod format;

pub use format::{format_amount, format_date, format_money, truncate_string};
