//! Application state management for triptally.
//!
//! The `App` struct owns the trip state, the services around it (store, rate
//! cache, rate client) and all UI state. Rate fetches run as background tasks
//! and report back through an MPSC channel drained once per event-loop tick.

use anyhow::Result;
use chrono::NaiveDate;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{Category, Expense, ExpenseSortColumn, TravelMode, TripState};
use crate::rates::{CachedRates, RateCache, RateClient, RateError};
use crate::store::TripStore;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// Rate refreshes produce a single message each; 8 leaves headroom.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Maximum length for text inputs (names, places, titles).
pub const MAX_TEXT_LENGTH: usize = 40;

/// Maximum length for free-form notes.
pub const MAX_NOTES_LENGTH: usize = 120;

/// Maximum length for numeric inputs (amounts, headcount).
pub const MAX_AMOUNT_LENGTH: usize = 12;

/// Check if a character can be added to a text field
pub fn can_add_text_char(current_len: usize, c: char) -> bool {
    current_len < MAX_TEXT_LENGTH && !c.is_control()
}

/// Check if a character can be added to a notes field
pub fn can_add_notes_char(current_len: usize, c: char) -> bool {
    current_len < MAX_NOTES_LENGTH && !c.is_control()
}

/// Check if a character can be added to an amount field
pub fn can_add_amount_char(current_len: usize, c: char) -> bool {
    current_len < MAX_AMOUNT_LENGTH && (c.is_ascii_digit() || c == '.' || c == ',')
}

/// Check if a character can be added to a date field (YYYY-MM-DD)
pub fn can_add_date_char(current_len: usize, c: char) -> bool {
    current_len < 10 && (c.is_ascii_digit() || c == '-')
}

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Expenses,
    Itinerary,
    Route,
    Summary,
}

impl Tab {
    /// Get the display title for this tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Expenses => "Expenses",
            Tab::Itinerary => "Itinerary",
            Tab::Route => "Route",
            Tab::Summary => "Summary",
        }
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Expenses => Tab::Itinerary,
            Tab::Itinerary => Tab::Route,
            Tab::Route => Tab::Summary,
            Tab::Summary => Tab::Expenses,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Expenses => Tab::Summary,
            Tab::Itinerary => Tab::Expenses,
            Tab::Route => Tab::Itinerary,
            Tab::Summary => Tab::Route,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    AddingExpense,
    AddingDay,
    AddingSegment,
    EditingBudget,
    EditingPeople,
    PickingCurrency,
    ConfirmingQuit,
    Quitting,
}

/// Expense form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpenseFormFocus {
    Name,
    Amount,
    Category,
    Submit,
}

/// Itinerary day form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayFormFocus {
    Date,
    Title,
    Notes,
    Submit,
}

/// Route segment form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentFormFocus {
    From,
    To,
    Mode,
    Cost,
    Submit,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Result types from background rate fetches, sent through an MPSC channel
/// back to the main application.
enum RefreshResult {
    /// A rate table for the trip's base currency (fresh or stale-but-served)
    Rates(CachedRates),
    /// Both rate sources failed with no cached table to fall back on
    RatesFailed(String),
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub store: TripStore,
    pub rate_client: RateClient,
    pub rate_cache: RateCache,

    // The trip itself
    pub trip: TripState,

    // Last applied exchange rate (base -> display currency).
    // None while a non-base currency is shown and no table is available yet.
    current_rate: Option<f64>,

    // UI State
    pub state: AppState,
    pub current_tab: Tab,
    pub expense_sort_column: ExpenseSortColumn,
    pub expense_sort_ascending: bool,

    // Selection indices
    pub expense_selection: usize,
    pub day_selection: usize,
    pub segment_selection: usize,
    pub currency_selection: usize,

    // Expense form state
    pub form_name: String,
    pub form_amount: String,
    pub form_category_idx: usize,
    pub expense_form_focus: ExpenseFormFocus,

    // Day form state
    pub form_date: String,
    pub form_title: String,
    pub form_notes: String,
    pub day_form_focus: DayFormFocus,

    // Segment form state
    pub form_from: String,
    pub form_to: String,
    pub form_mode_idx: usize,
    pub form_cost: String,
    pub segment_form_focus: SegmentFormFocus,

    // Shared single-line input (budget / people overlays)
    pub input_buffer: String,

    // Error shown inside the active form overlay
    pub form_error: Option<String>,

    // Background task channel
    refresh_rx: Option<mpsc::Receiver<RefreshResult>>,
    refresh_tx: mpsc::Sender<RefreshResult>,

    // Currency waiting for a rate table, applied when the fetch lands
    pending_currency: Option<String>,
    pub fetching_rates: bool,

    // Status bar state
    pub status_message: Option<String>,
    pub rates_age: Option<String>,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        debug!("App::new() starting");
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };
        debug!(base = %config.base_currency, "Config loaded");

        let data_dir = config.data_dir()?;
        let store = TripStore::new(data_dir)?;

        let trip = match store.load() {
            Ok(Some(trip)) => trip,
            Ok(None) => {
                info!(base = %config.base_currency, "No trip file yet, starting fresh");
                TripState::new(&config.base_currency)
            }
            Err(e) => {
                warn!(error = %e, "Unreadable trip file, starting fresh");
                TripState::new(&config.base_currency)
            }
        };

        let cache_dir = config.cache_dir()?;
        let rate_cache = RateCache::new(cache_dir)?;
        let rate_client = RateClient::new()?;

        let rates_age = rate_cache.age_display(&trip.base_currency);

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Ok(Self {
            config,
            store,
            rate_client,
            rate_cache,
            trip,
            current_rate: None,

            state: AppState::Normal,
            current_tab: Tab::Expenses,
            expense_sort_column: ExpenseSortColumn::default(),
            expense_sort_ascending: true,

            expense_selection: 0,
            day_selection: 0,
            segment_selection: 0,
            currency_selection: 0,

            form_name: String::new(),
            form_amount: String::new(),
            form_category_idx: 0,
            expense_form_focus: ExpenseFormFocus::Name,

            form_date: String::new(),
            form_title: String::new(),
            form_notes: String::new(),
            day_form_focus: DayFormFocus::Date,

            form_from: String::new(),
            form_to: String::new(),
            form_mode_idx: 0,
            form_cost: String::new(),
            segment_form_focus: SegmentFormFocus::From,

            input_buffer: String::new(),
            form_error: None,

            refresh_rx: Some(rx),
            refresh_tx: tx,
            pending_currency: None,
            fetching_rates: false,

            status_message: None,
            rates_age,
        })
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Mirror the trip to disk; persistence failures surface in the status
    /// bar rather than crashing the UI.
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.trip) {
            warn!(error = %e, "Failed to save trip");
            self.status_message = Some(format!("Save failed: {}", e));
        }
    }

    // =========================================================================
    // Currency
    // =========================================================================

    /// Re-derive display amounts on startup. The base currency needs no rate;
    /// anything else is served from the cached table when possible, with a
    /// background fetch when the cache is stale or cold.
    pub fn refresh_display_amounts(&mut self) {
        if self.trip.currency == self.trip.base_currency {
            self.current_rate = Some(1.0);
            self.trip.apply_rate(1.0);
            self.persist();
            return;
        }

        match self.rate_cache.load(&self.trip.base_currency) {
            Ok(Some(cached)) => {
                if let Some(rate) = cached.rate_for(&self.trip.currency) {
                    self.current_rate = Some(rate);
                    self.trip.apply_rate(rate);
                    self.persist();
                }
                if cached.is_stale() {
                    self.pending_currency = Some(self.trip.currency.clone());
                    self.spawn_rates_fetch();
                }
            }
            _ => {
                self.pending_currency = Some(self.trip.currency.clone());
                self.spawn_rates_fetch();
            }
        }
    }

    /// Switch the display currency. Switching to the base currency is free;
    /// anything else goes through the rate cache / remote sources.
    pub fn request_currency(&mut self, target: &str) {
        let target = target.trim().to_uppercase();
        if target == self.trip.currency {
            return;
        }

        if target == self.trip.base_currency {
            // Any in-flight fetch is now only a cache warm-up
            self.pending_currency = None;
            self.trip.currency = target;
            self.current_rate = Some(1.0);
            self.trip.apply_rate(1.0);
            self.persist();
            self.status_message = Some(format!("Showing {}", self.trip.currency));
            return;
        }

        // Fresh cache answers immediately, no spinner
        if let Ok(Some(cached)) = self.rate_cache.load(&self.trip.base_currency) {
            if !cached.is_stale() {
                self.apply_rates(cached, target);
                return;
            }
        }

        self.pending_currency = Some(target);
        self.spawn_rates_fetch();
    }

    /// Force a refetch of the rate table (the `u` key).
    pub fn refresh_rates(&mut self) {
        if self.trip.currency != self.trip.base_currency {
            self.pending_currency = Some(self.trip.currency.clone());
        }
        self.spawn_rates_fetch();
    }

    fn spawn_rates_fetch(&mut self) {
        if self.fetching_rates {
            // A fetch is already in flight; the pending currency was updated
            // and will be applied when it lands.
            return;
        }
        self.fetching_rates = true;
        self.status_message = Some("Fetching exchange rates...".to_string());

        let client = self.rate_client.clone();
        let cache = self.rate_cache.clone();
        let base = self.trip.base_currency.clone();
        let tx = self.refresh_tx.clone();

        tokio::spawn(async move {
            let result = match client.rates_for(&cache, &base).await {
                Ok(cached) => RefreshResult::Rates(cached),
                Err(e) => RefreshResult::RatesFailed(e.to_string()),
            };
            if tx.send(result).await.is_err() {
                warn!("Rate refresh channel closed before result could be delivered");
            }
        });
    }

    /// Apply a fetched table to the pending (or given) currency switch.
    fn apply_rates(&mut self, cached: CachedRates, target: String) {
        self.rates_age = Some(cached.age_display());
        match cached.rate_for(&target) {
            Some(rate) => {
                self.trip.currency = target;
                self.current_rate = Some(rate);
                self.trip.apply_rate(rate);
                self.persist();
                self.status_message = Some(format!(
                    "Showing {} (rates {})",
                    self.trip.currency,
                    cached.age_display()
                ));
            }
            None => {
                warn!(currency = %target, "Requested currency missing from rate table");
                self.status_message = Some(RateError::UnknownCurrency(target).to_string());
            }
        }
    }

    /// Check for completed background tasks
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        if let Some(rx) = &mut self.refresh_rx {
            while let Ok(result) = rx.try_recv() {
                results.push(result);
            }
        }

        for result in results {
            match result {
                RefreshResult::Rates(cached) => {
                    self.fetching_rates = false;
                    self.rates_age = Some(cached.age_display());
                    if let Some(target) = self.pending_currency.take() {
                        self.apply_rates(cached, target);
                    } else {
                        self.status_message = Some("Exchange rates updated".to_string());
                    }
                }
                RefreshResult::RatesFailed(msg) => {
                    self.fetching_rates = false;
                    self.pending_currency = None;
                    self.status_message = Some(format!("Rate fetch failed: {}", msg));
                }
            }
        }
    }

    /// Re-derive display amounts after a base-value edit. With no table yet
    /// (offline, cold cache) the stored display values are left alone; the
    /// pending fetch will repair them.
    fn reapply_rate(&mut self) {
        if let Some(rate) = self.current_rate {
            self.trip.apply_rate(rate);
        }
    }

    // =========================================================================
    // Mutations (driven by the form overlays)
    // =========================================================================

    fn parse_amount(input: &str) -> Option<f64> {
        input.trim().replace(',', ".").parse::<f64>().ok()
    }

    /// Submit the expense form. Returns false (keeping the form open, with
    /// `form_error` set) when validation fails.
    pub fn submit_expense_form(&mut self) -> bool {
        let Some(amount) = Self::parse_amount(&self.form_amount) else {
            self.form_error = Some("Amount must be a number".to_string());
            return false;
        };
        let category = Category::ALL[self.form_category_idx % Category::ALL.len()];
        let name = self.form_name.clone();

        if let Err(e) = self.trip.add_expense(&name, category, amount) {
            self.form_error = Some(e.to_string());
            return false;
        }

        self.reapply_rate();
        self.persist();
        self.expense_selection = self.trip.expenses.len().saturating_sub(1);
        self.status_message = Some(format!("Added expense: {}", name.trim()));
        self.reset_forms();
        self.state = AppState::Normal;
        true
    }

    pub fn submit_day_form(&mut self) -> bool {
        let Ok(date) = NaiveDate::parse_from_str(self.form_date.trim(), "%Y-%m-%d") else {
            self.form_error = Some("Date must be YYYY-MM-DD".to_string());
            return false;
        };
        let title = self.form_title.clone();
        let notes = if self.form_notes.trim().is_empty() {
            None
        } else {
            Some(self.form_notes.clone())
        };

        if let Err(e) = self.trip.add_day(date, &title, notes) {
            self.form_error = Some(e.to_string());
            return false;
        }

        self.persist();
        self.day_selection = self
            .trip
            .days
            .iter()
            .position(|d| d.date == date)
            .unwrap_or(0);
        self.status_message = Some(format!("Added day: {}", title.trim()));
        self.reset_forms();
        self.state = AppState::Normal;
        true
    }

    pub fn submit_segment_form(&mut self) -> bool {
        let cost = if self.form_cost.trim().is_empty() {
            0.0
        } else {
            match Self::parse_amount(&self.form_cost) {
                Some(v) => v,
                None => {
                    self.form_error = Some("Cost must be a number".to_string());
                    return false;
                }
            }
        };
        let mode = TravelMode::ALL[self.form_mode_idx % TravelMode::ALL.len()];
        let (from, to) = (self.form_from.clone(), self.form_to.clone());

        if let Err(e) = self.trip.add_segment(&from, &to, mode, cost) {
            self.form_error = Some(e.to_string());
            return false;
        }

        self.reapply_rate();
        self.persist();
        self.segment_selection = self.trip.segments.len().saturating_sub(1);
        self.status_message = Some(format!("Added segment: {} -> {}", from.trim(), to.trim()));
        self.reset_forms();
        self.state = AppState::Normal;
        true
    }

    /// Budget is entered in the base currency.
    pub fn submit_budget(&mut self) -> bool {
        let Some(value) = Self::parse_amount(&self.input_buffer) else {
            self.form_error = Some("Budget must be a number".to_string());
            return false;
        };
        if let Err(e) = self.trip.set_budget_target_base(value) {
            self.form_error = Some(e.to_string());
            return false;
        }

        self.reapply_rate();
        self.persist();
        self.status_message = Some("Budget updated".to_string());
        self.reset_forms();
        self.state = AppState::Normal;
        true
    }

    pub fn submit_people(&mut self) -> bool {
        let Ok(people) = self.input_buffer.trim().parse::<u32>() else {
            self.form_error = Some("People must be a whole number".to_string());
            return false;
        };
        self.trip.set_people(people);
        self.persist();
        self.status_message = Some(format!("Splitting between {}", self.trip.people));
        self.reset_forms();
        self.state = AppState::Normal;
        true
    }

    pub fn delete_selected_expense(&mut self) {
        let id = self
            .get_sorted_expenses()
            .get(self.expense_selection)
            .map(|e| e.id.clone());
        if let Some(id) = id {
            if self.trip.remove_expense(&id) {
                self.persist();
                self.status_message = Some("Expense removed".to_string());
            }
        }
        self.clamp_selections();
    }

    pub fn delete_selected_day(&mut self) {
        let id = self.trip.days.get(self.day_selection).map(|d| d.id.clone());
        if let Some(id) = id {
            if self.trip.remove_day(&id) {
                self.persist();
                self.status_message = Some("Day removed".to_string());
            }
        }
        self.clamp_selections();
    }

    pub fn delete_selected_segment(&mut self) {
        let id = self
            .trip
            .segments
            .get(self.segment_selection)
            .map(|s| s.id.clone());
        if let Some(id) = id {
            if self.trip.remove_segment(&id) {
                self.persist();
                self.status_message = Some("Segment removed".to_string());
            }
        }
        self.clamp_selections();
    }

    // =========================================================================
    // Views & selection
    // =========================================================================

    /// Expenses in the current sort order for the table view.
    pub fn get_sorted_expenses(&self) -> Vec<&Expense> {
        let mut expenses: Vec<&Expense> = self.trip.expenses.iter().collect();
        expenses.sort_by(|a, b| {
            let ordering = match self.expense_sort_column {
                ExpenseSortColumn::Name => {
                    a.name.to_lowercase().cmp(&b.name.to_lowercase())
                }
                ExpenseSortColumn::Category => a
                    .category
                    .label()
                    .cmp(b.category.label())
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
                ExpenseSortColumn::Amount => a
                    .amount
                    .partial_cmp(&b.amount)
                    .unwrap_or(std::cmp::Ordering::Equal),
            };
            if self.expense_sort_ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
        expenses
    }

    pub fn toggle_expense_sort(&mut self, column: ExpenseSortColumn) {
        if self.expense_sort_column == column {
            self.expense_sort_ascending = !self.expense_sort_ascending;
        } else {
            self.expense_sort_column = column;
            self.expense_sort_ascending = true;
        }
    }

    /// Length of the list on the current tab
    fn current_list_len(&self) -> usize {
        match self.current_tab {
            Tab::Expenses => self.trip.expenses.len(),
            Tab::Itinerary => self.trip.days.len(),
            Tab::Route => self.trip.segments.len(),
            Tab::Summary => 0,
        }
    }

    fn current_selection_mut(&mut self) -> Option<&mut usize> {
        match self.current_tab {
            Tab::Expenses => Some(&mut self.expense_selection),
            Tab::Itinerary => Some(&mut self.day_selection),
            Tab::Route => Some(&mut self.segment_selection),
            Tab::Summary => None,
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.current_list_len();
        if len == 0 {
            return;
        }
        if let Some(selection) = self.current_selection_mut() {
            let current = *selection as isize;
            *selection = (current + delta).clamp(0, len as isize - 1) as usize;
        }
    }

    pub fn select_first(&mut self) {
        if let Some(selection) = self.current_selection_mut() {
            *selection = 0;
        }
    }

    pub fn select_last(&mut self) {
        let len = self.current_list_len();
        if let Some(selection) = self.current_selection_mut() {
            *selection = len.saturating_sub(1);
        }
    }

    fn clamp_selections(&mut self) {
        self.expense_selection = self
            .expense_selection
            .min(self.trip.expenses.len().saturating_sub(1));
        self.day_selection = self.day_selection.min(self.trip.days.len().saturating_sub(1));
        self.segment_selection = self
            .segment_selection
            .min(self.trip.segments.len().saturating_sub(1));
    }

    // =========================================================================
    // Overlay entry points
    // =========================================================================

    pub fn start_expense_form(&mut self) {
        self.reset_forms();
        self.state = AppState::AddingExpense;
        self.expense_form_focus = ExpenseFormFocus::Name;
    }

    pub fn start_day_form(&mut self) {
        self.reset_forms();
        self.state = AppState::AddingDay;
        self.day_form_focus = DayFormFocus::Date;
        // Prefill with the day after the last planned one
        if let Some(last) = self.trip.days.last() {
            if let Some(next) = last.date.succ_opt() {
                self.form_date = next.format("%Y-%m-%d").to_string();
            }
        }
    }

    pub fn start_segment_form(&mut self) {
        self.reset_forms();
        self.state = AppState::AddingSegment;
        self.segment_form_focus = SegmentFormFocus::From;
        // Chain from the previous segment's destination
        if let Some(last) = self.trip.segments.last() {
            self.form_from = last.to.clone();
        }
    }

    pub fn start_budget_edit(&mut self) {
        self.reset_forms();
        self.state = AppState::EditingBudget;
        if self.trip.budget_target_base > 0.0 {
            self.input_buffer = format!("{:.2}", self.trip.budget_target_base);
        }
    }

    pub fn start_people_edit(&mut self) {
        self.reset_forms();
        self.state = AppState::EditingPeople;
        self.input_buffer = self.trip.people.to_string();
    }

    pub fn start_currency_picker(&mut self) {
        self.reset_forms();
        self.state = AppState::PickingCurrency;
        let choices = self.currency_choices();
        self.currency_selection = choices
            .iter()
            .position(|c| *c == self.trip.currency)
            .unwrap_or(0);
    }

    /// Currencies offered by the picker
    pub fn currency_choices(&self) -> Vec<String> {
        let mut choices = self.config.currency_choices();
        if !choices.contains(&self.trip.base_currency) {
            choices.insert(0, self.trip.base_currency.clone());
        }
        choices
    }

    pub fn reset_forms(&mut self) {
        self.form_name.clear();
        self.form_amount.clear();
        self.form_category_idx = 0;
        self.form_date.clear();
        self.form_title.clear();
        self.form_notes.clear();
        self.form_from.clear();
        self.form_to.clear();
        self.form_mode_idx = 0;
        self.form_cost.clear();
        self.input_buffer.clear();
        self.form_error = None;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Tab Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_tab_next() {
        assert_eq!(Tab::Expenses.next(), Tab::Itinerary);
        assert_eq!(Tab::Itinerary.next(), Tab::Route);
        assert_eq!(Tab::Route.next(), Tab::Summary);
        assert_eq!(Tab::Summary.next(), Tab::Expenses); // Wraps around
    }

    #[test]
    fn test_tab_prev() {
        assert_eq!(Tab::Expenses.prev(), Tab::Summary); // Wraps around
        assert_eq!(Tab::Summary.prev(), Tab::Route);
        assert_eq!(Tab::Route.prev(), Tab::Itinerary);
        assert_eq!(Tab::Itinerary.prev(), Tab::Expenses);
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_text_char() {
        assert!(can_add_text_char(0, 'a'));
        assert!(can_add_text_char(MAX_TEXT_LENGTH - 1, 'z'));
        assert!(!can_add_text_char(MAX_TEXT_LENGTH, 'a'));
        assert!(!can_add_text_char(0, '\x00'));
        assert!(!can_add_text_char(0, '\n'));
    }

    #[test]
    fn test_can_add_amount_char() {
        assert!(can_add_amount_char(0, '9'));
        assert!(can_add_amount_char(0, '.'));
        assert!(can_add_amount_char(0, ','));
        assert!(!can_add_amount_char(0, 'x'));
        assert!(!can_add_amount_char(MAX_AMOUNT_LENGTH, '1'));
    }

    #[test]
    fn test_can_add_date_char() {
        assert!(can_add_date_char(0, '2'));
        assert!(can_add_date_char(4, '-'));
        assert!(!can_add_date_char(10, '1')); // YYYY-MM-DD is full
        assert!(!can_add_date_char(0, 'a'));
    }

    #[test]
    fn test_parse_amount_accepts_comma_decimals() {
        assert_eq!(App::parse_amount("12,50"), Some(12.5));
        assert_eq!(App::parse_amount(" 40 "), Some(40.0));
        assert_eq!(App::parse_amount("abc"), None);
        assert_eq!(App::parse_amount(""), None);
    }
}
