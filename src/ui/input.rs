//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{
    can_add_amount_char, can_add_date_char, can_add_notes_char, can_add_text_char, App, AppState,
    DayFormFocus, ExpenseFormFocus, SegmentFormFocus, Tab, PAGE_SCROLL_SIZE,
};
use crate::models::{Category, ExpenseSortColumn, TravelMode};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle form overlays
    match app.state {
        AppState::AddingExpense => return handle_expense_form_input(app, key),
        AppState::AddingDay => return handle_day_form_input(app, key),
        AppState::AddingSegment => return handle_segment_form_input(app, key),
        AppState::EditingBudget | AppState::EditingPeople => {
            return handle_prompt_input(app, key)
        }
        AppState::PickingCurrency => return handle_currency_picker_input(app, key),
        _ => {}
    }

    handle_normal_input(app, key)
}

fn handle_normal_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Quit
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }

        // Help
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }

        // Tab switching
        KeyCode::Char('1') => app.current_tab = Tab::Expenses,
        KeyCode::Char('2') => app.current_tab = Tab::Itinerary,
        KeyCode::Char('3') => app.current_tab = Tab::Route,
        KeyCode::Char('4') => app.current_tab = Tab::Summary,
        KeyCode::Right | KeyCode::Tab => app.current_tab = app.current_tab.next(),
        KeyCode::Left | KeyCode::BackTab => app.current_tab = app.current_tab.prev(),

        // List navigation
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::PageDown => app.move_selection(PAGE_SCROLL_SIZE as isize),
        KeyCode::PageUp => app.move_selection(-(PAGE_SCROLL_SIZE as isize)),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),

        // Add / delete on the current tab
        KeyCode::Char('a') => match app.current_tab {
            Tab::Expenses => app.start_expense_form(),
            Tab::Itinerary => app.start_day_form(),
            Tab::Route => app.start_segment_form(),
            Tab::Summary => {}
        },
        KeyCode::Char('x') | KeyCode::Delete => match app.current_tab {
            Tab::Expenses => app.delete_selected_expense(),
            Tab::Itinerary => app.delete_selected_day(),
            Tab::Route => app.delete_selected_segment(),
            Tab::Summary => {}
        },

        // Trip-level edits
        KeyCode::Char('b') => app.start_budget_edit(),
        KeyCode::Char('p') => app.start_people_edit(),
        KeyCode::Char('c') => app.start_currency_picker(),
        KeyCode::Char('u') => app.refresh_rates(),

        // Expense sorting
        KeyCode::Char('n') if app.current_tab == Tab::Expenses => {
            app.toggle_expense_sort(ExpenseSortColumn::Name)
        }
        KeyCode::Char('t') if app.current_tab == Tab::Expenses => {
            app.toggle_expense_sort(ExpenseSortColumn::Category)
        }
        KeyCode::Char('m') if app.current_tab == Tab::Expenses => {
            app.toggle_expense_sort(ExpenseSortColumn::Amount)
        }

        _ => {}
    }

    Ok(false)
}

// ============================================================================
// Form overlays
// ============================================================================

fn handle_expense_form_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.reset_forms();
            app.state = AppState::Normal;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.expense_form_focus = match app.expense_form_focus {
                ExpenseFormFocus::Name => ExpenseFormFocus::Amount,
                ExpenseFormFocus::Amount => ExpenseFormFocus::Category,
                ExpenseFormFocus::Category => ExpenseFormFocus::Submit,
                ExpenseFormFocus::Submit => ExpenseFormFocus::Name,
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.expense_form_focus = match app.expense_form_focus {
                ExpenseFormFocus::Name => ExpenseFormFocus::Submit,
                ExpenseFormFocus::Amount => ExpenseFormFocus::Name,
                ExpenseFormFocus::Category => ExpenseFormFocus::Amount,
                ExpenseFormFocus::Submit => ExpenseFormFocus::Category,
            };
        }
        KeyCode::Enter => {
            if app.expense_form_focus == ExpenseFormFocus::Submit {
                app.submit_expense_form();
            } else {
                // Enter advances, like Tab
                return handle_expense_form_input(
                    app,
                    KeyEvent::from(KeyCode::Tab),
                );
            }
        }
        KeyCode::Left if app.expense_form_focus == ExpenseFormFocus::Category => {
            app.form_category_idx =
                (app.form_category_idx + Category::ALL.len() - 1) % Category::ALL.len();
        }
        KeyCode::Right if app.expense_form_focus == ExpenseFormFocus::Category => {
            app.form_category_idx = (app.form_category_idx + 1) % Category::ALL.len();
        }
        KeyCode::Backspace => match app.expense_form_focus {
            ExpenseFormFocus::Name => {
                app.form_name.pop();
            }
            ExpenseFormFocus::Amount => {
                app.form_amount.pop();
            }
            _ => {}
        },
        KeyCode::Char(c) => match app.expense_form_focus {
            ExpenseFormFocus::Name if can_add_text_char(app.form_name.len(), c) => {
                app.form_name.push(c);
            }
            ExpenseFormFocus::Amount if can_add_amount_char(app.form_amount.len(), c) => {
                app.form_amount.push(c);
            }
            _ => {}
        },
        _ => {}
    }
    Ok(false)
}

fn handle_day_form_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.reset_forms();
            app.state = AppState::Normal;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.day_form_focus = match app.day_form_focus {
                DayFormFocus::Date => DayFormFocus::Title,
                DayFormFocus::Title => DayFormFocus::Notes,
                DayFormFocus::Notes => DayFormFocus::Submit,
                DayFormFocus::Submit => DayFormFocus::Date,
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.day_form_focus = match app.day_form_focus {
                DayFormFocus::Date => DayFormFocus::Submit,
                DayFormFocus::Title => DayFormFocus::Date,
                DayFormFocus::Notes => DayFormFocus::Title,
                DayFormFocus::Submit => DayFormFocus::Notes,
            };
        }
        KeyCode::Enter => {
            if app.day_form_focus == DayFormFocus::Submit {
                app.submit_day_form();
            } else {
                return handle_day_form_input(app, KeyEvent::from(KeyCode::Tab));
            }
        }
        KeyCode::Backspace => match app.day_form_focus {
            DayFormFocus::Date => {
                app.form_date.pop();
            }
            DayFormFocus::Title => {
                app.form_title.pop();
            }
            DayFormFocus::Notes => {
                app.form_notes.pop();
            }
            DayFormFocus::Submit => {}
        },
        KeyCode::Char(c) => match app.day_form_focus {
            DayFormFocus::Date if can_add_date_char(app.form_date.len(), c) => {
                app.form_date.push(c);
            }
            DayFormFocus::Title if can_add_text_char(app.form_title.len(), c) => {
                app.form_title.push(c);
            }
            DayFormFocus::Notes if can_add_notes_char(app.form_notes.len(), c) => {
                app.form_notes.push(c);
            }
            _ => {}
        },
        _ => {}
    }
    Ok(false)
}

fn handle_segment_form_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.reset_forms();
            app.state = AppState::Normal;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.segment_form_focus = match app.segment_form_focus {
                SegmentFormFocus::From => SegmentFormFocus::To,
                SegmentFormFocus::To => SegmentFormFocus::Mode,
                SegmentFormFocus::Mode => SegmentFormFocus::Cost,
                SegmentFormFocus::Cost => SegmentFormFocus::Submit,
                SegmentFormFocus::Submit => SegmentFormFocus::From,
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.segment_form_focus = match app.segment_form_focus {
                SegmentFormFocus::From => SegmentFormFocus::Submit,
                SegmentFormFocus::To => SegmentFormFocus::From,
                SegmentFormFocus::Mode => SegmentFormFocus::To,
                SegmentFormFocus::Cost => SegmentFormFocus::Mode,
                SegmentFormFocus::Submit => SegmentFormFocus::Cost,
            };
        }
        KeyCode::Enter => {
            if app.segment_form_focus == SegmentFormFocus::Submit {
                app.submit_segment_form();
            } else {
                return handle_segment_form_input(app, KeyEvent::from(KeyCode::Tab));
            }
        }
        KeyCode::Left if app.segment_form_focus == SegmentFormFocus::Mode => {
            app.form_mode_idx =
                (app.form_mode_idx + TravelMode::ALL.len() - 1) % TravelMode::ALL.len();
        }
        KeyCode::Right if app.segment_form_focus == SegmentFormFocus::Mode => {
            app.form_mode_idx = (app.form_mode_idx + 1) % TravelMode::ALL.len();
        }
        KeyCode::Backspace => match app.segment_form_focus {
            SegmentFormFocus::From => {
                app.form_from.pop();
            }
            SegmentFormFocus::To => {
                app.form_to.pop();
            }
            SegmentFormFocus::Cost => {
                app.form_cost.pop();
            }
            _ => {}
        },
        KeyCode::Char(c) => match app.segment_form_focus {
            SegmentFormFocus::From if can_add_text_char(app.form_from.len(), c) => {
                app.form_from.push(c);
            }
            SegmentFormFocus::To if can_add_text_char(app.form_to.len(), c) => {
                app.form_to.push(c);
            }
            SegmentFormFocus::Cost if can_add_amount_char(app.form_cost.len(), c) => {
                app.form_cost.push(c);
            }
            _ => {}
        },
        _ => {}
    }
    Ok(false)
}

/// Single-line prompts: budget target and people count
fn handle_prompt_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.reset_forms();
            app.state = AppState::Normal;
        }
        KeyCode::Enter => {
            match app.state {
                AppState::EditingBudget => app.submit_budget(),
                _ => app.submit_people(),
            };
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) if can_add_amount_char(app.input_buffer.len(), c) => {
            app.input_buffer.push(c);
        }
        _ => {}
    }
    Ok(false)
}

fn handle_currency_picker_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    let choices = app.currency_choices();
    match key.code {
        KeyCode::Esc | KeyCode::Char('c') => {
            app.state = AppState::Normal;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if !choices.is_empty() {
                app.currency_selection = (app.currency_selection + 1) % choices.len();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if !choices.is_empty() {
                app.currency_selection =
                    (app.currency_selection + choices.len() - 1) % choices.len();
            }
        }
        KeyCode::Enter => {
            if let Some(code) = choices.get(app.currency_selection).cloned() {
                app.state = AppState::Normal;
                app.request_currency(&code);
            }
        }
        _ => {}
    }
    Ok(false)
}
