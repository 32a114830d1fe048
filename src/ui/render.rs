use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, DayFormFocus, ExpenseFormFocus, SegmentFormFocus, Tab};
use crate::models::{Category, TravelMode};
use crate::utils::format_money;

use super::styles;
use super::tabs::{expenses, itinerary, route, summary};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame, app),
        AppState::AddingExpense => render_expense_form_overlay(frame, app),
        AppState::AddingDay => render_day_form_overlay(frame, app),
        AppState::AddingSegment => render_segment_form_overlay(frame, app),
        AppState::EditingBudget => render_prompt_overlay(
            frame,
            app,
            "Budget target",
            &format!("Amount in {}:", app.trip.base_currency),
        ),
        AppState::EditingPeople => {
            render_prompt_overlay(frame, app, "Travellers", "Number of people:")
        }
        AppState::PickingCurrency => render_currency_picker_overlay(frame, app),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::Normal | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  triptally";
    let trip_line = format!(
        "{} {} | {} people",
        app.trip.expenses.len(),
        if app.trip.expenses.len() == 1 { "expense" } else { "expenses" },
        app.trip.people,
    );
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize)
                .saturating_sub(title.len() + trip_line.len() + help_hint.len() + 6),
        )),
        Span::styled(trip_line, styles::muted_style()),
        Span::raw("    "),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let main_tabs = [
        ("[1] Expenses", app.current_tab == Tab::Expenses),
        ("[2] Itinerary", app.current_tab == Tab::Itinerary),
        ("[3] Route", app.current_tab == Tab::Route),
        ("[4] Summary", app.current_tab == Tab::Summary),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, selected)) in main_tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        if *selected {
            spans.push(Span::styled(*label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(*label, styles::muted_style()));
        }
    }

    // Currency indicator pushed to the right
    let currency_text = if app.trip.currency == app.trip.base_currency {
        format!("[c] {}", app.trip.currency)
    } else {
        format!("[c] {} (base {})", app.trip.currency, app.trip.base_currency)
    };
    let main_width: usize = spans.iter().map(|s| s.content.len()).sum();
    let padding = (area.width as usize).saturating_sub(main_width + currency_text.len() + 2);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(currency_text, styles::highlight_style()));

    let line = Line::from(spans);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Expenses => expenses::render(frame, app, area),
        Tab::Itinerary => itinerary::render(frame, app, area),
        Tab::Route => route::render(frame, app, area),
        Tab::Summary => summary::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.current_tab {
        Tab::Expenses => "[a]dd [x]del [b]udget [p]eople [c]urrency [u]pdate [q]uit",
        Tab::Itinerary => "[a]dd [x]del [c]urrency [u]pdate [q]uit",
        Tab::Route => "[a]dd [x]del [c]urrency [u]pdate [q]uit",
        Tab::Summary => "[b]udget [p]eople [c]urrency [u]pdate [q]uit",
    };

    let left_text = if app.fetching_rates {
        " Fetching exchange rates... ".to_string()
    } else if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        match app.rates_age {
            Some(ref age) => format!(" Rates {} ", age),
            None => " Rates never fetched ".to_string(),
        }
    };

    let center_text = format!(
        "Total {}",
        format_money(app.trip.total(), &app.trip.currency)
    );
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let center_start = (width.saturating_sub(center_text.len())) / 2;
    let left_pad = center_start.saturating_sub(left_text.len());
    let right_start = center_start + center_text.len();
    let right_pad = width
        .saturating_sub(right_start)
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(left_pad)),
        Span::styled(center_text, styles::highlight_style()),
        Span::raw(" ".repeat(right_pad)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame, _app: &App) {
    let area = centered_rect_fixed(52, 25, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  triptally", styles::title_style())),
        Line::from(Span::styled(
            format!("  version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  1-4       ", styles::help_key_style()),
            Span::styled("Switch tabs", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  <-/->     ", styles::help_key_style()),
            Span::styled("Prev/next tab", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  j/k, Up/Dn", styles::help_key_style()),
            Span::styled(" Navigate list", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  g/G       ", styles::help_key_style()),
            Span::styled("Jump to top/bottom", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  a         ", styles::help_key_style()),
            Span::styled("Add expense / day / segment", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  x         ", styles::help_key_style()),
            Span::styled("Delete selected", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  b / p     ", styles::help_key_style()),
            Span::styled("Edit budget / people count", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  c         ", styles::help_key_style()),
            Span::styled("Pick display currency", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  u         ", styles::help_key_style()),
            Span::styled("Refresh exchange rates", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  n/t/m     ", styles::help_key_style()),
            Span::styled("Sort expenses by name/category/amount", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  q         ", styles::help_key_style()),
            Span::styled("Quit", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

/// One "Label: [value]" form line with a cursor on the focused field
fn form_field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let field_style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let cursor = if focused { "\u{258c}" } else { "" };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<10}[", label), styles::muted_style()),
        Span::styled(format!("{:<24}{}", value, cursor), field_style),
        Span::styled("]", styles::muted_style()),
    ])
}

/// A `< value >` cycle field (category, travel mode)
fn cycle_field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let field_style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<10}", label), styles::muted_style()),
        Span::styled(format!("< {:<12} >", value), field_style),
    ])
}

fn submit_button_line(focused: bool) -> Line<'static> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let label = if focused { " > Add < " } else { "   Add   " };
    Line::from(vec![
        Span::raw("            ["),
        Span::styled(label.to_string(), style),
        Span::raw("]"),
    ])
}

fn form_error_lines(app: &App) -> Vec<Line<'static>> {
    match app.form_error {
        Some(ref error) => vec![
            Line::from(""),
            Line::from(Span::styled(format!(" {}", error), styles::error_style())),
        ],
        None => Vec::new(),
    }
}

fn render_form_overlay(frame: &mut Frame, title: &str, lines: Vec<Line>, height: u16) {
    let area = centered_rect_fixed(46, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_expense_form_overlay(frame: &mut Frame, app: &App) {
    let category = Category::ALL[app.form_category_idx % Category::ALL.len()];

    let mut lines = vec![
        Line::from(""),
        form_field_line(
            "Name:",
            &app.form_name,
            app.expense_form_focus == ExpenseFormFocus::Name,
        ),
        form_field_line(
            &format!("{}:", app.trip.base_currency),
            &app.form_amount,
            app.expense_form_focus == ExpenseFormFocus::Amount,
        ),
        cycle_field_line(
            "Category:",
            category.label(),
            app.expense_form_focus == ExpenseFormFocus::Category,
        ),
        Line::from(""),
        submit_button_line(app.expense_form_focus == ExpenseFormFocus::Submit),
    ];
    lines.extend(form_error_lines(app));

    let height = if app.form_error.is_some() { 11 } else { 9 };
    render_form_overlay(frame, "Add expense", lines, height);
}

fn render_day_form_overlay(frame: &mut Frame, app: &App) {
    let mut lines = vec![
        Line::from(""),
        form_field_line(
            "Date:",
            &app.form_date,
            app.day_form_focus == DayFormFocus::Date,
        ),
        form_field_line(
            "Title:",
            &app.form_title,
            app.day_form_focus == DayFormFocus::Title,
        ),
        form_field_line(
            "Notes:",
            &app.form_notes,
            app.day_form_focus == DayFormFocus::Notes,
        ),
        Line::from(""),
        submit_button_line(app.day_form_focus == DayFormFocus::Submit),
    ];
    lines.extend(form_error_lines(app));

    let height = if app.form_error.is_some() { 11 } else { 9 };
    render_form_overlay(frame, "Add itinerary day", lines, height);
}

fn render_segment_form_overlay(frame: &mut Frame, app: &App) {
    let mode = TravelMode::ALL[app.form_mode_idx % TravelMode::ALL.len()];

    let mut lines = vec![
        Line::from(""),
        form_field_line(
            "From:",
            &app.form_from,
            app.segment_form_focus == SegmentFormFocus::From,
        ),
        form_field_line(
            "To:",
            &app.form_to,
            app.segment_form_focus == SegmentFormFocus::To,
        ),
        cycle_field_line(
            "Mode:",
            mode.label(),
            app.segment_form_focus == SegmentFormFocus::Mode,
        ),
        form_field_line(
            &format!("{}:", app.trip.base_currency),
            &app.form_cost,
            app.segment_form_focus == SegmentFormFocus::Cost,
        ),
        Line::from(""),
        submit_button_line(app.segment_form_focus == SegmentFormFocus::Submit),
    ];
    lines.extend(form_error_lines(app));

    let height = if app.form_error.is_some() { 12 } else { 10 };
    render_form_overlay(frame, "Add route segment", lines, height);
}

/// Single-line input overlay for the budget and people edits
fn render_prompt_overlay(frame: &mut Frame, app: &App, title: &str, label: &str) {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{:<20}", label), styles::muted_style()),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[", styles::muted_style()),
            Span::styled(
                format!("{:<24}\u{258c}", app.input_buffer),
                styles::selected_style(),
            ),
            Span::styled("]", styles::muted_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("Enter", styles::help_key_style()),
            Span::styled(" to save, ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];
    lines.extend(form_error_lines(app));

    let height = if app.form_error.is_some() { 10 } else { 8 };
    render_form_overlay(frame, title, lines, height);
}

fn render_currency_picker_overlay(frame: &mut Frame, app: &App) {
    let choices = app.currency_choices();
    let height = (choices.len() as u16 + 5).min(frame.area().height);
    let area = centered_rect_fixed(30, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    for (i, code) in choices.iter().enumerate() {
        let selected = i == app.currency_selection;
        let marker = if *code == app.trip.currency { "*" } else { " " };
        let style = if selected {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        let label = if *code == app.trip.base_currency {
            format!(" {} {} (base)  ", marker, code)
        } else {
            format!(" {} {}  ", marker, code)
        };
        lines.push(Line::from(Span::styled(label, style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter: select  Esc: close",
        styles::muted_style(),
    )));

    let block = Block::default()
        .title(" Display currency ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
