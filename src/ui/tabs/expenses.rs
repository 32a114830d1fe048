use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::summary;
use crate::ui::styles;
use crate::utils::{format_money, truncate_string};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_expense_list(frame, app, chunks[0]);
    render_expense_detail(frame, app, chunks[1]);
}

fn render_expense_list(frame: &mut Frame, app: &App, area: Rect) {
    // Header row
    let header_cells = [
        Cell::from("Name"),
        Cell::from("Category"),
        Cell::from("Amount"),
    ];
    let header = Row::new(header_cells)
        .style(styles::title_style())
        .height(1);

    let sorted = app.get_sorted_expenses();

    // Data rows
    let rows: Vec<Row> = sorted
        .iter()
        .map(|expense| {
            let category_style =
                ratatui::style::Style::default().fg(styles::category_color(expense.category));

            Row::new(vec![
                Cell::from(truncate_string(&expense.name, 28)),
                Cell::from(Span::styled(expense.category.label(), category_style)),
                Cell::from(format_money(expense.amount, &app.trip.currency)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(1),     // Name
        Constraint::Length(12),  // Category
        Constraint::Length(16),  // Amount
    ];

    let sort_help = "[n]ame [t]ype a[m]ount";
    let title = format!(" Expenses ({}) - {} ", app.trip.expenses.len(), sort_help);

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !app.trip.expenses.is_empty() {
        state.select(Some(app.expense_selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_expense_detail(frame: &mut Frame, app: &App, area: Rect) {
    let sorted = app.get_sorted_expenses();
    let selected = sorted.get(app.expense_selection).copied();

    let mut lines = vec![];

    match selected {
        Some(expense) => {
            lines.push(Line::from(Span::styled(
                expense.name.clone(),
                styles::title_style(),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Category:  ", styles::muted_style()),
                Span::styled(
                    expense.category.label(),
                    ratatui::style::Style::default().fg(styles::category_color(expense.category)),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Amount:    ", styles::muted_style()),
                Span::raw(format_money(expense.amount, &app.trip.currency)),
            ]));
            if app.trip.currency != app.trip.base_currency {
                lines.push(Line::from(vec![
                    Span::styled("Recorded:  ", styles::muted_style()),
                    Span::raw(format_money(expense.base_amount, &app.trip.base_currency)),
                ]));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "No expenses yet",
                styles::muted_style(),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Press ", styles::muted_style()),
                Span::styled("a", styles::help_key_style()),
                Span::styled(" to add the first one", styles::muted_style()),
            ]));
        }
    }

    // Running totals under the selected expense
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Totals", styles::highlight_style())));
    lines.push(Line::from(vec![
        Span::styled("Trip:      ", styles::muted_style()),
        Span::raw(format_money(app.trip.total(), &app.trip.currency)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Per person:", styles::muted_style()),
        Span::raw(format!(
            " {}",
            format_money(summary::per_person(&app.trip), &app.trip.currency)
        )),
    ]));
    if app.trip.budget_target > 0.0 {
        lines.push(Line::from(vec![
            Span::styled("Budget:    ", styles::muted_style()),
            Span::raw(format_money(app.trip.budget_target, &app.trip.currency)),
        ]));
    }

    let block = Block::default()
        .title(" Detail ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
