use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::{format_money, truncate_string};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new([
        Cell::from("#"),
        Cell::from("From"),
        Cell::from("To"),
        Cell::from("Mode"),
        Cell::from("Cost"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = app
        .trip
        .segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(truncate_string(&segment.from, 22)),
                Cell::from(truncate_string(&segment.to, 22)),
                Cell::from(segment.mode.label()),
                Cell::from(format_money(segment.cost, &app.trip.currency)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Length(16),
    ];

    // Segment costs are informational and stay out of the budget bar
    let title = format!(
        " Route ({} segments, {}) ",
        app.trip.segments.len(),
        format_money(app.trip.segments_total(), &app.trip.currency),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(Span::styled(title, styles::muted_style()))
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !app.trip.segments.is_empty() {
        state.select(Some(app.segment_selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
