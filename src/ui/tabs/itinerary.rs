use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::{format_date, truncate_string};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_day_list(frame, app, chunks[0]);
    render_day_detail(frame, app, chunks[1]);
}

fn render_day_list(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new([Cell::from("Date"), Cell::from("Plan")])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = app
        .trip
        .days
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let label = format!("Day {}", i + 1);
            Row::new(vec![
                Cell::from(format!("{}  {}", label, format_date(&day.date))),
                Cell::from(truncate_string(&day.title, 30)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(22), // "Day 1  Aug 14, 2026"
        Constraint::Fill(1),
    ];

    let title = format!(" Itinerary ({} days) ", app.trip.days.len());

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
    if !app.trip.days.is_empty() {
        state.select(Some(app.day_selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_day_detail(frame: &mut Frame, app: &App, area: Rect) {
    let selected = app.trip.days.get(app.day_selection);

    let lines = match selected {
        Some(day) => {
            let mut lines = vec![
                Line::from(Span::styled(day.title.clone(), styles::title_style())),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Date: ", styles::muted_style()),
                    Span::raw(day.formatted_date()),
                ]),
            ];
            if let Some(ref notes) = day.notes {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled("Notes", styles::highlight_style())));
                for line in wrap_text(notes, (area.width as usize).saturating_sub(4)) {
                    lines.push(Line::from(line));
                }
            }
            lines
        }
        None => vec![
            Line::from(Span::styled("No days planned yet", styles::muted_style())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", styles::muted_style()),
                Span::styled("a", styles::help_key_style()),
                Span::styled(" to plan the first day", styles::muted_style()),
            ]),
        ],
    };

    let block = Block::default()
        .title(" Day ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Greedy word wrap for the notes pane
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_splits_on_width() {
        let wrapped = wrap_text("one two three four", 9);
        assert_eq!(wrapped, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_wrap_text_zero_width() {
        assert_eq!(wrap_text("abc", 0), vec!["abc"]);
    }
}
