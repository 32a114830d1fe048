use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Gauge, Paragraph,
    },
    Frame,
};

use crate::app::App;
use crate::summary::{self, DonutSlice};
use crate::ui::styles;
use crate::utils::{format_amount, format_money};

/// Angular sampling step for donut arcs, radians.
/// 0.01 rad keeps braille cells dense at typical terminal sizes.
const ARC_STEP: f64 = 0.01;

/// Donut ring radii (outer bound 1.0)
const RING_RADII: [f64; 4] = [0.62, 0.75, 0.88, 1.0];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_donut(frame, app, chunks[0]);
    render_breakdown(frame, app, chunks[1]);
}

/// Points along the arc band of one slice, clockwise from 12 o'clock.
fn slice_points(slice: &DonutSlice) -> Vec<(f64, f64)> {
    let mut coords = Vec::new();
    for ring in RING_RADII {
        let mut angle = slice.start_angle;
        let end = slice.start_angle + slice.sweep;
        while angle < end {
            coords.push((ring * angle.sin(), ring * angle.cos()));
            angle += ARC_STEP;
        }
    }
    coords
}

fn render_donut(frame: &mut Frame, app: &App, area: Rect) {
    let slices = summary::donut_slices(&app.trip);
    let points: Vec<(ratatui::style::Color, Vec<(f64, f64)>)> = slices
        .iter()
        .map(|s| (styles::category_color(s.category), slice_points(s)))
        .collect();

    let block = Block::default()
        .title(" Spending by category ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    if slices.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Nothing to chart yet",
                styles::muted_style(),
            )),
        ])
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let grand_total: f64 = slices.iter().map(|s| s.total).sum();
    let center_label = format_money(grand_total, &app.trip.currency);
    // Rough left shift so the label sits in the donut hole
    let label_x = -(center_label.len() as f64) * 0.045;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-1.2, 1.2])
        .y_bounds([-1.2, 1.2])
        .paint(|ctx| {
            for (color, coords) in &points {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: *color,
                });
            }
            ctx.layer();
            ctx.print(
                label_x,
                0.0,
                Line::from(Span::styled(center_label.clone(), styles::title_style())),
            );
        });

    frame.render_widget(canvas, area);
}

fn render_breakdown(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Budget gauge
            Constraint::Length(5), // Totals
            Constraint::Min(4),    // Legend
        ])
        .split(area);

    render_budget_gauge(frame, app, chunks[0]);
    render_totals(frame, app, chunks[1]);
    render_legend(frame, app, chunks[2]);
}

fn render_budget_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let progress = summary::budget_progress(&app.trip);

    let label = if app.trip.budget_target > 0.0 {
        format!(
            "{} / {}",
            format_amount(app.trip.total()),
            format_money(app.trip.budget_target, &app.trip.currency)
        )
    } else {
        "no budget set - press [b]".to_string()
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Budget ")
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        )
        .gauge_style(Style::default().fg(styles::budget_gauge_color(progress)))
        .ratio(progress)
        .label(label);

    frame.render_widget(gauge, area);
}

fn render_totals(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Total:      ", styles::muted_style()),
            Span::styled(
                format_money(app.trip.total(), &app.trip.currency),
                styles::title_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Per person: ", styles::muted_style()),
            Span::raw(format_money(
                summary::per_person(&app.trip),
                &app.trip.currency,
            )),
            Span::styled(
                format!("  ({} travellers)", app.trip.people),
                styles::muted_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Route:      ", styles::muted_style()),
            Span::raw(format_money(
                app.trip.segments_total(),
                &app.trip.currency,
            )),
        ]),
    ];

    let block = Block::default()
        .title(" Totals ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_legend(frame: &mut Frame, app: &App, area: Rect) {
    let totals = summary::category_totals(&app.trip);

    let lines: Vec<Line> = if totals.is_empty() {
        vec![Line::from(Span::styled(
            "No expenses yet",
            styles::muted_style(),
        ))]
    } else {
        totals
            .iter()
            .map(|t| {
                Line::from(vec![
                    Span::styled(
                        "\u{25a0} ",
                        Style::default().fg(styles::category_color(t.category)),
                    ),
                    Span::styled(format!("{:<12}", t.category.label()), styles::list_item_style()),
                    Span::raw(format!(
                        "{:>12}  ",
                        format_money(t.total, &app.trip.currency)
                    )),
                    Span::styled(
                        format!("{:>5.1}%", t.share * 100.0),
                        styles::muted_style(),
                    ),
                ])
            })
            .collect()
    };

    let block = Block::default()
        .title(" Categories ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_slice_points_stay_inside_bounds() {
        let slice = DonutSlice {
            category: Category::Food,
            total: 10.0,
            start_angle: 0.0,
            sweep: std::f64::consts::PI,
        };
        let points = slice_points(&slice);
        assert!(!points.is_empty());
        assert!(points
            .iter()
            .all(|(x, y)| x.abs() <= 1.0 + 1e-9 && y.abs() <= 1.0 + 1e-9));
    }

    #[test]
    fn test_slice_points_start_at_twelve_oclock() {
        let slice = DonutSlice {
            category: Category::Food,
            total: 10.0,
            start_angle: 0.0,
            sweep: 0.5,
        };
        let points = slice_points(&slice);
        // First sampled point of the innermost ring sits on the vertical axis
        let (x, y) = points[0];
        assert!(x.abs() < 1e-9);
        assert!(y > 0.0);
    }
}
