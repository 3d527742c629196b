use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::draft::add_months;
use crate::models::Cadence;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_yen, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.events.is_empty() {
        render_empty(f, area, app);
        return;
    }

    let header_cells = ["Period", "Title", "Type", "Cadence", "Total"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .events
        .iter()
        .enumerate()
        .skip(app.event_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, event)| {
            let period = match event.cadence {
                Cadence::Once => event.start_ym.clone(),
                Cadence::Monthly => {
                    let delta = i32::try_from(event.duration_months - 1).unwrap_or(0);
                    let end = add_months(&event.start_ym, delta).unwrap_or_default();
                    format!(
                        "{}→{} ({}mo)",
                        event.start_ym, end, event.duration_months
                    )
                }
            };

            let amount_style = if event.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            let signed = event.signed_total_yen();
            let sign = if signed >= 0 { "+" } else { "" };
            let total = format!("{sign}{}", format_yen(signed));

            let style = if i == app.event_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(period),
                Cell::from(truncate(&event.title, 30)),
                Cell::from(truncate(&event.event_type, 12)),
                Cell::from(event.cadence.as_str()),
                Cell::from(Span::styled(total, amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(24),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(14),
    ];

    let (income, expense) = app.event_totals;
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Events ({}) +{} -{} {}",
                    app.events.len(),
                    format_yen(income),
                    format_yen(expense),
                    if !app.search_input.is_empty() {
                        format!("search: '{}' ", app.search_input)
                    } else {
                        String::new()
                    }
                ),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}

fn render_empty(f: &mut Frame, area: Rect, app: &App) {
    let msg = if app.current_version.is_none() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "No current plan version",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Create a plan first; events attach to its current version",
                theme::dim_style(),
            )),
        ]
    } else if !app.search_input.is_empty() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No events matching '{}'", app.search_input),
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Esc to clear the search",
                theme::dim_style(),
            )),
        ]
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled("No life events yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled("Press n to add one", theme::dim_style())),
        ]
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Events (0) ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(msg).centered().block(block), area);
}
