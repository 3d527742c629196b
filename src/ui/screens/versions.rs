use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let plan_name = app.active_plan_name().unwrap_or("no plan");

    if app.versions.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No versions", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Create a plan first; its initial version appears here",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    format!(" Versions of {plan_name} (0) "),
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        );
        f.render_widget(msg, area);
        return;
    }

    let header_cells = ["", "Label", "Created", "Events"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .versions
        .iter()
        .enumerate()
        .skip(app.version_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, version)| {
            let marker = if version.is_current { "●" } else { " " };
            let events = app
                .version_event_counts
                .get(i)
                .copied()
                .unwrap_or_default();

            let style = if i == app.version_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let created = version.created_at.chars().take(10).collect::<String>();

            Row::new(vec![
                Cell::from(Span::styled(marker, theme::current_style())),
                Cell::from(truncate(&version.label, 30)),
                Cell::from(created),
                Cell::from(format!("{events}")),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Versions of {plan_name} ({}) ", app.versions.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(table, area);
}
