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
    if app.plans.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No plans yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press n or use :new-plan to start one",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    " Plans (0) ",
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        );
        f.render_widget(msg, area);
        return;
    }

    let header_cells = ["", "Name", "Created", "Note"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .plans
        .iter()
        .enumerate()
        .skip(app.plan_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, plan)| {
            let is_active = plan.id.is_some() && plan.id == app.active_plan_id;
            let marker = if is_active { "●" } else { " " };

            let style = if i == app.plan_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            // created_at is RFC 3339; the date part is enough here.
            let created = plan.created_at.chars().take(10).collect::<String>();

            Row::new(vec![
                Cell::from(Span::styled(marker, theme::current_style())),
                Cell::from(truncate(&plan.name, 28)),
                Cell::from(created),
                Cell::from(truncate(&plan.note, 40)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Length(30),
        Constraint::Length(12),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Plans ({}) ", app.plans.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(table, area);
}
