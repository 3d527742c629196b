use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::{App, WizardStep};
use crate::ui::form::numeric_field_error;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)])
        .split(area);

    render_step_indicator(f, chunks[0], app);

    match app.wizard_step {
        WizardStep::Name => render_name(f, chunks[1], app),
        WizardStep::Baseline => render_baseline(f, chunks[1], app),
        WizardStep::Confirm => render_confirm(f, chunks[1], app),
    }
}

fn render_step_indicator(f: &mut Frame, area: Rect, app: &App) {
    let steps = [
        (WizardStep::Name, "1:Name"),
        (WizardStep::Baseline, "2:Baseline"),
        (WizardStep::Confirm, "3:Confirm"),
    ];
    let current_idx = steps
        .iter()
        .position(|(s, _)| *s == app.wizard_step)
        .unwrap_or(0);

    let mut spans: Vec<Span> = Vec::new();
    spans.push(Span::styled(" ", Style::default().bg(theme::HEADER_BG)));
    for (i, (_, label)) in steps.iter().enumerate() {
        let style = if i == current_idx {
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else if i < current_idx {
            Style::default().fg(theme::GREEN).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::TEXT_DIM)
        };
        spans.push(Span::styled(format!(" {label} "), style));
        if i < steps.len() - 1 {
            let connector_style = if i < current_idx {
                Style::default().fg(theme::GREEN)
            } else {
                Style::default().fg(theme::TEXT_DIM)
            };
            spans.push(Span::styled(" > ", connector_style));
        }
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(bar, area);
}

fn render_name(f: &mut Frame, area: Rect, app: &App) {
    let name_line = Line::from(vec![
        Span::styled(" Name: ", theme::field_label_style()),
        Span::styled(app.wizard_name.clone(), theme::normal_style()),
        Span::styled("▏", theme::focused_field_style()),
    ]);

    let msg = Paragraph::new(vec![
        Line::from(""),
        name_line,
        Line::from(""),
        Line::from(Span::styled(
            " What is this plan about? e.g. \"Move to Osaka\", \"Second child\"",
            theme::dim_style(),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " New plan — Enter to continue, Esc to cancel ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(msg, area);
}

/// Baseline step fields, in cursor order: income, living costs, housing.
fn baseline_fields(app: &App) -> [(&'static str, &String); 3] {
    [
        ("Monthly income", &app.wizard_income),
        ("Living costs / month", &app.wizard_living),
        ("Housing cost / month", &app.wizard_housing),
    ]
}

fn render_baseline(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = baseline_fields(app)
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let focused = i == app.wizard_field;
            let label_style = if focused {
                theme::focused_field_style()
            } else {
                theme::field_label_style()
            };
            let cursor = if focused { "▏" } else { "" };

            let mut spans = vec![
                Span::styled(format!(" {label:<24}"), label_style),
                Span::styled((*value).clone(), theme::normal_style()),
                Span::styled(cursor, theme::focused_field_style()),
            ];
            if let Some(err) = numeric_field_error(value.as_str()) {
                spans.push(Span::styled(format!("  ✗ {err}"), theme::error_style()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Baseline — amounts in yen; Tab or arrows move, Enter to continue ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn render_confirm(f: &mut Frame, area: Rect, app: &App) {
    let fmt = |raw: &str| {
        crate::draft::parse_number_input(raw)
            .and_then(|n| rust_decimal::prelude::ToPrimitive::to_i64(&n))
            .map(crate::ui::util::format_yen)
            .unwrap_or_else(|| "—".into())
    };

    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Plan:            {}", app.wizard_name),
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            format!("  Monthly income:  {}", fmt(&app.wizard_income)),
            theme::income_style(),
        )),
        Line::from(Span::styled(
            format!("  Living costs:    {}/mo", fmt(&app.wizard_living)),
            theme::expense_style(),
        )),
        Line::from(Span::styled(
            format!("  Housing:         {}/mo", fmt(&app.wizard_housing)),
            theme::expense_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  An initial version is created and made current.",
            theme::dim_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Enter to create the plan, Esc to go back",
            theme::dim_style(),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::GREEN))
            .title(Span::styled(
                " Confirm ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(msg, area);
}
