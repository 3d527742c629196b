use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_yen, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.monthly_view_housing {
        render_housing(f, area, app);
    } else {
        render_assumptions(f, area, app);
    }
}

fn render_assumptions(f: &mut Frame, area: Rect, app: &App) {
    let (income, expense) = app.assumption_totals;
    let title = format!(
        " Monthly baseline ({}) +{} -{} net {}/mo — h for housing ",
        app.assumptions.len(),
        format_yen(income),
        format_yen(expense),
        format_yen(income - expense),
    );

    if app.assumptions.is_empty() {
        render_empty(
            f,
            area,
            &title,
            "No monthly assumptions",
            "Add one with :assume <amount> <income|expense> <label>",
        );
        return;
    }

    let items: Vec<ListItem> = app
        .assumptions
        .iter()
        .enumerate()
        .skip(app.assumption_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, assumption)| {
            let style = if i == app.assumption_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let amount_style = if assumption.signed_amount_yen() >= 0 {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            let sign = if assumption.signed_amount_yen() >= 0 {
                "+"
            } else {
                "-"
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<30}", truncate(&assumption.label, 28)), style),
                Span::styled(format!("{:<10}", assumption.direction), theme::dim_style()),
                Span::styled(
                    format!("{sign}{}/mo", format_yen(assumption.amount_yen)),
                    amount_style,
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block(&title));
    f.render_widget(list, area);
}

fn render_housing(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(" Housing plans ({}) — h for baseline ", app.housing.len());

    if app.housing.is_empty() {
        render_empty(
            f,
            area,
            &title,
            "No housing plans",
            "Add one with :housing <amount> <YYYY-MM> <label>",
        );
        return;
    }

    let items: Vec<ListItem> = app
        .housing
        .iter()
        .enumerate()
        .skip(app.housing_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, housing)| {
            let style = if i == app.housing_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<30}", truncate(&housing.label, 28)), style),
                Span::styled(
                    format!("{}/mo", format_yen(housing.monthly_cost_yen)),
                    theme::expense_style(),
                ),
                Span::styled(format!("  from {}", housing.start_ym), theme::dim_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(block(&title));
    f.render_widget(list, area);
}

fn render_empty(f: &mut Frame, area: Rect, title: &str, line: &str, hint: &str) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(line.to_string(), theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(hint.to_string(), theme::dim_style())),
    ])
    .centered()
    .block(block(title));
    f.render_widget(msg, area);
}

fn block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}
