use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{Cadence, Direction};
use crate::ui::form::{EventField, EventForm};
use crate::ui::theme;
use crate::ui::util::format_yen;

/// Modal overlay for entering a new life event. One line per field with
/// its live validation error, then a derived preview line.
pub(crate) fn render(f: &mut Frame, area: Rect, form: &EventForm) {
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            " New Life Event ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for &field in EventField::all() {
        let focused = field == form.focused;
        let label_style = if focused {
            theme::focused_field_style()
        } else {
            theme::field_label_style()
        };
        let cursor = if focused { "▏" } else { "" };

        let value = match field {
            EventField::Title => form.draft.title.clone(),
            EventField::EventType => form.draft.event_type.clone(),
            EventField::StartYm => form.draft.start_ym.clone(),
            EventField::Amount => form.draft.amount_yen.clone(),
            EventField::Direction => match form.draft.direction {
                Some(Direction::Expense) => "expense  (space to switch)".into(),
                Some(Direction::Income) => "income  (space to switch)".into(),
                None => "—".into(),
            },
            EventField::Cadence => match form.draft.cadence {
                Some(Cadence::Once) => "once  (space to switch)".into(),
                Some(Cadence::Monthly) => "monthly  (space to switch)".into(),
                None => "—".into(),
            },
            EventField::Duration => form.draft.duration_months.clone(),
        };

        let mut spans = vec![
            Span::styled(format!(" {:<18}", field.label()), label_style),
            Span::styled(value, theme::normal_style()),
            Span::styled(cursor, theme::focused_field_style()),
        ];
        if let Some(err) = form.field_error(field) {
            spans.push(Span::styled(format!("  ✗ {err}"), theme::error_style()));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(preview_line(form));
    lines.push(Line::from(""));
    let errors = form.validation.error_count();
    let hint = if form.is_submitting() {
        " saving…".to_string()
    } else if errors > 0 {
        format!(
            " {errors} field{} need attention · Esc cancel",
            if errors == 1 { "" } else { "s" }
        )
    } else {
        " Tab/↑↓ move · Ctrl-s save · Esc cancel".to_string()
    };
    lines.push(Line::from(Span::styled(hint, theme::dim_style())));

    let popup_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 64.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(popup, popup_area);
}

fn preview_line(form: &EventForm) -> Line<'static> {
    let preview = form.preview();
    let mut parts: Vec<String> = Vec::new();

    if let Some(d) = preview.duration_months {
        parts.push(format!("{d} month{}", if d == 1 { "" } else { "s" }));
    }
    if let Some(end) = &preview.end_ym {
        parts.push(format!("until {end}"));
    }
    if let Some(total) = preview.total_amount_yen {
        parts.push(format!("total {}", format_yen(total)));
    }

    if parts.is_empty() {
        Line::from(Span::styled(" –", theme::dim_style()))
    } else {
        Line::from(Span::styled(
            format!(" {}", parts.join(" · ")),
            Style::default().fg(theme::YELLOW),
        ))
    }
}
