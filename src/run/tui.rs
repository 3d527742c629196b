use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::db::Database;
use crate::draft::parse_number_input;
use crate::models::{Direction, HousingPlan, MonthlyAssumption, Plan, PlanVersion};
use crate::ui::app::{App, InputMode, PendingAction, Screen, WizardStep};
use crate::ui::commands;
use crate::ui::form::{EventField, EventForm, SubmitBlock};
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &mut Database) -> Result<()> {
    let mut app = App::new();
    app.refresh_all(db)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => {
                    if app.screen == Screen::NewPlan {
                        handle_wizard_input(key, app, db)?;
                    } else {
                        handle_normal_input(key, app, db)?;
                    }
                }
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::Search => handle_search_input(key, app, db)?,
                InputMode::Form => handle_form_input(key, app, db)?,
                InputMode::Confirm => handle_confirm_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, db, Screen::Plans)?,
        KeyCode::Char('2') => switch_screen(app, db, Screen::NewPlan)?,
        KeyCode::Char('3') => switch_screen(app, db, Screen::Events)?,
        KeyCode::Char('4') => switch_screen(app, db, Screen::Monthly)?,
        KeyCode::Char('5') => switch_screen(app, db, Screen::Versions)?,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, db, screens[next])?;
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, db, screens[prev])?;
        }
        KeyCode::Enter => handle_enter(app, db)?,
        KeyCode::Esc => handle_escape(app, db)?,
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('n') => handle_new(app, db)?,
        KeyCode::Char('D') => handle_delete(app, db)?,
        KeyCode::Char('h') if app.screen == Screen::Monthly => {
            app.monthly_view_housing = !app.monthly_view_housing;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_wizard_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    {
        app.running = false;
        return Ok(());
    }

    match app.wizard_step {
        WizardStep::Name => match key.code {
            KeyCode::Char(c) => {
                app.wizard_name.push(c);
            }
            KeyCode::Backspace => {
                app.wizard_name.pop();
            }
            KeyCode::Enter => {
                if app.wizard_name.trim().is_empty() {
                    app.set_status("A plan needs a name");
                } else {
                    app.wizard_step = WizardStep::Baseline;
                    app.wizard_field = 0;
                }
            }
            KeyCode::Esc => {
                app.reset_wizard();
                switch_screen(app, db, Screen::Plans)?;
            }
            _ => {}
        },
        WizardStep::Baseline => match key.code {
            KeyCode::Tab | KeyCode::Down => {
                app.wizard_field = (app.wizard_field + 1) % 3;
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.wizard_field = if app.wizard_field == 0 {
                    2
                } else {
                    app.wizard_field - 1
                };
            }
            KeyCode::Char(c) => {
                wizard_field_mut(app).push(c);
            }
            KeyCode::Backspace => {
                wizard_field_mut(app).pop();
            }
            KeyCode::Enter => {
                let all_valid = [&app.wizard_income, &app.wizard_living, &app.wizard_housing]
                    .iter()
                    .all(|raw| crate::ui::form::numeric_field_error(raw).is_none());
                if all_valid {
                    app.wizard_step = WizardStep::Confirm;
                } else {
                    app.set_status("Fix the highlighted amounts first");
                }
            }
            KeyCode::Esc => {
                app.wizard_step = WizardStep::Name;
            }
            _ => {}
        },
        WizardStep::Confirm => match key.code {
            KeyCode::Enter => create_plan_from_wizard(app, db)?,
            KeyCode::Esc => {
                app.wizard_step = WizardStep::Baseline;
            }
            _ => {}
        },
    }
    Ok(())
}

fn wizard_field_mut(app: &mut App) -> &mut String {
    match app.wizard_field {
        0 => &mut app.wizard_income,
        1 => &mut app.wizard_living,
        _ => &mut app.wizard_housing,
    }
}

/// Commit the wizard: plan, initial current version, baseline rows.
fn create_plan_from_wizard(app: &mut App, db: &mut Database) -> Result<()> {
    let name = app.wizard_name.trim().to_string();
    let plan_id = db.insert_plan(&Plan::new(name.clone(), String::new()))?;

    let mut version = PlanVersion::new(plan_id, "initial".into());
    version.is_current = true;
    let version_id = db.insert_version(&version)?;

    let amount = |raw: &str| {
        parse_number_input(raw)
            .and_then(|n| rust_decimal::prelude::ToPrimitive::to_i64(&n))
            .unwrap_or(0)
    };

    let income = amount(&app.wizard_income);
    if income > 0 {
        db.insert_assumption(&MonthlyAssumption::new(
            version_id,
            "Income".into(),
            income,
            Direction::Income,
        ))?;
    }
    let living = amount(&app.wizard_living);
    if living > 0 {
        db.insert_assumption(&MonthlyAssumption::new(
            version_id,
            "Living costs".into(),
            living,
            Direction::Expense,
        ))?;
    }
    let housing = amount(&app.wizard_housing);
    if housing > 0 {
        db.insert_housing(&HousingPlan::new(
            version_id,
            "Housing".into(),
            housing,
            app.default_start_ym.clone(),
        ))?;
    }

    app.reset_wizard();
    app.refresh_all(db)?;
    app.activate_plan(db, plan_id)?;
    app.screen = Screen::Events;
    app.set_status(format!("Created plan '{name}' with an initial version"));
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_search_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            app.screen = Screen::Events;
            app.refresh_events(db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_input.clear();
            app.refresh_events(db)?;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            app.screen = Screen::Events;
            app.event_index = 0;
            app.event_scroll = 0;
            app.refresh_events(db)?;
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.screen = Screen::Events;
            app.event_index = 0;
            app.event_scroll = 0;
            app.refresh_events(db)?;
        }
        _ => {}
    }
    Ok(())
}

fn handle_form_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            submit_event(app, db)?;
        }
        KeyCode::Esc => {
            app.event_form = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Cancelled");
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.event_form.as_mut() {
                form.focus_next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.event_form.as_mut() {
                form.focus_prev();
            }
        }
        KeyCode::Left => {
            if let Some(form) = app.event_form.as_mut() {
                form.cycle(-1);
            }
        }
        KeyCode::Right => {
            if let Some(form) = app.event_form.as_mut() {
                form.cycle(1);
            }
        }
        KeyCode::Enter => {
            // Enter walks the form; on the last field it submits.
            let on_last = app
                .event_form
                .as_ref()
                .is_some_and(|form| form.focused == EventField::Duration);
            if on_last {
                submit_event(app, db)?;
            } else if let Some(form) = app.event_form.as_mut() {
                form.focus_next();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.event_form.as_mut() {
                form.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.event_form.as_mut() {
                form.insert_char(c);
            }
        }
        _ => {}
    }
    Ok(())
}

/// The one place a draft reaches the repository. The form suppresses a
/// second submit while one is outstanding and keeps the draft on failure.
fn submit_event(app: &mut App, db: &mut Database) -> Result<()> {
    let version_id = app.current_version_id();
    let Some(form) = app.event_form.as_mut() else {
        return Ok(());
    };

    match form.begin_submit(version_id) {
        Ok(event) => {
            let result = db.insert_event(&event);
            form.finish_submit(result.is_ok());
            match result {
                Ok(_) => {
                    app.event_form = None;
                    app.input_mode = InputMode::Normal;
                    app.refresh_events(db)?;
                    app.refresh_versions(db)?;
                    app.set_status(format!("Added event: {}", event.title));
                }
                Err(e) => app.set_status(format!("Could not save event: {e}")),
            }
        }
        Err(SubmitBlock::Invalid) => app.set_status("Fix the highlighted fields first"),
        Err(SubmitBlock::NoCurrentVersion) => {
            app.set_status("No current version; create a plan first")
        }
        Err(SubmitBlock::InFlight) => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeletePlan { id, name } => {
                        db.delete_plan(id)?;
                        app.refresh_all(db)?;
                        app.set_status(format!("Deleted plan: {name}"));
                    }
                    PendingAction::DeleteVersion { id, label } => {
                        db.delete_version(id)?;
                        app.refresh_versions(db)?;
                        app.set_status(format!("Deleted version: {label}"));
                    }
                    PendingAction::DeleteEvent { id, title } => {
                        db.delete_event(id)?;
                        app.refresh_events(db)?;
                        app.refresh_versions(db)?;
                        app.set_status(format!("Deleted: {title}"));
                    }
                    PendingAction::DeleteAssumption { id, label } => {
                        db.delete_assumption(id)?;
                        app.refresh_monthly(db)?;
                        app.set_status(format!("Deleted baseline line: {label}"));
                    }
                    PendingAction::DeleteHousing { id, label } => {
                        db.delete_housing(id)?;
                        app.refresh_monthly(db)?;
                        app.set_status(format!("Deleted housing plan: {label}"));
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, db: &mut Database, screen: Screen) -> Result<()> {
    app.screen = screen;
    match screen {
        Screen::Plans => app.refresh_plans(db)?,
        Screen::NewPlan => app.reset_wizard(),
        Screen::Events => app.refresh_events(db)?,
        Screen::Monthly => app.refresh_monthly(db)?,
        Screen::Versions => app.refresh_versions(db)?,
    }
    app.set_status(format!("{screen}"));
    Ok(())
}

fn handle_move_down(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Plans => scroll_down(
            &mut app.plan_index,
            &mut app.plan_scroll,
            app.plans.len(),
            page,
        ),
        Screen::Events => scroll_down(
            &mut app.event_index,
            &mut app.event_scroll,
            app.events.len(),
            page,
        ),
        Screen::Monthly => {
            if app.monthly_view_housing {
                scroll_down(
                    &mut app.housing_index,
                    &mut app.housing_scroll,
                    app.housing.len(),
                    page,
                );
            } else {
                scroll_down(
                    &mut app.assumption_index,
                    &mut app.assumption_scroll,
                    app.assumptions.len(),
                    page,
                );
            }
        }
        Screen::Versions => scroll_down(
            &mut app.version_index,
            &mut app.version_scroll,
            app.versions.len(),
            page,
        ),
        Screen::NewPlan => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Plans => scroll_up(&mut app.plan_index, &mut app.plan_scroll),
        Screen::Events => scroll_up(&mut app.event_index, &mut app.event_scroll),
        Screen::Monthly => {
            if app.monthly_view_housing {
                scroll_up(&mut app.housing_index, &mut app.housing_scroll);
            } else {
                scroll_up(&mut app.assumption_index, &mut app.assumption_scroll);
            }
        }
        Screen::Versions => scroll_up(&mut app.version_index, &mut app.version_scroll),
        Screen::NewPlan => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Plans => scroll_to_top(&mut app.plan_index, &mut app.plan_scroll),
        Screen::Events => scroll_to_top(&mut app.event_index, &mut app.event_scroll),
        Screen::Monthly => {
            if app.monthly_view_housing {
                scroll_to_top(&mut app.housing_index, &mut app.housing_scroll);
            } else {
                scroll_to_top(&mut app.assumption_index, &mut app.assumption_scroll);
            }
        }
        Screen::Versions => scroll_to_top(&mut app.version_index, &mut app.version_scroll),
        Screen::NewPlan => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Plans => scroll_to_bottom(
            &mut app.plan_index,
            &mut app.plan_scroll,
            app.plans.len(),
            page,
        ),
        Screen::Events => scroll_to_bottom(
            &mut app.event_index,
            &mut app.event_scroll,
            app.events.len(),
            page,
        ),
        Screen::Monthly => {
            if app.monthly_view_housing {
                scroll_to_bottom(
                    &mut app.housing_index,
                    &mut app.housing_scroll,
                    app.housing.len(),
                    page,
                );
            } else {
                scroll_to_bottom(
                    &mut app.assumption_index,
                    &mut app.assumption_scroll,
                    app.assumptions.len(),
                    page,
                );
            }
        }
        Screen::Versions => scroll_to_bottom(
            &mut app.version_index,
            &mut app.version_scroll,
            app.versions.len(),
            page,
        ),
        Screen::NewPlan => {}
    }
}

fn handle_enter(app: &mut App, db: &mut Database) -> Result<()> {
    match app.screen {
        Screen::Plans => {
            if let Some(plan) = app.plans.get(app.plan_index) {
                if let Some(id) = plan.id {
                    let name = plan.name.clone();
                    app.activate_plan(db, id)?;
                    app.set_status(format!("Active plan: {name}"));
                }
            }
        }
        Screen::Versions => {
            if let Some(version) = app.versions.get(app.version_index) {
                if version.is_current {
                    app.set_status("Already the current version");
                } else if let (Some(plan_id), Some(version_id)) = (app.active_plan_id, version.id)
                {
                    let label = version.label.clone();
                    db.set_current_version(plan_id, version_id)?;
                    app.refresh_all(db)?;
                    app.set_status(format!("Current version: {label}"));
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_new(app: &mut App, db: &mut Database) -> Result<()> {
    match app.screen {
        Screen::Plans => {
            app.reset_wizard();
            app.screen = Screen::NewPlan;
        }
        Screen::Events => {
            if app.current_version.is_none() {
                app.set_status("No current version; create a plan first");
            } else {
                app.event_form = Some(EventForm::new(app.default_start_ym.clone()));
                app.input_mode = InputMode::Form;
            }
        }
        Screen::Versions => {
            commands::handle_command("new-version", app, db)?;
        }
        _ => {}
    }
    Ok(())
}

fn handle_delete(app: &mut App, db: &mut Database) -> Result<()> {
    match app.screen {
        Screen::Plans => commands::handle_command("delete-plan", app, db)?,
        Screen::Events => commands::handle_command("delete-event", app, db)?,
        Screen::Versions => commands::handle_command("delete-version", app, db)?,
        Screen::Monthly => {
            if app.monthly_view_housing {
                commands::handle_command("delete-housing", app, db)?;
            } else {
                commands::handle_command("delete-assume", app, db)?;
            }
        }
        Screen::NewPlan => {}
    }
    Ok(())
}

fn handle_escape(app: &mut App, db: &mut Database) -> Result<()> {
    if !app.search_input.is_empty() {
        app.search_input.clear();
        app.event_index = 0;
        app.event_scroll = 0;
        app.refresh_events(db)?;
        app.set_status("Search cleared");
    } else {
        app.status_message.clear();
    }
    Ok(())
}
