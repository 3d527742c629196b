use std::collections::HashMap;
use std::sync::LazyLock;

use rust_decimal::prelude::ToPrimitive;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::db::Database;
use crate::draft::{is_valid_ym, parse_number_input};
use crate::models::{Direction, HousingPlan, MonthlyAssumption};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit LifePlan", cmd_quit, r);
    register_command!("quit", "Quit LifePlan", cmd_quit, r);
    register_command!("p", "Go to Plans", cmd_plans, r);
    register_command!("plans", "Go to Plans", cmd_plans, r);
    register_command!("e", "Go to Events", cmd_events, r);
    register_command!("events", "Go to Events", cmd_events, r);
    register_command!("m", "Go to Monthly baseline", cmd_monthly, r);
    register_command!("monthly", "Go to Monthly baseline", cmd_monthly, r);
    register_command!("v", "Go to Versions", cmd_versions, r);
    register_command!("versions", "Go to Versions", cmd_versions, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("new-plan", "Start the new-plan wizard", cmd_new_plan, r);
    register_command!(
        "new-version",
        "Snapshot the current version (e.g. :new-version bolder variant)",
        cmd_new_version,
        r
    );
    register_command!(
        "rename-plan",
        "Rename the selected plan (e.g. :rename-plan Plan B)",
        cmd_rename_plan,
        r
    );
    register_command!(
        "assume",
        "Add a baseline line (e.g. :assume 320000 income Salary)",
        cmd_assume,
        r
    );
    register_command!(
        "housing",
        "Add a housing plan (e.g. :housing 95000 2026-04 Rented flat)",
        cmd_housing,
        r
    );
    register_command!(
        "search",
        "Search events by title (e.g. :search car)",
        cmd_search,
        r
    );
    register_command!("s", "Search events by title", cmd_search, r);
    register_command!("delete-plan", "Delete selected plan", cmd_delete_plan, r);
    register_command!(
        "delete-version",
        "Delete selected version",
        cmd_delete_version,
        r
    );
    register_command!("delete-event", "Delete selected event", cmd_delete_event, r);
    register_command!(
        "delete-assume",
        "Delete selected baseline line",
        cmd_delete_assume,
        r
    );
    register_command!(
        "delete-housing",
        "Delete selected housing plan",
        cmd_delete_housing,
        r
    );
    register_command!(
        "export",
        "Export current version's events to CSV (e.g. :export ~/plan.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_plans(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Plans;
    app.refresh_plans(db)?;
    Ok(())
}

fn cmd_events(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Events;
    app.refresh_events(db)?;
    Ok(())
}

fn cmd_monthly(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Monthly;
    app.refresh_monthly(db)?;
    Ok(())
}

fn cmd_versions(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Versions;
    app.refresh_versions(db)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_new_plan(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.reset_wizard();
    app.screen = Screen::NewPlan;
    Ok(())
}

fn cmd_new_version(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(plan_id) = app.active_plan_id else {
        app.set_status("No active plan");
        return Ok(());
    };
    if app.current_version.is_none() {
        app.set_status("Plan has no current version to snapshot");
        return Ok(());
    }

    let label = if args.is_empty() {
        format!("revision {}", app.versions.len() + 1)
    } else {
        args.to_string()
    };

    match db.create_revision(plan_id, &label) {
        Ok(_) => {
            app.refresh_all(db)?;
            app.screen = Screen::Versions;
            app.set_status(format!("Created version '{label}' and made it current"));
        }
        Err(e) => app.set_status(format!("Could not create version: {e}")),
    }
    Ok(())
}

fn cmd_rename_plan(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :rename-plan <new name>");
        return Ok(());
    }
    let Some(plan) = app.plans.get(app.plan_index) else {
        app.set_status("No plan selected");
        return Ok(());
    };
    if let Some(id) = plan.id {
        db.update_plan_name(id, args)?;
        app.refresh_plans(db)?;
        app.set_status(format!("Renamed to: {args}"));
    }
    Ok(())
}

/// `:assume <amount> <income|expense> <label...>`
fn cmd_assume(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let usage = "Usage: :assume <amount> <income|expense> <label>";
    let Some(version_id) = app.current_version_id() else {
        app.set_status("No current version; create a plan first");
        return Ok(());
    };

    let mut parts = args.splitn(3, ' ');
    let amount = parts.next().unwrap_or("");
    let direction = parts.next().unwrap_or("");
    let label = parts.next().unwrap_or("").trim();

    let amount = parse_number_input(amount)
        .filter(|n| n.is_integer())
        .and_then(|n| n.to_i64())
        .filter(|v| *v >= 0);
    let direction = Direction::parse(direction);

    match (amount, direction, label.is_empty()) {
        (Some(amount_yen), Some(direction), false) => {
            db.insert_assumption(&MonthlyAssumption::new(
                version_id,
                label.to_string(),
                amount_yen,
                direction,
            ))?;
            app.refresh_monthly(db)?;
            app.screen = Screen::Monthly;
            app.monthly_view_housing = false;
            app.set_status(format!("Added baseline: {label}"));
        }
        _ => app.set_status(usage),
    }
    Ok(())
}

/// `:housing <amount> <YYYY-MM> <label...>`
fn cmd_housing(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let usage = "Usage: :housing <amount> <YYYY-MM> <label>";
    let Some(version_id) = app.current_version_id() else {
        app.set_status("No current version; create a plan first");
        return Ok(());
    };

    let mut parts = args.splitn(3, ' ');
    let amount = parts.next().unwrap_or("");
    let start_ym = parts.next().unwrap_or("").trim().to_string();
    let label = parts.next().unwrap_or("").trim();

    let amount = parse_number_input(amount)
        .filter(|n| n.is_integer())
        .and_then(|n| n.to_i64())
        .filter(|v| *v >= 0);

    match (amount, is_valid_ym(&start_ym), label.is_empty()) {
        (Some(monthly_cost_yen), true, false) => {
            db.insert_housing(&HousingPlan::new(
                version_id,
                label.to_string(),
                monthly_cost_yen,
                start_ym,
            ))?;
            app.refresh_monthly(db)?;
            app.screen = Screen::Monthly;
            app.monthly_view_housing = true;
            app.set_status(format!("Added housing plan: {label}"));
        }
        _ => app.set_status(usage),
    }
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.screen = Screen::Events;
    app.event_index = 0;
    app.event_scroll = 0;
    app.refresh_events(db)?;
    Ok(())
}

fn cmd_delete_plan(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(plan) = app.plans.get(app.plan_index) else {
        app.set_status("No plan selected");
        return Ok(());
    };
    if let Some(id) = plan.id {
        app.confirm_message = format!("Delete plan '{}' and all its versions?", plan.name);
        app.pending_action = Some(PendingAction::DeletePlan {
            id,
            name: plan.name.clone(),
        });
        app.input_mode = InputMode::Confirm;
    }
    Ok(())
}

fn cmd_delete_version(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(version) = app.versions.get(app.version_index) else {
        app.set_status("No version selected");
        return Ok(());
    };
    if version.is_current {
        app.set_status("Cannot delete the current version; switch first");
        return Ok(());
    }
    if let Some(id) = version.id {
        app.confirm_message = format!("Delete version '{}'?", version.label);
        app.pending_action = Some(PendingAction::DeleteVersion {
            id,
            label: version.label.clone(),
        });
        app.input_mode = InputMode::Confirm;
    }
    Ok(())
}

fn cmd_delete_event(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(event) = app.events.get(app.event_index) else {
        app.set_status("No event selected");
        return Ok(());
    };
    if let Some(id) = event.id {
        app.confirm_message = format!("Delete event '{}'?", event.title);
        app.pending_action = Some(PendingAction::DeleteEvent {
            id,
            title: event.title.clone(),
        });
        app.input_mode = InputMode::Confirm;
    }
    Ok(())
}

fn cmd_delete_assume(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(assumption) = app.assumptions.get(app.assumption_index) else {
        app.set_status("No baseline line selected");
        return Ok(());
    };
    if let Some(id) = assumption.id {
        app.confirm_message = format!("Delete baseline line '{}'?", assumption.label);
        app.pending_action = Some(PendingAction::DeleteAssumption {
            id,
            label: assumption.label.clone(),
        });
        app.input_mode = InputMode::Confirm;
    }
    Ok(())
}

fn cmd_delete_housing(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(housing) = app.housing.get(app.housing_index) else {
        app.set_status("No housing plan selected");
        return Ok(());
    };
    if let Some(id) = housing.id {
        app.confirm_message = format!("Delete housing plan '{}'?", housing.label);
        app.pending_action = Some(PendingAction::DeleteHousing {
            id,
            label: housing.label.clone(),
        });
        app.input_mode = InputMode::Confirm;
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(version) = app.current_version.clone() else {
        app.set_status("No current version to export");
        return Ok(());
    };
    let Some(version_id) = version.id else {
        app.set_status("No current version to export");
        return Ok(());
    };

    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/lifeplan-{}.csv", version.label.replace(' ', "-"))
    } else {
        crate::run::shellexpand(args)
    };

    match db.export_events_csv(&path, version_id) {
        Ok(0) => app.set_status("No events to export"),
        Ok(count) => app.set_status(format!("Exported {count} events to {path}")),
        Err(e) => app.set_status(format!("Export failed: {e}")),
    }
    Ok(())
}
