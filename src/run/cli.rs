use anyhow::Result;

use crate::db::Database;
use crate::models::Plan;
use crate::ui::util::format_yen;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "plans" => cli_plans(db),
        "summary" | "s" => cli_summary(&args[2..], db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("lifeplan {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("LifePlan — local-only life planning tracker");
    println!();
    println!("Usage: lifeplan [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  plans                         List all plans");
    println!("  summary [plan]                Print a plan's current-version summary");
    println!("  export [path]                 Export current version's events to CSV");
    println!("    --plan <name>               Plan to export (default: first plan)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_plans(db: &mut Database) -> Result<()> {
    let plans = db.get_plans()?;
    if plans.is_empty() {
        println!("No plans");
        return Ok(());
    }

    println!("{:<4} {:<24} {:<18} Created", "ID", "Name", "Current version");
    println!("{}", "─".repeat(60));
    for plan in &plans {
        let current = plan
            .id
            .map(|id| db.get_current_version(id))
            .transpose()?
            .flatten()
            .map(|v| v.label)
            .unwrap_or_else(|| "—".into());
        println!(
            "{:<4} {:<24} {:<18} {}",
            plan.id.unwrap_or(0),
            plan.name,
            current,
            plan.created_at.chars().take(10).collect::<String>(),
        );
    }
    Ok(())
}

/// Resolve which plan a CLI command targets: by name if given, else the
/// first plan.
fn resolve_plan(name: Option<&str>, db: &mut Database) -> Result<Plan> {
    let plans = db.get_plans()?;
    if plans.is_empty() {
        anyhow::bail!("No plans yet. Launch the TUI and create one first");
    }
    match name {
        Some(n) => Plan::find_by_name(&plans, n)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Plan '{n}' not found")),
        None => Ok(plans[0].clone()),
    }
}

fn cli_summary(args: &[String], db: &mut Database) -> Result<()> {
    let name = args.first().filter(|a| !a.starts_with('-')).cloned();
    let plan = resolve_plan(name.as_deref(), db)?;
    let plan_id = plan
        .id
        .ok_or_else(|| anyhow::anyhow!("Plan has no ID"))?;

    let Some(version) = db.get_current_version(plan_id)? else {
        anyhow::bail!("Plan '{}' has no current version", plan.name);
    };
    let version_id = version
        .id
        .ok_or_else(|| anyhow::anyhow!("Version has no ID"))?;

    let (base_income, base_expense) = db.get_assumption_totals(version_id)?;
    let (event_income, event_expense) = db.get_event_totals(version_id)?;
    let events = db.get_events(version_id, None)?;
    let income_count = events.iter().filter(|e| e.is_income()).count();
    let expense_count = events.iter().filter(|e| e.is_expense()).count();
    let housing = db.get_housing_plans(version_id)?;

    println!("LifePlan — {} @ {}", plan.name, version.label);
    println!("{}", "─".repeat(44));
    println!("  Baseline income:   {}/mo", format_yen(base_income));
    println!("  Baseline expenses: {}/mo", format_yen(base_expense));
    println!(
        "  Baseline net:      {}/mo",
        format_yen(base_income - base_expense)
    );
    println!(
        "  Events:            {} ({income_count} income, {expense_count} expense)",
        events.len()
    );
    println!("  Event income:      {}", format_yen(event_income));
    println!("  Event expenses:    {}", format_yen(event_expense));

    if !housing.is_empty() {
        println!();
        println!("Housing:");
        for h in &housing {
            println!(
                "  {:<24} {}/mo from {}",
                h.label,
                format_yen(h.monthly_cost_yen),
                h.start_ym
            );
        }
    }

    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    // Parse --plan flag
    let plan_name = args
        .windows(2)
        .find(|w| w[0] == "--plan")
        .map(|w| w[1].clone());

    let plan = resolve_plan(plan_name.as_deref(), db)?;
    let plan_id = plan
        .id
        .ok_or_else(|| anyhow::anyhow!("Plan has no ID"))?;
    let Some(version) = db.get_current_version(plan_id)? else {
        anyhow::bail!("Plan '{}' has no current version", plan.name);
    };
    let version_id = version
        .id
        .ok_or_else(|| anyhow::anyhow!("Version has no ID"))?;

    // Output path is the first non-flag argument
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!(
                "{home}/lifeplan-{}.csv",
                plan.name.to_lowercase().replace(' ', "-")
            )
        });

    let count = db.export_events_csv(&output_path, version_id)?;
    if count == 0 {
        println!("No events in '{}' @ {}", plan.name, version.label);
    } else {
        println!("Exported {count} events to {output_path}");
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
