use anyhow::Result;
use chrono::Local;

use crate::db::Database;
use crate::models::*;
use crate::ui::form::EventForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Plans,
    NewPlan,
    Events,
    Monthly,
    Versions,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Plans,
            Self::NewPlan,
            Self::Events,
            Self::Monthly,
            Self::Versions,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plans => write!(f, "Plans"),
            Self::NewPlan => write!(f, "New Plan"),
            Self::Events => write!(f, "Events"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Versions => write!(f, "Versions"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Form => write!(f, "FORM"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeletePlan { id: i64, name: String },
    DeleteVersion { id: i64, label: String },
    DeleteEvent { id: i64, title: String },
    DeleteAssumption { id: i64, label: String },
    DeleteHousing { id: i64, label: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WizardStep {
    Name,
    Baseline,
    Confirm,
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "Name"),
            Self::Baseline => write!(f, "Baseline"),
            Self::Confirm => write!(f, "Confirm"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    /// Default start month offered to new drafts: the current month.
    pub(crate) default_start_ym: String,

    // Plans
    pub(crate) plans: Vec<Plan>,
    pub(crate) plan_index: usize,
    pub(crate) plan_scroll: usize,
    pub(crate) active_plan_id: Option<i64>,

    // Current revision of the active plan; None blocks event creation.
    pub(crate) current_version: Option<PlanVersion>,

    // Versions
    pub(crate) versions: Vec<PlanVersion>,
    pub(crate) version_index: usize,
    pub(crate) version_scroll: usize,
    pub(crate) version_event_counts: Vec<i64>,

    // Events
    pub(crate) events: Vec<LifeEvent>,
    pub(crate) event_index: usize,
    pub(crate) event_scroll: usize,
    pub(crate) event_totals: (i64, i64),
    pub(crate) event_form: Option<EventForm>,

    // Monthly assumptions / housing
    pub(crate) assumptions: Vec<MonthlyAssumption>,
    pub(crate) assumption_index: usize,
    pub(crate) assumption_scroll: usize,
    pub(crate) assumption_totals: (i64, i64),
    pub(crate) housing: Vec<HousingPlan>,
    pub(crate) housing_index: usize,
    pub(crate) housing_scroll: usize,
    pub(crate) monthly_view_housing: bool,

    // New-plan wizard
    pub(crate) wizard_step: WizardStep,
    pub(crate) wizard_field: usize,
    pub(crate) wizard_name: String,
    pub(crate) wizard_income: String,
    pub(crate) wizard_living: String,
    pub(crate) wizard_housing: String,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        let default_start_ym = Local::now().format("%Y-%m").to_string();

        Self {
            running: true,
            screen: Screen::Plans,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,
            default_start_ym,

            plans: Vec::new(),
            plan_index: 0,
            plan_scroll: 0,
            active_plan_id: None,

            current_version: None,

            versions: Vec::new(),
            version_index: 0,
            version_scroll: 0,
            version_event_counts: Vec::new(),

            events: Vec::new(),
            event_index: 0,
            event_scroll: 0,
            event_totals: (0, 0),
            event_form: None,

            assumptions: Vec::new(),
            assumption_index: 0,
            assumption_scroll: 0,
            assumption_totals: (0, 0),
            housing: Vec::new(),
            housing_index: 0,
            housing_scroll: 0,
            monthly_view_housing: false,

            wizard_step: WizardStep::Name,
            wizard_field: 0,
            wizard_name: String::new(),
            wizard_income: String::new(),
            wizard_living: String::new(),
            wizard_housing: String::new(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn current_version_id(&self) -> Option<i64> {
        self.current_version.as_ref().and_then(|v| v.id)
    }

    pub(crate) fn active_plan_name(&self) -> Option<&str> {
        self.active_plan_id
            .and_then(|id| Plan::find_by_id(&self.plans, id))
            .map(|p| p.name.as_str())
    }

    pub(crate) fn refresh_plans(&mut self, db: &Database) -> Result<()> {
        self.plans = db.get_plans()?;
        if self.plan_index >= self.plans.len() && !self.plans.is_empty() {
            self.plan_index = self.plans.len() - 1;
        }

        // Keep the active plan valid; fall back to the first plan.
        let still_there = self
            .active_plan_id
            .is_some_and(|id| Plan::find_by_id(&self.plans, id).is_some());
        if !still_there {
            self.active_plan_id = self.plans.first().and_then(|p| p.id);
        }
        self.refresh_current_version(db)
    }

    fn refresh_current_version(&mut self, db: &Database) -> Result<()> {
        self.current_version = match self.active_plan_id {
            Some(plan_id) => db.get_current_version(plan_id)?,
            None => None,
        };
        Ok(())
    }

    pub(crate) fn refresh_versions(&mut self, db: &Database) -> Result<()> {
        match self.active_plan_id {
            Some(plan_id) => {
                self.versions = db.get_versions(plan_id)?;
                let mut counts = Vec::with_capacity(self.versions.len());
                for version in &self.versions {
                    counts.push(match version.id {
                        Some(id) => db.get_event_count(id)?,
                        None => 0,
                    });
                }
                self.version_event_counts = counts;
            }
            None => {
                self.versions.clear();
                self.version_event_counts.clear();
            }
        }
        if self.version_index >= self.versions.len() && !self.versions.is_empty() {
            self.version_index = self.versions.len() - 1;
        }
        Ok(())
    }

    pub(crate) fn refresh_events(&mut self, db: &Database) -> Result<()> {
        match self.current_version_id() {
            Some(version_id) => {
                let search = if self.search_input.is_empty() {
                    None
                } else {
                    Some(self.search_input.as_str())
                };
                self.events = db.get_events(version_id, search)?;
                self.event_totals = db.get_event_totals(version_id)?;
            }
            None => {
                self.events.clear();
                self.event_totals = (0, 0);
            }
        }
        if self.event_index >= self.events.len() && !self.events.is_empty() {
            self.event_index = self.events.len() - 1;
        }
        Ok(())
    }

    pub(crate) fn refresh_monthly(&mut self, db: &Database) -> Result<()> {
        match self.current_version_id() {
            Some(version_id) => {
                self.assumptions = db.get_assumptions(version_id)?;
                self.assumption_totals = db.get_assumption_totals(version_id)?;
                self.housing = db.get_housing_plans(version_id)?;
            }
            None => {
                self.assumptions.clear();
                self.assumption_totals = (0, 0);
                self.housing.clear();
            }
        }
        if self.assumption_index >= self.assumptions.len() && !self.assumptions.is_empty() {
            self.assumption_index = self.assumptions.len() - 1;
        }
        if self.housing_index >= self.housing.len() && !self.housing.is_empty() {
            self.housing_index = self.housing.len() - 1;
        }
        Ok(())
    }

    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.refresh_plans(db)?;
        self.refresh_versions(db)?;
        self.refresh_events(db)?;
        self.refresh_monthly(db)?;
        Ok(())
    }

    /// Make a plan the active one and reload everything scoped to its
    /// current version.
    pub(crate) fn activate_plan(&mut self, db: &Database, plan_id: i64) -> Result<()> {
        self.active_plan_id = Some(plan_id);
        self.version_index = 0;
        self.version_scroll = 0;
        self.event_index = 0;
        self.event_scroll = 0;
        self.refresh_current_version(db)?;
        self.refresh_versions(db)?;
        self.refresh_events(db)?;
        self.refresh_monthly(db)?;
        Ok(())
    }

    pub(crate) fn reset_wizard(&mut self) {
        self.wizard_step = WizardStep::Name;
        self.wizard_field = 0;
        self.wizard_name.clear();
        self.wizard_income.clear();
        self.wizard_living.clear();
        self.wizard_housing.clear();
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
