use rust_decimal::Decimal;

use crate::draft::{preview, validate, DraftField, DraftPreview, LifeEventDraft, Validation};
use crate::models::{Cadence, Direction, LifeEvent};

/// Which input the event entry form has focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum EventField {
    #[default]
    Title,
    EventType,
    StartYm,
    Amount,
    Direction,
    Cadence,
    Duration,
}

impl EventField {
    pub(crate) fn all() -> &'static [EventField] {
        &[
            Self::Title,
            Self::EventType,
            Self::StartYm,
            Self::Amount,
            Self::Direction,
            Self::Cadence,
            Self::Duration,
        ]
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Self::Title => Self::EventType,
            Self::EventType => Self::StartYm,
            Self::StartYm => Self::Amount,
            Self::Amount => Self::Direction,
            Self::Direction => Self::Cadence,
            Self::Cadence => Self::Duration,
            Self::Duration => Self::Title,
        }
    }

    pub(crate) fn prev(self) -> Self {
        match self {
            Self::Title => Self::Duration,
            Self::EventType => Self::Title,
            Self::StartYm => Self::EventType,
            Self::Amount => Self::StartYm,
            Self::Direction => Self::Amount,
            Self::Cadence => Self::Direction,
            Self::Duration => Self::Cadence,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::EventType => "Type",
            Self::StartYm => "Start (YYYY-MM)",
            Self::Amount => "Amount (yen)",
            Self::Direction => "Direction",
            Self::Cadence => "Cadence",
            Self::Duration => "Duration (months)",
        }
    }

    /// The validation key for this input. The free-text type field has no
    /// validation of its own.
    fn draft_field(self) -> Option<DraftField> {
        match self {
            Self::Title => Some(DraftField::Title),
            Self::EventType => None,
            Self::StartYm => Some(DraftField::StartYm),
            Self::Amount => Some(DraftField::AmountYen),
            Self::Direction => Some(DraftField::Direction),
            Self::Cadence => Some(DraftField::Cadence),
            Self::Duration => Some(DraftField::DurationMonths),
        }
    }
}

/// Why a submit attempt was refused without reaching the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubmitBlock {
    /// The draft has field errors.
    Invalid,
    /// The active plan has no current version to attach the event to.
    NoCurrentVersion,
    /// A previous create is still outstanding.
    InFlight,
}

/// State of the life-event entry overlay. Validation re-runs on every
/// edit, so `validation` always reflects the draft as typed.
#[derive(Debug, Clone)]
pub(crate) struct EventForm {
    pub(crate) draft: LifeEventDraft,
    pub(crate) focused: EventField,
    pub(crate) validation: Validation,
    submitting: bool,
}

impl EventForm {
    /// A fresh form. Direction and cadence start on their most common
    /// values; everything else starts blank.
    pub(crate) fn new(start_ym: String) -> Self {
        let draft = LifeEventDraft {
            start_ym,
            direction: Some(Direction::Expense),
            cadence: Some(Cadence::Once),
            ..Default::default()
        };
        let validation = validate(&draft);
        Self {
            draft,
            focused: EventField::default(),
            validation,
            submitting: false,
        }
    }

    pub(crate) fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub(crate) fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focused {
            EventField::Title => Some(&mut self.draft.title),
            EventField::EventType => Some(&mut self.draft.event_type),
            EventField::StartYm => Some(&mut self.draft.start_ym),
            EventField::Amount => Some(&mut self.draft.amount_yen),
            EventField::Duration => Some(&mut self.draft.duration_months),
            EventField::Direction | EventField::Cadence => None,
        }
    }

    pub(crate) fn insert_char(&mut self, c: char) {
        match self.focused {
            EventField::Direction | EventField::Cadence => {
                if c == ' ' {
                    self.cycle(1);
                }
            }
            _ => {
                if let Some(text) = self.focused_text() {
                    text.push(c);
                    self.revalidate();
                }
            }
        }
    }

    pub(crate) fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
            self.revalidate();
        }
    }

    /// Step the focused enum field forwards or backwards.
    pub(crate) fn cycle(&mut self, delta: i32) {
        match self.focused {
            EventField::Direction => {
                self.draft.direction = Some(cycle_enum(Direction::all(), self.draft.direction, delta));
            }
            EventField::Cadence => {
                self.draft.cadence = Some(cycle_enum(Cadence::all(), self.draft.cadence, delta));
            }
            _ => return,
        }
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.validation = validate(&self.draft);
    }

    pub(crate) fn field_error(&self, field: EventField) -> Option<&'static str> {
        self.validation.error(field.draft_field()?)
    }

    pub(crate) fn preview(&self) -> DraftPreview {
        preview(&self.draft)
    }

    pub(crate) fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Gate a submit attempt. On success the returned event is the
    /// normalized payload for the repository and the form is marked
    /// in-flight so a second attempt is suppressed until `finish_submit`.
    pub(crate) fn begin_submit(
        &mut self,
        version_id: Option<i64>,
    ) -> Result<LifeEvent, SubmitBlock> {
        if self.submitting {
            return Err(SubmitBlock::InFlight);
        }
        let Some(version_id) = version_id else {
            return Err(SubmitBlock::NoCurrentVersion);
        };
        self.revalidate();
        match self.draft.to_event(version_id) {
            Some(event) => {
                self.submitting = true;
                Ok(event)
            }
            None => Err(SubmitBlock::Invalid),
        }
    }

    /// Settle an outstanding create. Success resets the form for the next
    /// entry; failure leaves the draft exactly as typed so the user can
    /// retry without re-entering anything.
    pub(crate) fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            let start_ym = self.draft.start_ym.clone();
            *self = Self::new(start_ym);
        }
    }
}

fn cycle_enum<T: Copy + PartialEq>(all: &[T], current: Option<T>, delta: i32) -> T {
    let idx = current.and_then(|c| all.iter().position(|x| *x == c));
    let next = match idx {
        None => 0,
        Some(i) => {
            if delta >= 0 {
                (i + 1) % all.len()
            } else if i == 0 {
                all.len() - 1
            } else {
                i - 1
            }
        }
    };
    all[next]
}

/// Validation for the wizard's baseline amounts: blank is missing, and
/// the value must be a whole, non-negative number of yen.
pub(crate) fn numeric_field_error(raw: &str) -> Option<&'static str> {
    match crate::draft::parse_number_input(raw) {
        None => Some("required"),
        Some(n) if !n.is_integer() => Some("must be a whole number"),
        Some(n) if n < Decimal::ZERO => Some("must be 0 or more"),
        Some(_) => None,
    }
}
