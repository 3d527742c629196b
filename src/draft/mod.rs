mod derive;
mod validate;

pub(crate) use derive::{add_months, preview, DraftPreview};
pub(crate) use validate::{validate, DraftField, Validation};

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{Cadence, Direction, LifeEvent};

/// Raw, per-keystroke state of the life-event entry form. Text fields hold
/// whatever the user typed; nothing is normalized until `to_event`.
#[derive(Debug, Clone, Default)]
pub(crate) struct LifeEventDraft {
    pub(crate) title: String,
    pub(crate) event_type: String,
    pub(crate) start_ym: String,
    pub(crate) amount_yen: String,
    pub(crate) direction: Option<Direction>,
    pub(crate) cadence: Option<Cadence>,
    pub(crate) duration_months: String,
}

static YM_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").ok());

/// `YYYY-MM` with a zero-padded month between 01 and 12.
pub(crate) fn is_valid_ym(ym: &str) -> bool {
    YM_RE.as_ref().is_some_and(|re| re.is_match(ym))
}

/// Permissive numeric input shared by the validator and the preview
/// calculator: trims, then treats blank and non-numeric identically as
/// absent. Garbage never coerces to zero.
pub(crate) fn parse_number_input(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

impl LifeEventDraft {
    /// Build the normalized create payload for the repository. `None`
    /// unless the draft validates. One-off events always store a duration
    /// of exactly 1, whatever is left in the duration field.
    pub(crate) fn to_event(&self, version_id: i64) -> Option<LifeEvent> {
        if !validate(self).is_valid() {
            return None;
        }
        let direction = self.direction?;
        let cadence = self.cadence?;
        let amount_yen = parse_number_input(&self.amount_yen)?.to_i64()?;
        let duration_months = match cadence {
            Cadence::Once => 1,
            Cadence::Monthly => parse_number_input(&self.duration_months)?.to_i64()?,
        };
        let event_type = match self.event_type.trim() {
            "" => "other".to_string(),
            t => t.to_string(),
        };
        Some(LifeEvent {
            id: None,
            version_id,
            title: self.title.trim().to_string(),
            event_type,
            start_ym: self.start_ym.trim().to_string(),
            cadence,
            duration_months,
            amount_yen,
            direction,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
