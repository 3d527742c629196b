use super::Direction;

/// A recurring baseline line item for a plan version, e.g. salary or
/// living costs, applied every month of the projection.
#[derive(Debug, Clone)]
pub struct MonthlyAssumption {
    pub id: Option<i64>,
    pub version_id: i64,
    pub label: String,
    pub amount_yen: i64,
    pub direction: Direction,
}

impl MonthlyAssumption {
    pub fn new(version_id: i64, label: String, amount_yen: i64, direction: Direction) -> Self {
        Self {
            id: None,
            version_id,
            label,
            amount_yen,
            direction,
        }
    }

    pub fn signed_amount_yen(&self) -> i64 {
        self.amount_yen * self.direction.signum()
    }
}
