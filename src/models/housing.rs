/// A housing arrangement for a plan version: what it costs per month and
/// from which month it applies.
#[derive(Debug, Clone)]
pub struct HousingPlan {
    pub id: Option<i64>,
    pub version_id: i64,
    pub label: String,
    pub monthly_cost_yen: i64,
    pub start_ym: String,
}

impl HousingPlan {
    pub fn new(version_id: i64, label: String, monthly_cost_yen: i64, start_ym: String) -> Self {
        Self {
            id: None,
            version_id,
            label,
            monthly_cost_yen,
            start_ym,
        }
    }
}
