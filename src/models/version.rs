/// A revision of a plan. Exactly one version per plan carries
/// `is_current = true`; the repository keeps that invariant when switching.
#[derive(Debug, Clone)]
pub struct PlanVersion {
    pub id: Option<i64>,
    pub plan_id: i64,
    pub label: String,
    pub is_current: bool,
    pub created_at: String,
}

impl PlanVersion {
    pub fn new(plan_id: i64, label: String) -> Self {
        Self {
            id: None,
            plan_id,
            label,
            is_current: false,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl std::fmt::Display for PlanVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}
