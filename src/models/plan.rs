#[derive(Debug, Clone)]
pub struct Plan {
    pub id: Option<i64>,
    pub name: String,
    pub note: String,
    pub created_at: String,
}

impl Plan {
    pub fn new(name: String, note: String) -> Self {
        Self {
            id: None,
            name,
            note,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Find a plan by name (case-insensitive) in a slice.
    pub fn find_by_name<'a>(plans: &'a [Plan], name: &str) -> Option<&'a Plan> {
        let lower = name.to_lowercase();
        plans.iter().find(|p| p.name.to_lowercase() == lower)
    }

    /// Find a plan by ID in a slice.
    pub fn find_by_id(plans: &[Plan], id: i64) -> Option<&Plan> {
        plans.iter().find(|p| p.id == Some(id))
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
