//! Team Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{TeamId, display_name::DisplayName};

/// Team entity
#[derive(Debug, Clone)]
pub struct Team {
    pub team_id: TeamId,
    pub name: DisplayName,
    /// Identifier in an external data source, if any
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: DisplayName, external_id: Option<String>) -> Self {
        Self {
            team_id: TeamId::new(),
            name,
            external_id,
            created_at: Utc::now(),
        }
    }
}
