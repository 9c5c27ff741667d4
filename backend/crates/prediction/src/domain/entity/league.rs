//! League Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{LeagueId, display_name::DisplayName};

/// League entity
///
/// Reference data. Names are unique across leagues.
#[derive(Debug, Clone)]
pub struct League {
    pub league_id: LeagueId,
    pub name: DisplayName,
    /// Identifier in an external data source, if any
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl League {
    pub fn new(name: DisplayName, external_id: Option<String>) -> Self {
        Self {
            league_id: LeagueId::new(),
            name,
            external_id,
            created_at: Utc::now(),
        }
    }
}
