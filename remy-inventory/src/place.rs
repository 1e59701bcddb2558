use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Membership of a profile in a place. At most one membership per profile
/// is flagged as the default; that place is used when a caller does not
/// name one explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceMember {
    pub profile_id: Uuid,
    pub is_default: bool,
}

/// A household/location. Owns exactly one inventory ledger (stored under
/// the place id) and a set of member profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<PlaceMember>,
}

impl Place {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn add_member(&mut self, profile_id: Uuid, is_default: bool) {
        self.members.push(PlaceMember {
            profile_id,
            is_default,
        });
    }

    pub fn has_member(&self, profile_id: Uuid) -> bool {
        self.members.iter().any(|m| m.profile_id == profile_id)
    }

    pub fn is_default_for(&self, profile_id: Uuid) -> bool {
        self.members
            .iter()
            .any(|m| m.profile_id == profile_id && m.is_default)
    }
}
