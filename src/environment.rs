//! Archer environment descriptor
//!
//! Identifies one Archer instance taking part in a comparison. Credentials
//! and connection handling live with the caller, not here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single Archer environment (e.g. "Production", "UAT")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: Uuid,
    pub display_name: String,
    pub base_url: String,
    pub instance_name: String,
}

impl Environment {
    /// Create a new environment with a generated id
    pub fn new(
        display_name: impl Into<String>,
        base_url: impl Into<String>,
        instance_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            base_url: base_url.into(),
            instance_name: instance_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_environment_gets_unique_id() {
        let a = Environment::new("Production", "https://archer.example.com", "Default");
        let b = Environment::new("Production", "https://archer.example.com", "Default");
        assert_ne!(a.id, b.id);
        assert_eq!(a.display_name, "Production");
    }
}
