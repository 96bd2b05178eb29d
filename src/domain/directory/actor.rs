//! Actor entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ActorId;
use crate::domain::validation::PhoneNumber;

use super::Role;

/// A registered participant, immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub role: Role,
    pub name: String,
    pub phone: PhoneNumber,
}

impl Actor {
    pub fn new(id: ActorId, role: Role, name: impl Into<String>, phone: PhoneNumber) -> Self {
        Self {
            id,
            role,
            name: name.into(),
            phone,
        }
    }

    /// Returns true if the actor plays the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_roster_yaml() {
        let yaml = r#"
id: "1001"
role: approver
name: Olga
phone: "+7 912 000 11 22"
"#;
        let actor: Actor = serde_yaml::from_str(yaml).unwrap();
        assert!(actor.has_role(Role::Approver));
        assert_eq!(actor.phone.as_str(), "79120001122");
    }
}
