//! Well-known role names and the [`Role`] enum.
//!
//! The string constants must match the seed data in
//! `20260301000001_create_roles_and_users.sql`.

use serde::{Deserialize, Serialize};

pub const ROLE_FARMER: &str = "farmer";
pub const ROLE_VETERINARIAN: &str = "veterinarian";
pub const ROLE_EXTENSION_WORKER: &str = "extension_worker";
pub const ROLE_REGULATOR: &str = "regulator";
pub const ROLE_RESEARCHER: &str = "researcher";

/// All valid role names, in seed order (role id 1..=5).
pub const VALID_ROLES: &[&str] = &[
    ROLE_FARMER,
    ROLE_VETERINARIAN,
    ROLE_EXTENSION_WORKER,
    ROLE_REGULATOR,
    ROLE_RESEARCHER,
];

/// A user's role. Every account has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Farmer,
    Veterinarian,
    ExtensionWorker,
    Regulator,
    Researcher,
}

impl Role {
    /// Convert from a database / token string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_FARMER => Ok(Self::Farmer),
            ROLE_VETERINARIAN => Ok(Self::Veterinarian),
            ROLE_EXTENSION_WORKER => Ok(Self::ExtensionWorker),
            ROLE_REGULATOR => Ok(Self::Regulator),
            ROLE_RESEARCHER => Ok(Self::Researcher),
            _ => Err(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Farmer => ROLE_FARMER,
            Self::Veterinarian => ROLE_VETERINARIAN,
            Self::ExtensionWorker => ROLE_EXTENSION_WORKER,
            Self::Regulator => ROLE_REGULATOR,
            Self::Researcher => ROLE_RESEARCHER,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_valid_role_round_trips() {
        for name in VALID_ROLES {
            let role = Role::from_str_value(name).expect("valid role should parse");
            assert_eq!(role.as_str(), *name);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = Role::from_str_value("admin").unwrap_err();
        assert!(err.contains("Invalid role 'admin'"));
        assert!(err.contains("extension_worker"));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::ExtensionWorker).unwrap();
        assert_eq!(json, "\"extension_worker\"");
    }
}
