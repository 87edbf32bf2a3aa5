use serde::{Deserialize, Serialize};
use sqlx::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "userrole", rename_all = "lowercase")]
pub(crate) enum UserRole {
    Student,
    Teacher,
    Admin,
}

impl UserRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }
}

/// Discriminator stored in `resources.kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "resourcekind")]
pub(crate) enum ResourceKind {
    CodeExample,
    Quiz,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(UserRole::Teacher).unwrap(), "teacher");
        assert_eq!(UserRole::Admin.as_str(), "admin");
    }

    #[test]
    fn resource_kind_keeps_variant_names() {
        assert_eq!(serde_json::to_value(ResourceKind::CodeExample).unwrap(), "CodeExample");
        let parsed: ResourceKind = serde_json::from_str("\"Quiz\"").unwrap();
        assert_eq!(parsed, ResourceKind::Quiz);
    }
}
