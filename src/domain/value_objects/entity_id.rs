use serde::{Deserialize, Serialize};
use std::fmt;

const SCOPE_SEPARATOR: char = ':';

/// Opaque identifier of a rendered resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// Composite id for resources addressed by two keys, e.g. a user and a feature.
    pub fn scoped(scope: &str, id: &str) -> Result<Self, String> {
        if scope.contains(SCOPE_SEPARATOR) {
            return Err(format!("Entity scope cannot contain `{SCOPE_SEPARATOR}`"));
        }
        Self::validate(scope)?;
        Self::validate(id)?;
        Ok(Self(format!("{scope}{SCOPE_SEPARATOR}{id}")))
    }

    pub fn split_scope(&self) -> Option<(&str, &str)> {
        self.0.split_once(SCOPE_SEPARATOR)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err("Entity ID cannot be empty".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_ids() {
        assert!(EntityId::new("  ".into()).is_err());
        assert!(EntityId::scoped("U1", "").is_err());
    }

    #[test]
    fn scoped_ids_split_back_into_parts() {
        let id = EntityId::scoped("U1", "dark_mode").unwrap();
        assert_eq!(id.as_str(), "U1:dark_mode");
        assert_eq!(id.split_scope(), Some(("U1", "dark_mode")));
    }

    #[test]
    fn scope_cannot_contain_separator() {
        assert!(EntityId::scoped("a:b", "c").is_err());
    }

    #[test]
    fn numeric_ids_are_rendered_as_strings() {
        assert_eq!(EntityId::from(42).as_str(), "42");
        assert!(EntityId::from(42).split_scope().is_none());
    }
}
