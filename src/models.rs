//! Subuser aggregate with explicit relation load state.
//!
//! A [`Subuser`] wraps the `subusers` row and carries one [`Loaded`] slot per
//! relation. A slot is either `NotLoaded` or holds whatever the last fetch
//! returned, so "is this relation attached" is a plain field check.

use serde::{Serialize, Serializer};

use crate::entities::{permission, server, subuser, user};

/// Load state of a single relation on an aggregate.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Loaded<T> {
    #[default]
    NotLoaded,
    Loaded(T),
}

impl<T> Loaded<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_not_loaded(&self) -> bool {
        !self.is_loaded()
    }

    /// Borrow the attached value, if any.
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::NotLoaded => None,
        }
    }

    pub fn into_inner(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::NotLoaded => None,
        }
    }
}

impl<T: Serialize> Serialize for Loaded<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Loaded(value) => value.serialize(serializer),
            Self::NotLoaded => serializer.serialize_none(),
        }
    }
}

/// Relations that can be attached to a [`Subuser`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SubuserRelation {
    User,
    Server,
    Permissions,
}

impl SubuserRelation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Server => "server",
            Self::Permissions => "permissions",
        }
    }
}

/// A subuser row plus whichever relations have been fetched for it.
///
/// `user` and `server` are `Option` inside the slot because a belongs-to
/// fetch can legitimately come back empty if the parent row is gone.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Subuser {
    #[serde(flatten)]
    pub model: subuser::Model,
    #[serde(skip_serializing_if = "Loaded::is_not_loaded")]
    pub user: Loaded<Option<user::Model>>,
    #[serde(skip_serializing_if = "Loaded::is_not_loaded")]
    pub server: Loaded<Option<server::Model>>,
    #[serde(skip_serializing_if = "Loaded::is_not_loaded")]
    pub permissions: Loaded<Vec<permission::Model>>,
}

impl Subuser {
    pub fn id(&self) -> i32 {
        self.model.id
    }

    pub fn user_id(&self) -> i32 {
        self.model.user_id
    }

    pub fn server_id(&self) -> i32 {
        self.model.server_id
    }

    /// Whether the given relation is currently attached.
    pub fn is_loaded(&self, relation: SubuserRelation) -> bool {
        match relation {
            SubuserRelation::User => self.user.is_loaded(),
            SubuserRelation::Server => self.server.is_loaded(),
            SubuserRelation::Permissions => self.permissions.is_loaded(),
        }
    }

    /// Relations currently attached, in declaration order.
    pub fn loaded_relations(&self) -> Vec<SubuserRelation> {
        [SubuserRelation::User, SubuserRelation::Server, SubuserRelation::Permissions]
            .into_iter()
            .filter(|relation| self.is_loaded(*relation))
            .collect()
    }

    /// Permission strings, or `None` when permissions were never loaded.
    pub fn permission_names(&self) -> Option<Vec<&str>> {
        self.permissions
            .get()
            .map(|rows| rows.iter().map(|p| p.permission.as_str()).collect())
    }

    /// True if the loaded permission set grants `name` (or the wildcard).
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions
            .get()
            .is_some_and(|rows| rows.iter().any(|p| p.permission == name || p.permission == "*"))
    }
}

impl From<subuser::Model> for Subuser {
    fn from(model: subuser::Model) -> Self {
        Self {
            model,
            user: Loaded::NotLoaded,
            server: Loaded::NotLoaded,
            permissions: Loaded::NotLoaded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn bare() -> Subuser {
        let now = Utc::now();
        Subuser::from(subuser::Model {
            id: 7,
            user_id: 3,
            server_id: 11,
            created_at: now,
            updated_at: now,
        })
    }

    #[test]
    fn test_new_aggregate_has_nothing_loaded() {
        let subuser = bare();
        assert!(subuser.loaded_relations().is_empty());
        assert!(subuser.permission_names().is_none());
        assert!(!subuser.has_permission("power-start"));
    }

    #[test]
    fn test_is_loaded_tracks_each_slot() {
        let mut subuser = bare();
        subuser.permissions = Loaded::Loaded(vec![permission::Model {
            id: 1,
            subuser_id: 7,
            permission: "power-start".to_string(),
        }]);
        subuser.server = Loaded::Loaded(None);

        assert!(subuser.is_loaded(SubuserRelation::Permissions));
        assert!(subuser.is_loaded(SubuserRelation::Server));
        assert!(!subuser.is_loaded(SubuserRelation::User));
        assert_eq!(
            subuser.loaded_relations(),
            vec![SubuserRelation::Server, SubuserRelation::Permissions]
        );
        assert_eq!(subuser.permission_names(), Some(vec!["power-start"]));
        assert!(subuser.has_permission("power-start"));
        assert!(!subuser.has_permission("power-stop"));
    }

    #[test]
    fn test_wildcard_permission() {
        let mut subuser = bare();
        subuser.permissions = Loaded::Loaded(vec![permission::Model {
            id: 1,
            subuser_id: 7,
            permission: "*".to_string(),
        }]);
        assert!(subuser.has_permission("delete-files"));
    }

    #[test]
    fn test_serialization_skips_unloaded_relations() {
        let mut subuser = bare();
        subuser.permissions = Loaded::Loaded(Vec::new());

        let json = serde_json::to_value(&subuser).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["server_id"], 11);
        assert!(json["permissions"].as_array().unwrap().is_empty());
        assert!(json.get("user").is_none());
        assert!(json.get("server").is_none());
    }
}
