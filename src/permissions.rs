//! Catalog of permission strings a subuser can be granted.

use crate::error::{RepositoryError, Result};

/// Grants every permission.
pub const WILDCARD: &str = "*";

/// Permission groups and their members.
pub const GROUPS: &[(&str, &[&str])] = &[
    (
        "power",
        &["power-start", "power-stop", "power-restart", "power-kill", "send-command"],
    ),
    (
        "subuser",
        &["list-subusers", "view-subuser", "edit-subuser", "create-subuser", "delete-subuser"],
    ),
    (
        "server",
        &["view-allocations", "edit-allocation", "view-startup", "edit-startup"],
    ),
    (
        "database",
        &["view-databases", "reset-db-password", "delete-database", "create-database"],
    ),
    (
        "file",
        &[
            "access-sftp",
            "list-files",
            "edit-files",
            "save-files",
            "move-files",
            "copy-files",
            "compress-files",
            "decompress-files",
            "create-files",
            "upload-files",
            "delete-files",
            "download-files",
        ],
    ),
    (
        "task",
        &[
            "list-schedules",
            "view-schedule",
            "toggle-schedule",
            "queue-schedule",
            "edit-schedule",
            "create-schedule",
            "delete-schedule",
        ],
    ),
];

/// Every known permission, in catalog order.
pub fn all() -> impl Iterator<Item = &'static str> {
    GROUPS.iter().flat_map(|(_, members)| members.iter().copied())
}

/// Members of a group, if the group exists.
pub fn group(name: &str) -> Option<&'static [&'static str]> {
    GROUPS.iter().find(|(group, _)| *group == name).map(|(_, members)| *members)
}

pub fn is_known(name: &str) -> bool {
    name == WILDCARD || all().any(|known| known == name)
}

/// Reject the first permission that is not in the catalog.
pub fn validate<'a, I>(permissions: I) -> Result<()>
where
    I: IntoIterator<Item = &'a String>,
{
    match permissions.into_iter().find(|name| !is_known(name)) {
        Some(unknown) => Err(RepositoryError::InvalidPermission(unknown.clone())),
        None => Ok(()),
    }
}
