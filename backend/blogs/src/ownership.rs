//! # Ownership
//!
//! Only the user who created a blog may change or delete it.
//!
//! Ids reach the check from different places: typed ids from the store, raw strings from
//! token claims. Both sides are normalized to one canonical string before comparing, so
//! `5A422A85...`, `{5a422a85-...}` and `urn:uuid:5a422a85-...` all name the same owner.
use std::fmt::Display;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{requester} is not the owner of this blog")]
pub struct OwnershipError {
    pub owner: String,
    pub requester: String,
}

/// Canonical string form of an id.
///
/// Anything parsing as a UUID becomes lowercase hyphenated, everything else is only trimmed.
pub fn normalize_id(raw: &str) -> String {
    let trimmed = raw.trim();

    Uuid::parse_str(trimmed)
        .map(|id| id.hyphenated().to_string())
        .unwrap_or_else(|_| trimmed.to_string())
}

pub fn is_owner<O, R>(owner: &O, requester: &R) -> bool
where
    O: Display + ?Sized,
    R: Display + ?Sized,
{
    normalize_id(&owner.to_string()) == normalize_id(&requester.to_string())
}

pub fn ensure_owner<O, R>(owner: &O, requester: &R) -> Result<(), OwnershipError>
where
    O: Display + ?Sized,
    R: Display + ?Sized,
{
    if is_owner(owner, requester) {
        return Ok(());
    }

    Err(OwnershipError {
        owner: normalize_id(&owner.to_string()),
        requester: normalize_id(&requester.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    const ID: &str = "5a422a85-1b54-4a67-8234-d17f71b54a67";

    #[test]
    fn test_same_id_different_forms() {
        let typed: UserId = ID.parse().unwrap();

        assert!(is_owner(&typed, ID));
        assert!(is_owner(&typed, "5A422A85-1B54-4A67-8234-D17F71B54A67"));
        assert!(is_owner(&typed, "5a422a851b54a6768234d17f71b54a67"));
        assert!(is_owner(&typed, "{5a422a85-1b54-4a67-8234-d17f71b54a67}"));
        assert!(is_owner(&typed, "urn:uuid:5a422a85-1b54-4a67-8234-d17f71b54a67"));
        assert!(is_owner(ID, &format!("  {ID} ")));
    }

    #[test]
    fn test_different_ids() {
        let owner = UserId::generate();
        let other = UserId::generate();

        assert!(!is_owner(&owner, &other));
        assert!(!is_owner(&owner, ""));
        assert!(!is_owner("root", "Root"));
    }

    #[test]
    fn test_ensure_owner() {
        let owner: UserId = ID.parse().unwrap();
        assert_eq!(ensure_owner(&owner, ID), Ok(()));

        let other = UserId::generate();
        let err = ensure_owner(&owner, &other).unwrap_err();
        assert_eq!(err.owner, ID);
        assert_eq!(err.requester, other.to_string());
    }

    #[test]
    fn test_normalize_non_uuid() {
        assert_eq!(normalize_id(" 1234567890 "), "1234567890");
        assert_eq!(normalize_id(ID), ID);
    }
}
