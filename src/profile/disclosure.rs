//! Per-field disclosure rules for profile reads.
//!
//! Identity keys and profile capabilities are disclosed for every namespace;
//! everything else depends on which namespace the requester addressed.

use super::account::Account;
use super::namespace::IdentityNamespace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeAudience {
    /// The profile owner; hidden badges are included.
    Owner,
    Others,
}

impl BadgeAudience {
    pub const fn for_requester(is_self: bool) -> Self {
        if is_self {
            BadgeAudience::Owner
        } else {
            BadgeAudience::Others
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnrestrictedAccessDisclosure {
    /// Report the account's stored flag.
    Stored,
    /// Always report `false`.
    ForcedFalse,
}

impl UnrestrictedAccessDisclosure {
    pub fn resolve(self, account: &Account) -> bool {
        match self {
            UnrestrictedAccessDisclosure::Stored => account.unrestricted_unidentified_access,
            UnrestrictedAccessDisclosure::ForcedFalse => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisclosureSet {
    pub unrestricted_unidentified_access: UnrestrictedAccessDisclosure,
    pub badges: Option<BadgeAudience>,
    /// Emitted only when the account also holds access key material.
    pub unidentified_access_token: bool,
}

/// Payment addresses are readable only at the account's current version, or
/// at any version while the account has no current version.
pub fn payment_address_visible(account: &Account, requested_version: &str) -> bool {
    account
        .current_profile_version
        .as_deref()
        .is_none_or(|current| current == requested_version)
}

pub fn unversioned_disclosure(namespace: IdentityNamespace, is_self: bool) -> DisclosureSet {
    match namespace {
        IdentityNamespace::Primary => DisclosureSet {
            unrestricted_unidentified_access: UnrestrictedAccessDisclosure::Stored,
            badges: Some(BadgeAudience::for_requester(is_self)),
            unidentified_access_token: true,
        },
        // A truthful flag here could link the pseudonymous identity to the primary one.
        IdentityNamespace::Pseudonymous => DisclosureSet {
            unrestricted_unidentified_access: UnrestrictedAccessDisclosure::ForcedFalse,
            badges: None,
            unidentified_access_token: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::testing::account_with_version;

    #[test]
    fn payment_address_visible_only_at_current_version() {
        let account = account_with_version(Some("v2"));
        assert!(payment_address_visible(&account, "v2"));
        assert!(!payment_address_visible(&account, "v1"));
        assert!(!payment_address_visible(&account, ""));
    }

    #[test]
    fn payment_address_visible_for_any_version_without_current() {
        let account = account_with_version(None);
        assert!(payment_address_visible(&account, "v1"));
        assert!(payment_address_visible(&account, "anything"));
    }

    #[test]
    fn primary_namespace_discloses_badges_and_token() {
        let owner = unversioned_disclosure(IdentityNamespace::Primary, true);
        assert_eq!(owner.badges, Some(BadgeAudience::Owner));
        assert!(owner.unidentified_access_token);
        assert_eq!(
            owner.unrestricted_unidentified_access,
            UnrestrictedAccessDisclosure::Stored
        );

        let other = unversioned_disclosure(IdentityNamespace::Primary, false);
        assert_eq!(other.badges, Some(BadgeAudience::Others));
    }

    #[test]
    fn pseudonymous_namespace_never_reports_unrestricted_access() {
        for is_self in [true, false] {
            let set = unversioned_disclosure(IdentityNamespace::Pseudonymous, is_self);
            assert_eq!(set.badges, None);
            assert!(!set.unidentified_access_token);

            let mut account = account_with_version(None);
            account.unrestricted_unidentified_access = true;
            assert!(!set.unrestricted_unidentified_access.resolve(&account));
        }
    }
}
