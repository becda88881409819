//! Static authorization registry.

use parakeet_core::UserId;
use std::collections::HashSet;
use tracing::warn;

/// Set-membership authorization for bot users.
///
/// Admin identifiers are folded into the authorized set, so an id listed
/// only under the admin list can still talk to the bot.
#[derive(Debug, Clone)]
pub struct AuthzRegistry {
    authorized: HashSet<UserId>,
    admins: HashSet<UserId>,
}

impl AuthzRegistry {
    /// Builds the registry from the configured id lists.
    ///
    /// An empty authorized list is valid but almost certainly a
    /// misconfiguration, so it is logged as a warning rather than
    /// treated as fatal.
    #[must_use]
    pub fn new(authorized: &[UserId], admins: &[UserId]) -> Self {
        if authorized.is_empty() && admins.is_empty() {
            warn!("authorized user list is empty; every incoming message will be rejected");
        }

        let admins: HashSet<UserId> = admins.iter().copied().collect();
        let mut authorized: HashSet<UserId> = authorized.iter().copied().collect();
        authorized.extend(admins.iter().copied());

        Self { authorized, admins }
    }

    /// Returns true if the user may interact with the bot.
    #[must_use]
    pub fn is_authorized(&self, user: UserId) -> bool {
        self.authorized.contains(&user)
    }

    /// Returns true if the user has admin privileges.
    #[must_use]
    pub fn is_admin(&self, user: UserId) -> bool {
        self.admins.contains(&user)
    }

    /// Number of distinct users allowed to interact with the bot.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.authorized.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorized_users_are_allowed() {
        let registry = AuthzRegistry::new(&[UserId::new(1), UserId::new(2)], &[]);

        assert!(registry.is_authorized(UserId::new(1)));
        assert!(registry.is_authorized(UserId::new(2)));
        assert!(!registry.is_authorized(UserId::new(3)));
    }

    #[test]
    fn admins_are_implicitly_authorized() {
        let registry = AuthzRegistry::new(&[UserId::new(1)], &[UserId::new(9)]);

        assert!(registry.is_authorized(UserId::new(9)));
        assert!(registry.is_admin(UserId::new(9)));
        assert!(!registry.is_admin(UserId::new(1)));
    }

    #[test]
    fn duplicate_ids_collapse() {
        let registry = AuthzRegistry::new(&[UserId::new(1), UserId::new(1)], &[UserId::new(1)]);

        assert_eq!(registry.user_count(), 1);
    }

    #[test]
    fn empty_registry_rejects_everyone() {
        let registry = AuthzRegistry::new(&[], &[]);

        assert!(!registry.is_authorized(UserId::new(1)));
        assert_eq!(registry.user_count(), 0);
    }
}
