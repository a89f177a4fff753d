use crate::domain::auth::{AccountStatus, Credential, CredentialsRepository};
use std::collections::HashSet;
use std::sync::LazyLock;

static ACCOUNTS: LazyLock<Vec<Credential>> = LazyLock::new(|| {
    vec![
        Credential {
            username: "muser1".to_string(),
            password: "mpassword1".to_string(),
            status: AccountStatus::Active,
        },
        Credential {
            username: "muser2".to_string(),
            password: "mpassword2".to_string(),
            status: AccountStatus::Active,
        },
        Credential {
            username: "muser3".to_string(),
            password: "mpassword3".to_string(),
            status: AccountStatus::Blocked,
        },
    ]
});

/// Fixed account directory used by the demo login
pub struct HardcodedCredentialsRepository;

impl HardcodedCredentialsRepository {
    pub fn new() -> Self {
        // Usernames double as identities, so they must be unique
        debug_assert_eq!(
            ACCOUNTS
                .iter()
                .map(|account| &account.username)
                .collect::<HashSet<_>>()
                .len(),
            ACCOUNTS.len(),
            "Usernames must be unique"
        );

        Self
    }
}

impl CredentialsRepository for HardcodedCredentialsRepository {
    fn find_by_username(&self, username: &str) -> Option<Credential> {
        ACCOUNTS
            .iter()
            .find(|account| account.username == username)
            .cloned()
    }
}

impl Default for HardcodedCredentialsRepository {
    fn default() -> Self {
        Self::new()
    }
}
