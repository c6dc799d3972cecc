use async_trait::async_trait;

use super::domain::{Credentials, Role};
use super::errors::AuthError;

/// Repository abstraction for credential lookup. The natural key is the IIN
/// for patients and doctors, the username for admins.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_credentials(
        &self,
        role: Role,
        username: &str,
    ) -> Result<Option<Credentials>, AuthError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        creds: Mutex<HashMap<(Role, String), Credentials>>, // key: (role, natural key)
    }

    impl MockAuthRepository {
        pub fn add(&self, role: Role, username: &str, cred: Credentials) {
            let mut creds = self.creds.lock().unwrap();
            creds.insert((role, username.to_string()), cred);
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_credentials(
            &self,
            role: Role,
            username: &str,
        ) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(&(role, username.to_string())).cloned())
        }
    }
}
