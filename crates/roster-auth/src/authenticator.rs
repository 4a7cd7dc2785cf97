//! Credential lifecycle: registration, login, token issue and verification.

use crate::claims::Claims;
use crate::error::AuthError;
use crate::password::CredentialHasher;
use crate::secret::SigningSecret;
use crate::token::TokenCodec;
use chrono::Utc;
use roster_core::{AuthConfig, Credential, Role};
use roster_store::schema::{EMAIL_INDEX, USERNAME_INDEX};
use roster_store::{CredentialRepository, StoreError, StoredCredential};
use uuid::Uuid;

// Verified against when a login identifier matches nobody, so a miss costs
// the same as a wrong password.
const DUMMY_PASSWORD: &str = "roster-dummy-password";

pub struct Authenticator {
    credentials: CredentialRepository,
    hasher: CredentialHasher,
    tokens: TokenCodec,
    dummy_hash: String,
}

impl Authenticator {
    pub fn new(
        credentials: CredentialRepository,
        hasher: CredentialHasher,
        secret: &SigningSecret,
    ) -> Result<Self, AuthError> {
        let dummy_hash = hasher.hash_blocking(DUMMY_PASSWORD)?;
        Ok(Self {
            credentials,
            hasher,
            tokens: TokenCodec::new(secret),
            dummy_hash,
        })
    }

    /// Build from the `[auth]` section, resolving the secret from env or file.
    pub fn from_config(
        config: &AuthConfig,
        credentials: CredentialRepository,
    ) -> Result<Self, AuthError> {
        let secret = SigningSecret::from_config(config)?;
        let hasher = CredentialHasher::from_config(config)?;
        Self::new(credentials, hasher, &secret)
    }

    /// Create an active credential with the default role.
    ///
    /// Inputs are assumed non-empty and policy-checked by the caller. The
    /// existence checks are advisory; the store's unique indexes decide
    /// concurrent races and their conflicts surface as the same errors.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Credential, AuthError> {
        if self.credentials.find_by_email(email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }
        if self.credentials.find_by_username(username).await?.is_some() {
            return Err(AuthError::DuplicateUsername);
        }

        let password_hash = self.hasher.hash(password).await?;
        let now = Utc::now();
        let record = StoredCredential {
            credential: Credential {
                id: Uuid::new_v4().to_string(),
                username: username.to_string(),
                email: email.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                role: Role::default(),
                is_active: true,
                created_at: now,
                updated_at: now,
            },
            password_hash,
        };

        match self.credentials.put(&record).await {
            Ok(()) => {}
            Err(StoreError::Conflict { index, .. }) if index == EMAIL_INDEX => {
                return Err(AuthError::DuplicateEmail);
            }
            Err(StoreError::Conflict { index, .. }) if index == USERNAME_INDEX => {
                return Err(AuthError::DuplicateUsername);
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %record.credential.id, username, "registered credential");
        Ok(record.credential)
    }

    /// Authenticate by email or username and issue a token.
    ///
    /// The identifier is looked up as an email first; only if no email
    /// matches is it tried as a username.
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<(String, Credential), AuthError> {
        let found = match self.credentials.find_by_email(identifier).await? {
            Some(record) => Some(record),
            None => self.credentials.find_by_username(identifier).await?,
        };

        let Some(record) = found else {
            // Burn one verification so unknown identifiers are not faster.
            let _ = self.hasher.verify(password, &self.dummy_hash).await;
            return Err(AuthError::NotFound);
        };

        if !record.credential.is_active {
            return Err(AuthError::Disabled);
        }

        if !self.hasher.verify(password, &record.password_hash).await? {
            return Err(AuthError::BadPassword);
        }

        let token = self.issue_token(&record.credential)?;
        Ok((token, record.credential))
    }

    pub fn issue_token(&self, credential: &Credential) -> Result<String, AuthError> {
        self.tokens.issue(credential)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.verify(token)
    }

    /// Reload the credential a verified token speaks for.
    ///
    /// Fails with `Disabled` once the credential has been deactivated, even
    /// though its outstanding tokens still verify.
    pub async fn current_credential(&self, claims: &Claims) -> Result<Credential, AuthError> {
        let record = match self.credentials.get(&claims.sub).await {
            Ok(record) => record,
            Err(e) if e.is_not_found() => return Err(AuthError::NotFound),
            Err(e) => return Err(e.into()),
        };

        if !record.credential.is_active {
            return Err(AuthError::Disabled);
        }
        Ok(record.credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_store::{MemoryStore, RecordStore, provision};
    use std::sync::Arc;

    struct Harness {
        auth: Authenticator,
        repo: CredentialRepository,
    }

    async fn harness() -> Harness {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        provision(store.as_ref()).await.unwrap();
        let repo = CredentialRepository::new(store);
        let auth = Authenticator::new(
            repo.clone(),
            CredentialHasher::new(256, 1, 1).unwrap(),
            &SigningSecret::new("unit-test-secret").unwrap(),
        )
        .unwrap();
        Harness { auth, repo }
    }

    #[tokio::test]
    async fn test_register_then_login_by_username_and_email() {
        let h = harness().await;
        let bob = h
            .auth
            .register("bob", "bob@x.com", "password123", "Bob", "Builder")
            .await
            .unwrap();
        assert_eq!(bob.role, Role::User);
        assert!(bob.is_active);

        let (token, by_name) = h.auth.login("bob", "password123").await.unwrap();
        let claims = h.auth.verify_token(&token).unwrap();
        assert_eq!(claims.username, "bob");

        let (_, by_email) = h.auth.login("bob@x.com", "password123").await.unwrap();
        assert_eq!(by_name.id, bob.id);
        assert_eq!(by_email.id, bob.id);
    }

    #[tokio::test]
    async fn test_fresh_account_token_carries_user_role() {
        let h = harness().await;
        h.auth
            .register("alice", "alice@example.com", "rightpw!", "Alice", "Liddell")
            .await
            .unwrap();

        let (token, _) = h.auth.login("alice@example.com", "rightpw!").await.unwrap();
        assert_eq!(h.auth.verify_token(&token).unwrap().role, Role::User);

        let err = h.auth.login("alice@example.com", "wrongpw!").await.unwrap_err();
        assert!(matches!(err, AuthError::BadPassword));
    }

    #[tokio::test]
    async fn test_duplicate_email_performs_no_write() {
        let h = harness().await;
        h.auth
            .register("bob", "bob@x.com", "password123", "Bob", "Builder")
            .await
            .unwrap();

        let err = h
            .auth
            .register("bobby", "bob@x.com", "password456", "Bobby", "Tables")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
        assert_eq!(h.repo.list().await.unwrap().len(), 1);
        assert!(h.repo.find_by_username("bobby").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let h = harness().await;
        h.auth
            .register("bob", "bob@x.com", "password123", "Bob", "Builder")
            .await
            .unwrap();
        let err = h
            .auth
            .register("bob", "other@x.com", "password123", "Bob", "Two")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername));
    }

    /// Index lookups always miss, as if a concurrent registration committed
    /// between the existence checks and the write.
    struct StaleIndexStore(MemoryStore);

    #[async_trait::async_trait]
    impl RecordStore for StaleIndexStore {
        async fn create_table(
            &self,
            schema: &roster_store::TableSchema,
        ) -> Result<bool, StoreError> {
            self.0.create_table(schema).await
        }

        async fn get_by_id(&self, table: &str, id: &str) -> Result<roster_store::Item, StoreError> {
            self.0.get_by_id(table, id).await
        }

        async fn put(&self, table: &str, item: roster_store::Item) -> Result<(), StoreError> {
            self.0.put(table, item).await
        }

        async fn scan(&self, table: &str) -> Result<Vec<roster_store::Item>, StoreError> {
            self.0.scan(table).await
        }

        async fn query_by_index(
            &self,
            _table: &str,
            _index: &str,
            _key: &str,
        ) -> Result<Vec<roster_store::Item>, StoreError> {
            Ok(Vec::new())
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_store_conflicts_map_to_duplicate_errors() {
        let store: Arc<dyn RecordStore> = Arc::new(StaleIndexStore(MemoryStore::new()));
        provision(store.as_ref()).await.unwrap();
        let repo = CredentialRepository::new(store.clone());
        let auth = Authenticator::new(
            repo.clone(),
            CredentialHasher::new(256, 1, 1).unwrap(),
            &SigningSecret::new("unit-test-secret").unwrap(),
        )
        .unwrap();

        let carol = auth
            .register("carol", "carol@x.com", "password123", "Carol", "First")
            .await
            .unwrap();

        let err = auth
            .register("carol2", "carol@x.com", "password123", "Carol", "Second")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail), "{err:?}");

        let err = auth
            .register("carol", "carol2@x.com", "password123", "Carol", "Third")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername), "{err:?}");

        let stored = repo.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].credential.id, carol.id);
    }

    #[tokio::test]
    async fn test_email_match_wins_over_username_match() {
        let h = harness().await;
        // carol's username is dave's email.
        let dave = h
            .auth
            .register("dave", "dave@x.com", "dave-password", "Dave", "D")
            .await
            .unwrap();
        h.auth
            .register("dave@x.com", "carol@x.com", "carol-password", "Carol", "C")
            .await
            .unwrap();

        let (_, who) = h.auth.login("dave@x.com", "dave-password").await.unwrap();
        assert_eq!(who.id, dave.id);
        let err = h.auth.login("dave@x.com", "carol-password").await.unwrap_err();
        assert!(matches!(err, AuthError::BadPassword));
    }

    #[tokio::test]
    async fn test_unknown_identifier_is_not_found() {
        let h = harness().await;
        let err = h.auth.login("nobody", "whatever1").await.unwrap_err();
        assert!(matches!(err, AuthError::NotFound));
    }

    #[tokio::test]
    async fn test_disabled_credential() {
        let h = harness().await;
        let bob = h
            .auth
            .register("bob", "bob@x.com", "password123", "Bob", "Builder")
            .await
            .unwrap();
        let (token, _) = h.auth.login("bob", "password123").await.unwrap();
        let claims = h.auth.verify_token(&token).unwrap();

        let mut record = h.repo.get(&bob.id).await.unwrap();
        record.credential.is_active = false;
        h.repo.put(&record).await.unwrap();

        assert!(matches!(
            h.auth.login("bob", "password123").await,
            Err(AuthError::Disabled)
        ));
        assert!(matches!(
            h.auth.current_credential(&claims).await,
            Err(AuthError::Disabled)
        ));
    }

    #[tokio::test]
    async fn test_current_credential_for_vanished_subject() {
        let h = harness().await;
        let now = Utc::now();
        let ghost = Credential {
            id: "ghost".into(),
            username: "ghost".into(),
            email: "ghost@x.com".into(),
            first_name: "G".into(),
            last_name: "H".into(),
            role: Role::User,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let token = h.auth.issue_token(&ghost).unwrap();
        let claims = h.auth.verify_token(&token).unwrap();
        assert!(matches!(
            h.auth.current_credential(&claims).await,
            Err(AuthError::NotFound)
        ));
    }
}
