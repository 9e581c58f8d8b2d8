use std::sync::Arc;

use chrono::{DateTime, Utc};
use models::user::{NewUserAccount, UserAccount, MSG_USERNAME_TAKEN};

use crate::errors::ServiceError;
use crate::storage::{CollectionStore, Creatable, Record, StorageBackend};

pub const USERS_RESOURCE: &str = "users";

impl Record for UserAccount {
    type Id = str;
    const LABEL: &'static str = "User";
    fn id(&self) -> &str {
        &self.username
    }
}

impl Creatable for UserAccount {
    type Draft = NewUserAccount;

    fn from_draft(draft: NewUserAccount, _now: DateTime<Utc>) -> Result<Self, ServiceError> {
        Ok(draft.into_account()?)
    }

    fn ensure_unique(&self, existing: &[Self]) -> Result<(), ServiceError> {
        if existing.iter().any(|u| u.username == self.username) {
            return Err(ServiceError::Validation(MSG_USERNAME_TAKEN.into()));
        }
        Ok(())
    }
}

/// User account collection. Only registration is exposed; accounts are never
/// updated or removed.
pub struct UserStore {
    store: CollectionStore<UserAccount>,
}

impl UserStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Arc<Self> {
        Arc::new(Self { store: CollectionStore::new(backend, USERS_RESOURCE) })
    }

    pub async fn register(&self, input: NewUserAccount) -> Result<UserAccount, ServiceError> {
        self.store.create(input).await
    }

    pub async fn list(&self) -> Result<Vec<UserAccount>, ServiceError> {
        self.store.list().await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<UserAccount, ServiceError> {
        self.store.get(username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryBackend;
    use models::user::{MSG_AGE, MSG_USERNAME};
    use serde_json::Number;

    fn input(username: &str) -> NewUserAccount {
        NewUserAccount {
            username: Some(username.into()),
            password: Some("hunter2".into()),
            age: Some(Number::from(30)),
            email: Some(format!("{username}@example.com")),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn short_username_is_rejected() -> Result<(), anyhow::Error> {
        let users = UserStore::new(InMemoryBackend::new());
        assert!(matches!(
            users.register(input("ab")).await,
            Err(ServiceError::Validation(m)) if m == MSG_USERNAME
        ));
        let created = users.register(input("abc")).await?;
        assert_eq!(created.username, "abc");
        assert_eq!(created.password, "hunter2");
        assert_eq!(users.find_by_username("abc").await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected_regardless_of_other_fields() -> Result<(), anyhow::Error> {
        let users = UserStore::new(InMemoryBackend::new());
        users.register(input("alice")).await?;

        let other = NewUserAccount {
            password: Some("different".into()),
            email: Some("else@where.org".into()),
            gender: Some("Female".into()),
            ..input("alice")
        };
        assert!(matches!(
            users.register(other).await,
            Err(ServiceError::Validation(m)) if m == MSG_USERNAME_TAKEN
        ));
        assert_eq!(users.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn field_errors_take_precedence_over_uniqueness() -> Result<(), anyhow::Error> {
        let users = UserStore::new(InMemoryBackend::new());
        users.register(input("alice")).await?;
        let res = users.register(NewUserAccount { age: Some(Number::from(9)), ..input("alice") }).await;
        assert!(matches!(res, Err(ServiceError::Validation(m)) if m == MSG_AGE));
        Ok(())
    }

    #[tokio::test]
    async fn accounts_stored_without_age_do_not_block_registration() -> Result<(), anyhow::Error> {
        let backend = InMemoryBackend::new();
        backend
            .seed(USERS_RESOURCE, r#"[{"username": "legacy", "password": "12345", "email": "l@x"}]"#)
            .await;
        let users = UserStore::new(backend.clone());
        users.register(NewUserAccount { age: None, ..input("newbie") }).await?;
        let stored = users.list().await?;
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|u| u.age.is_none()));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_username_is_not_found() {
        let users = UserStore::new(InMemoryBackend::new());
        assert!(matches!(
            users.find_by_username("ghost").await,
            Err(ServiceError::NotFound(m)) if m == "User not found."
        ));
    }

    #[tokio::test]
    async fn optional_fields_are_omitted_when_absent() -> Result<(), anyhow::Error> {
        let backend = InMemoryBackend::new();
        let users = UserStore::new(backend.clone());
        users.register(input("bob")).await?;
        let raw = String::from_utf8(backend.snapshot(USERS_RESOURCE).await.unwrap_or_default())?;
        assert!(!raw.contains("fullName"));
        assert!(!raw.contains("gender"));
        assert!(raw.contains("\"password\": \"hunter2\""));
        Ok(())
    }
}
