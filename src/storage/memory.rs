use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::UserStore;
use crate::users::repo_types::{NewUser, User, UserStatus};

/// In-process store used by tests; rows are kept in insertion order.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> anyhow::Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
            role: user.role,
            status: user.status,
            password: user.password_hash,
            last_seen: user.last_seen,
        };
        self.rows.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update_status(&self, ids: &[Uuid], status: UserStatus) -> anyhow::Result<u64> {
        let mut rows = self.rows.lock().unwrap();
        let mut touched = 0;
        for user in rows.iter_mut().filter(|u| ids.contains(&u.id)) {
            user.status = status;
            touched += 1;
        }
        Ok(touched)
    }

    async fn delete_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| !ids.contains(&u.id));
        Ok((before - rows.len()) as u64)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.rows.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            name: "Test".into(),
            role: "user".into(),
            status: UserStatus::Unblocked,
            password_hash: "hash".into(),
            last_seen: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn update_status_ignores_unknown_ids() {
        let store = MemoryUserStore::default();
        let a = store.insert(new_user("a@x.com")).await.unwrap();
        store.insert(new_user("b@x.com")).await.unwrap();

        let touched = store
            .update_status(&[a.id, Uuid::new_v4()], UserStatus::Blocked)
            .await
            .unwrap();
        assert_eq!(touched, 1);

        let a = store.find_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(a.status, UserStatus::Blocked);
        let b = store.find_by_email("b@x.com").await.unwrap().unwrap();
        assert_eq!(b.status, UserStatus::Unblocked);
    }

    #[tokio::test]
    async fn delete_removes_only_listed_rows() {
        let store = MemoryUserStore::default();
        let a = store.insert(new_user("a@x.com")).await.unwrap();
        let b = store.insert(new_user("b@x.com")).await.unwrap();

        assert_eq!(store.delete_by_ids(&[a.id]).await.unwrap(), 1);
        assert!(store.find_by_id(a.id).await.unwrap().is_none());
        assert_eq!(store.list_all().await.unwrap()[0].id, b.id);
    }
}
