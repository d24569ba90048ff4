use async_trait::async_trait;
use uuid::Uuid;

use crate::users::repo_types::{NewUser, User, UserStatus};

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// Access to the `users` table. Every method is one store round-trip.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn insert(&self, user: NewUser) -> anyhow::Result<User>;
    /// Sets `status` on every row whose id is in `ids`; returns rows touched.
    async fn update_status(&self, ids: &[Uuid], status: UserStatus) -> anyhow::Result<u64>;
    async fn delete_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<u64>;
    async fn list_all(&self) -> anyhow::Result<Vec<User>>;
}
