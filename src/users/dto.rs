use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// Body of the block/unblock/delete routes. `userIds` is kept as raw JSON so
/// that a non-array value is reported as 400 by the handler.
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(rename = "userIds", default)]
    pub user_ids: Value,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    #[serde(rename = "userIds")]
    pub user_ids: Value,
}

impl BatchRequest {
    /// Ids that can match a row. Elements that are not UUID strings are
    /// skipped, the same as ids with no matching row.
    pub fn ids(&self) -> Result<Vec<Uuid>, ApiError> {
        let items = self
            .user_ids
            .as_array()
            .ok_or_else(|| ApiError::validation("userIds must be an array"))?;
        Ok(items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|s| Uuid::parse_str(s).ok())
            .collect())
    }
}
