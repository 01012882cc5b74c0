use serde_json::json;

use super::PROFILES;
use crate::backend::{BackendError, Query, SharedBackend};
use crate::error::{AppError, Result};
use crate::models::profile::DEFAULT_MEMBERSHIP;
use crate::models::Profile;

#[derive(Clone)]
pub struct ProfileRepository {
    backend: SharedBackend,
}

impl ProfileRepository {
    pub fn new(backend: SharedBackend) -> Self {
        Self { backend }
    }

    pub async fn find_by_id(&self, access_token: &str, id: &str) -> Result<Profile> {
        let query = Query::new(PROFILES).select("*").eq("id", id).single();
        let rows = self.backend.select(Some(access_token), &query).await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
        Ok(serde_json::from_value(row).map_err(BackendError::from)?)
    }

    /// New members start on the default tier.
    pub async fn create(&self, access_token: &str, id: &str, full_name: &str) -> Result<()> {
        let row = json!({
            "id": id,
            "full_name": full_name,
            "membership_type": DEFAULT_MEMBERSHIP,
        });
        self.backend
            .insert(Some(access_token), PROFILES, vec![row])
            .await?;
        Ok(())
    }
}
