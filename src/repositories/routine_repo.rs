use super::{decode_rows, MEMBER_EXERCISES};
use crate::backend::{BackendError, Order, Query, SharedBackend};
use crate::error::Result;
use crate::models::{NewRoutineEntry, RoutineEntry};

const ENTRY_COLUMNS: &str = "id, exercises(name), sets, reps, created_at";

/// Routine entries (`member_exercises`) link a member to catalog exercises.
#[derive(Clone)]
pub struct RoutineRepository {
    backend: SharedBackend,
}

impl RoutineRepository {
    pub fn new(backend: SharedBackend) -> Self {
        Self { backend }
    }

    /// Most recent entries first.
    pub async fn find_recent(
        &self,
        access_token: &str,
        profile_id: &str,
        limit: usize,
    ) -> Result<Vec<RoutineEntry>> {
        let query = Query::new(MEMBER_EXERCISES)
            .select(ENTRY_COLUMNS)
            .eq("profile_id", profile_id)
            .order("created_at", Order::Descending)
            .limit(limit);
        let rows = self.backend.select(Some(access_token), &query).await?;
        Ok(decode_rows(MEMBER_EXERCISES, rows))
    }

    pub async fn add(&self, access_token: &str, entry: &NewRoutineEntry) -> Result<()> {
        let row = serde_json::to_value(entry).map_err(BackendError::from)?;
        self.backend
            .insert(Some(access_token), MEMBER_EXERCISES, vec![row])
            .await?;
        Ok(())
    }
}
