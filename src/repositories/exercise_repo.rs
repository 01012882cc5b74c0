use super::{decode_rows, EXERCISES};
use crate::backend::{Order, Query, SharedBackend};
use crate::error::Result;
use crate::models::Exercise;

#[derive(Clone)]
pub struct ExerciseRepository {
    backend: SharedBackend,
}

impl ExerciseRepository {
    pub fn new(backend: SharedBackend) -> Self {
        Self { backend }
    }

    pub async fn find_all(&self, access_token: &str) -> Result<Vec<Exercise>> {
        let query = Query::new(EXERCISES)
            .select("*")
            .order("name", Order::Ascending);
        let rows = self.backend.select(Some(access_token), &query).await?;
        Ok(decode_rows(EXERCISES, rows))
    }
}
