use serde::de::DeserializeOwned;
use serde_json::Value;


pub mod exercise_repo;
pub mod profile_repo;
pub mod routine_repo;

pub use exercise_repo::ExerciseRepository;
pub use profile_repo::ProfileRepository;
pub use routine_repo::RoutineRepository;

pub const PROFILES: &str = "profiles";
pub const EXERCISES: &str = "exercises";
pub const MEMBER_EXERCISES: &str = "member_exercises";

/// Decodes backend rows into typed records. A row that does not decode is
/// logged and skipped so the rest of the list still renders.
pub(crate) fn decode_rows<T: DeserializeOwned>(table: &str, rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping undecodable {} row: {}", table, e);
                None
            }
        })
        .collect()
}
