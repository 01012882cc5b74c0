use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_SETS: &str = "3";
pub const DEFAULT_REPS: &str = "10";
pub const MAX_COUNT: u32 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRef {
    pub name: String,
}

/// A routine entry read back with its catalog exercise embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineEntry {
    pub id: String,
    #[serde(rename = "exercises")]
    pub exercise: Option<ExerciseRef>,
    pub sets: i32,
    pub reps: i32,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// `timestamptz` columns carry an offset, plain `timestamp` columns do not;
/// the latter are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

impl RoutineEntry {
    pub fn exercise_name(&self) -> &str {
        self.exercise
            .as_ref()
            .map(|e| e.name.as_str())
            .unwrap_or("Unknown exercise")
    }

    pub fn performed_on(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRoutineEntry {
    pub profile_id: String,
    pub exercise_id: String,
    pub sets: u32,
    pub reps: u32,
}

/// The "add to routine" form. Sets and reps arrive as raw text.
#[derive(Debug, Clone, Deserialize)]
pub struct AddToRoutine {
    #[serde(default)]
    pub exercise_id: String,
    #[serde(default)]
    pub sets: String,
    #[serde(default)]
    pub reps: String,
}

impl Default for AddToRoutine {
    fn default() -> Self {
        Self {
            exercise_id: String::new(),
            sets: DEFAULT_SETS.to_string(),
            reps: DEFAULT_REPS.to_string(),
        }
    }
}

impl AddToRoutine {
    pub fn has_selection(&self) -> bool {
        !self.exercise_id.trim().is_empty()
    }

    pub fn to_entry(&self, profile_id: &str) -> Result<NewRoutineEntry, String> {
        let sets = parse_count(&self.sets)
            .ok_or_else(|| format!("Sets must be a whole number between 1 and {}", MAX_COUNT))?;
        let reps = parse_count(&self.reps)
            .ok_or_else(|| format!("Reps must be a whole number between 1 and {}", MAX_COUNT))?;

        Ok(NewRoutineEntry {
            profile_id: profile_id.to_string(),
            exercise_id: self.exercise_id.trim().to_string(),
            sets,
            reps,
        })
    }
}

/// Parses a set or rep count: a whole number in `1..=MAX_COUNT`.
pub fn parse_count(input: &str) -> Option<u32> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| (1..=MAX_COUNT).contains(n))
}
