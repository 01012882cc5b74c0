use serde::{Deserialize, Serialize};

/// A catalog entry. The catalog is shared and read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub target_muscle: Option<String>,
}

impl Exercise {
    pub fn difficulty_badge(&self) -> &'static str {
        match self.difficulty.as_deref() {
            Some("beginner") => "badge badge-green",
            Some("intermediate") => "badge badge-yellow",
            Some(_) => "badge badge-red",
            None => "badge",
        }
    }

    pub fn difficulty_text(&self) -> &str {
        self.difficulty.as_deref().unwrap_or("")
    }

    pub fn target_muscle_text(&self) -> &str {
        self.target_muscle.as_deref().unwrap_or("")
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}
