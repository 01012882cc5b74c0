use serde::{Deserialize, Serialize};

pub const DEFAULT_MEMBERSHIP: &str = "basic";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub full_name: Option<String>,
    pub membership_type: Option<String>,
}

impl Profile {
    pub fn greeting(&self) -> String {
        match self.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("Welcome back, {}!", name),
            _ => "Welcome back!".to_string(),
        }
    }

    /// "premium" renders as "Premium Membership".
    pub fn membership_label(&self) -> String {
        let tier = self
            .membership_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_MEMBERSHIP);
        format!("{} Membership", capitalize(tier.trim()))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
