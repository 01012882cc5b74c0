use serde::Deserialize;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterUser {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.full_name.trim().is_empty() {
            return Err("Full name is required");
        }
        if self.email.trim().is_empty() {
            return Err("Email is required");
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err("Password must be at least 6 characters");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(full_name: &str, email: &str, password: &str) -> RegisterUser {
        RegisterUser {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_register_validation() {
        assert!(form("Jane Doe", "jane@example.com", "secret123").validate().is_ok());
        assert_eq!(
            form(" ", "jane@example.com", "secret123").validate(),
            Err("Full name is required")
        );
        assert_eq!(
            form("Jane", "", "secret123").validate(),
            Err("Email is required")
        );
        assert_eq!(
            form("Jane", "jane@example.com", "12345").validate(),
            Err("Password must be at least 6 characters")
        );
    }
}
