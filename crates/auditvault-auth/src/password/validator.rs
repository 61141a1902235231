//! Password policy enforcement for new passwords.

use auditvault_core::config::AuthConfig;
use auditvault_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password, reporting the first violation found.
    ///
    /// `user_inputs` (name, email) are penalized by the entropy estimate.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(char::is_alphabetic) || !password.chars().any(|c| c.is_ascii_digit())
        {
            return Err(AppError::validation(
                "Password must contain both letters and digits",
            ));
        }

        let estimate = zxcvbn::zxcvbn(password, user_inputs);
        if estimate.score() < zxcvbn::Score::Two {
            return Err(AppError::validation(
                "Password is too weak. Please use a longer or less predictable password.",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn test_too_short() {
        let err = validator().validate("ab1", &[]).unwrap_err();
        assert!(err.message.contains("at least 8"));
    }

    #[test]
    fn test_requires_digits() {
        assert!(validator().validate("onlyletters", &[]).is_err());
    }

    #[test]
    fn test_repetitive_password_rejected() {
        assert!(validator().validate("aaaaaaaa1", &[]).is_err());
    }

    #[test]
    fn test_strong_password_accepted() {
        assert!(
            validator()
                .validate("Granite-Harbor-Lantern-47", &["dana@example.com"])
                .is_ok()
        );
    }
}
