// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password rules for traveler and admin accounts.

use thiserror::Error;

/// Reasons a password is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    #[error(
        "Password must mix at least {required} of: uppercase, lowercase, digits, symbols (found {found})"
    )]
    TooSimple { required: usize, found: usize },

    #[error("Password must not be the same as your {field}")]
    SameAsAccountField { field: String },

    #[error("Passwords do not match")]
    ConfirmationMismatch,
}

/// Minimum length and character-class mix a password must meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    /// Character classes required, out of four.
    pub min_classes: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            min_classes: 2,
        }
    }
}

impl PasswordPolicy {
    /// Checks a new password.
    ///
    /// Checks run in order: confirmation, length, character mix, and
    /// finally that the password is not the account's username or email
    /// (compared case-insensitively).
    ///
    /// # Arguments
    ///
    /// * `password` - The chosen password
    /// * `confirmation` - The password typed a second time
    /// * `username` - The account username
    /// * `email` - The account email
    ///
    /// # Errors
    ///
    /// Returns the first rule the password breaks.
    pub fn validate(
        &self,
        password: &str,
        confirmation: &str,
        username: &str,
        email: &str,
    ) -> Result<(), PasswordPolicyError> {
        if password != confirmation {
            return Err(PasswordPolicyError::ConfirmationMismatch);
        }

        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        let found: usize = character_classes(password);
        if found < self.min_classes {
            return Err(PasswordPolicyError::TooSimple {
                required: self.min_classes,
                found,
            });
        }

        let lowered: String = password.to_lowercase();
        for (field, value) in [("username", username), ("email", email)] {
            if !value.trim().is_empty() && lowered == value.trim().to_lowercase() {
                return Err(PasswordPolicyError::SameAsAccountField {
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Counts how many of uppercase, lowercase, digit and symbol appear.
fn character_classes(password: &str) -> usize {
    let classes: [fn(&char) -> bool; 4] = [
        char::is_ascii_uppercase,
        char::is_ascii_lowercase,
        char::is_ascii_digit,
        |c: &char| !c.is_alphanumeric() && !c.is_whitespace(),
    ];
    classes
        .iter()
        .filter(|class| password.chars().any(|c| class(&c)))
        .count()
}
