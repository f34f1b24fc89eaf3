//! Field configurations for the sign-in and sign-up screens

use super::controller::FormConfig;
use super::field::FieldSpec;
use super::form_state::ValidationMode;
use super::rule::Rule;

pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const CONFIRM_PASSWORD: &str = "confirmPassword";

/// Minimum password length on sign-up unless configured otherwise
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 6;

fn email_field() -> FieldSpec {
    FieldSpec::text(
        EMAIL,
        "Email",
        vec![
            Rule::required("Email is required"),
            Rule::email("Enter a valid email address"),
        ],
    )
}

/// `email [required, pattern]`, `password [required]`
pub fn sign_in_form(mode: ValidationMode) -> FormConfig {
    FormConfig {
        fields: vec![
            email_field(),
            FieldSpec::secret(PASSWORD, "Password", vec![Rule::required("Password is required")]),
        ],
        mode,
    }
}

/// Sign-in fields with a length floor on the password, plus a confirmation
pub fn sign_up_form(mode: ValidationMode, password_min_length: usize) -> FormConfig {
    let mut password_rules = vec![Rule::required("Password is required")];
    if password_min_length > 0 {
        password_rules.push(Rule::min_length(
            password_min_length,
            format!("Password must be at least {password_min_length} characters"),
        ));
    }

    FormConfig {
        fields: vec![
            email_field(),
            FieldSpec::secret(PASSWORD, "Password", password_rules),
            FieldSpec::secret(
                CONFIRM_PASSWORD,
                "Confirm password",
                vec![
                    Rule::required("Please confirm your password"),
                    Rule::matches(PASSWORD, "Passwords do not match"),
                ],
            ),
        ],
        mode,
    }
}
