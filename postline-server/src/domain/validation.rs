use serde::Serialize;
use validator::ValidateEmail;

/// Structural failure of a single submitted field. `value` echoes the
/// rejected input so a client can refill its form; passwords are never
/// echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FieldError {
    pub(crate) field: &'static str,
    pub(crate) message: &'static str,
    pub(crate) value: String,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str, value: &str) -> Self {
        Self {
            field,
            message,
            value: value.to_string(),
        }
    }
}

pub(crate) type FieldResult = Result<String, FieldError>;

pub(crate) fn username(raw: &str) -> FieldResult {
    let value = raw.trim();
    let len = value.chars().count();
    if len < 3 || len > 35 {
        return Err(FieldError::new(
            "username",
            "must be 3..=35 characters",
            value,
        ));
    }
    Ok(value.to_string())
}

pub(crate) fn password(raw: &str) -> FieldResult {
    if raw.chars().count() < 7 {
        return Err(FieldError::new(
            "password",
            "must be at least 7 characters",
            "",
        ));
    }
    if !raw.chars().all(char::is_alphanumeric) {
        return Err(FieldError::new(
            "password",
            "must contain only letters and digits",
            "",
        ));
    }
    Ok(raw.to_string())
}

pub(crate) fn email(raw: &str) -> FieldResult {
    let value = raw.trim().to_lowercase();
    if !value.validate_email() {
        return Err(FieldError::new("email", "must be a valid email", &value));
    }
    Ok(value)
}

pub(crate) fn post_title(raw: &str) -> FieldResult {
    let value = raw.trim();
    let len = value.chars().count();
    if len < 3 || len > 250 {
        return Err(FieldError::new("title", "must be 3..=250 characters", value));
    }
    Ok(value.to_string())
}

pub(crate) fn post_content(raw: &str) -> FieldResult {
    let value = raw.trim();
    if value.chars().count() < 25 {
        return Err(FieldError::new(
            "content",
            "must be at least 25 characters",
            value,
        ));
    }
    Ok(value.to_string())
}

pub(crate) fn category_title(raw: &str) -> FieldResult {
    let value = raw.trim();
    let len = value.chars().count();
    if len < 3 || len > 40 {
        return Err(FieldError::new("title", "must be 3..=40 characters", value));
    }
    Ok(value.to_string())
}

pub(crate) fn category_ref(raw: Option<i64>) -> Result<i64, FieldError> {
    match raw {
        Some(id) if id > 0 => Ok(id),
        Some(id) => Err(FieldError::new(
            "category_id",
            "must reference an existing category",
            &id.to_string(),
        )),
        None => Err(FieldError::new(
            "category_id",
            "must reference an existing category",
            "",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{category_ref, category_title, email, password, post_content, post_title, username};

    #[test]
    fn username_rules_are_applied() {
        assert!(username("ab").is_err());
        assert!(username(&"a".repeat(36)).is_err());
        assert_eq!(username("valid_user").expect("must be valid"), "valid_user");
    }

    #[test]
    fn username_is_trimmed() {
        assert_eq!(username("  valid_user  ").expect("must be valid"), "valid_user");
    }

    #[test]
    fn valid_value_passes_through_unchanged() {
        let value = "already_valid";
        assert_eq!(username(value).expect("must be valid"), value);
        assert_eq!(post_title(value).expect("must be valid"), value);
    }

    #[test]
    fn password_requires_seven_alphanumeric_characters() {
        assert!(password("abc123").is_err());
        assert!(password("abc 1234").is_err());
        assert!(password("abc-1234").is_err());
        assert_eq!(password("abc1234").expect("must be valid"), "abc1234");
    }

    #[test]
    fn password_errors_never_echo_the_value() {
        let err = password("short").expect_err("must be rejected");
        assert_eq!(err.value, "");
    }

    #[test]
    fn email_is_normalized_to_lowercase() {
        let value = email("  TeSt@Example.COM ").expect("must be valid");
        assert_eq!(value, "test@example.com");
        assert!(email("not-an-email").is_err());
    }

    #[test]
    fn post_title_length_bounds() {
        assert!(post_title("ab").is_err());
        assert!(post_title(&"a".repeat(251)).is_err());
        assert!(post_title("abc").is_ok());
    }

    #[test]
    fn post_content_needs_twenty_five_characters() {
        assert!(post_content("too short").is_err());
        assert!(post_content(&"x".repeat(25)).is_ok());
    }

    #[test]
    fn category_title_bounds() {
        assert!(category_title("ab").is_err());
        assert!(category_title("Tech").is_ok());
    }

    #[test]
    fn category_ref_requires_a_positive_id() {
        assert!(category_ref(None).is_err());
        assert!(category_ref(Some(0)).is_err());
        assert_eq!(category_ref(Some(3)).expect("must be valid"), 3);
    }
}
