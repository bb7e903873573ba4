use crate::error::PasswordError;

/// Longest password accepted, counted in characters.
pub const MAX_PASSWORD_CHARS: usize = 10;

/// Checks a submitted password before any identifier is allocated.
///
/// The quote check is the only sanitization the service performs; anything else is
/// hashed as-is.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }

    let length = password.chars().count();
    if length > MAX_PASSWORD_CHARS {
        return Err(PasswordError::TooLong {
            max: MAX_PASSWORD_CHARS,
            actual: length,
        });
    }

    if password.contains('\'') {
        return Err(PasswordError::ContainsQuote);
    }

    Ok(())
}
