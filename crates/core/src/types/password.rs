//! Customer password type.
//!
//! Passwords are stored in the `customers.password` column exactly as the
//! client submitted them. There is no hashing: this is a known security gap
//! of the service, and the list endpoint returns the stored value verbatim.
//!
//! The type exists so that the clear-text value never ends up in logs or
//! tracing spans by accident: `Debug` is redacted, and reading the value
//! requires an explicit call to [`Password::expose`].

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Password`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The input is empty or only whitespace.
    #[error("password cannot be empty")]
    Empty,
}

/// A customer password, held in clear text.
///
/// ## Examples
///
/// ```
/// use customer_management_core::Password;
///
/// let password = Password::parse("hunter2").unwrap();
/// assert_eq!(password.expose(), "hunter2");
/// assert_eq!(format!("{password:?}"), "Password([REDACTED])");
///
/// assert!(Password::parse("   ").is_err());
/// ```
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Parse a `Password` from a string.
    ///
    /// Only presence is checked; strength rules are not enforced.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Empty`] if the input is blank.
    pub fn parse(s: &str) -> Result<Self, PasswordError> {
        if s.trim().is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the clear-text password.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Consumes the `Password` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Password {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Password {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Password {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_value_verbatim() {
        let password = Password::parse(" s3cret ").unwrap();
        assert_eq!(password.expose(), " s3cret ");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Password::parse(""), Err(PasswordError::Empty));
        assert_eq!(Password::parse(" \t"), Err(PasswordError::Empty));
    }

    #[test]
    fn test_debug_redacts() {
        let password = Password::parse("super_secret_value").unwrap();
        let debug = format!("{password:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super_secret_value"));
    }

    #[test]
    fn test_serializes_in_clear() {
        // The list endpoint exposes stored passwords; serialization is not redacted.
        let password = Password::parse("plain").unwrap();
        assert_eq!(serde_json::to_string(&password).unwrap(), "\"plain\"");
    }
}
