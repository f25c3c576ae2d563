use crate::error::ShardingError;

/// Longest identifier SQL Server accepts (`sysname`).
pub const MAX_IDENTIFIER_LEN: usize = 128;

/// Reject identifiers that could escape the statement they are spliced into.
///
/// Federation and distribution names appear literally in `USE FEDERATION`
/// statements, so they are checked before any SQL is assembled.
pub fn validate_identifier(name: &str) -> Result<(), ShardingError> {
    if name.is_empty() {
        return Err(ShardingError::InvalidIdentifier("empty".to_string()));
    }
    if name.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(ShardingError::InvalidIdentifier(format!(
            "too long: {}",
            name.chars().count()
        )));
    }
    if name.contains('"')
        || name.contains('\x00')
        || name.contains(';')
        || name.contains('`')
        || name.contains('\\')
        || name.contains('[')
        || name.contains(']')
        || name.contains('\'')
    {
        return Err(ShardingError::InvalidIdentifier(format!(
            "forbidden characters in: {}",
            name
        )));
    }
    if name.contains("--") || name.contains("/*") {
        return Err(ShardingError::InvalidIdentifier(format!(
            "comment sequence in: {}",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("abc").is_ok());
        assert!(validate_identifier("user_id").is_ok());
        assert!(validate_identifier("Orders Fed").is_ok());

        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("foo\"bar").is_err());
        assert!(validate_identifier("x; DROP TABLE users").is_err());
        assert!(validate_identifier("null\0byte").is_err());
        assert!(validate_identifier("abc]").is_err());
        assert!(validate_identifier("a--b").is_err());
        assert!(validate_identifier(&"x".repeat(129)).is_err());
        assert!(validate_identifier(&"x".repeat(128)).is_ok());
    }
}
