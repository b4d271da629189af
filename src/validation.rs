use crate::constants::MAX_TARGET_NAME_LEN;
use crate::error::AppError;

/// Validate a target name received over the command interface.
/// Returns the trimmed name if valid.
pub fn validate_target_name(name: &str) -> Result<&str, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput {
            field: "target_name",
            reason: "cannot be empty".into(),
        });
    }
    if trimmed.chars().count() > MAX_TARGET_NAME_LEN {
        return Err(AppError::InvalidInput {
            field: "target_name",
            reason: format!("cannot exceed {MAX_TARGET_NAME_LEN} characters"),
        });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_target_name_is_trimmed() {
        assert_eq!(validate_target_name("  TikTok ").unwrap(), "TikTok");
        assert_eq!(
            validate_target_name("Safari (short-form tabs)").unwrap(),
            "Safari (short-form tabs)"
        );
    }

    #[test]
    fn test_empty_target_name_rejected() {
        assert!(validate_target_name("").is_err());
        assert!(validate_target_name("   ").is_err());
    }

    #[test]
    fn test_overlong_target_name_rejected() {
        let name = "x".repeat(MAX_TARGET_NAME_LEN + 1);
        let err = validate_target_name(&name).unwrap_err();
        assert!(err.to_string().contains("cannot exceed"));
    }

    #[test]
    fn test_length_limit_counts_characters() {
        let name = "é".repeat(MAX_TARGET_NAME_LEN);
        assert_eq!(validate_target_name(&name).unwrap().chars().count(), MAX_TARGET_NAME_LEN);
    }
}
