use crate::error::{Result, SentinelError};

pub const APK_SUFFIX: &str = ".apk";
pub const INVALID_SUBMISSION_NOTICE: &str = "Please upload a valid APK file";

/// A user-supplied file, known only by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
}

impl Submission {
    /// Accepts names ending in the literal, case-sensitive `.apk` suffix.
    pub fn validate(name: &str) -> Result<Self> {
        if name.ends_with(APK_SUFFIX) {
            Ok(Self {
                name: name.to_string(),
            })
        } else {
            Err(SentinelError::InvalidSubmission {
                name: name.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_apk() {
        let submission = Submission::validate("app.apk").unwrap();
        assert_eq!(submission.name, "app.apk");
    }

    #[test]
    fn test_rejects_other_suffixes() {
        assert!(Submission::validate("evil.exe").is_err());
        assert!(Submission::validate("apk").is_err());
        assert!(Submission::validate("app.apk.zip").is_err());
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        assert!(matches!(
            Submission::validate("app.APK"),
            Err(SentinelError::InvalidSubmission { .. })
        ));
    }
}
