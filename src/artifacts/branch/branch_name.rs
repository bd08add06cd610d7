use crate::artifacts::branch::INVALID_REF_NAME_REGEX;
use crate::errors::{Result, StoreError};
use std::path::Path;

pub const HEAD_REF_NAME: &str = "HEAD";
pub const MERGE_HEAD_REF_NAME: &str = "MERGE_HEAD";
pub const HEADS_PREFIX: &str = "refs/heads/";
pub const TAGS_PREFIX: &str = "refs/tags/";

fn validate(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StoreError::InvalidRefName {
            name: name.to_string(),
            reason: "name cannot be empty".to_string(),
        });
    }

    if regex::Regex::new(INVALID_REF_NAME_REGEX)?.is_match(name) {
        return Err(StoreError::InvalidRefName {
            name: name.to_string(),
            reason: "name contains a forbidden sequence".to_string(),
        });
    }

    Ok(())
}

/// Full name of a ref, relative to the store root (`HEAD`, `refs/heads/main`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefName(String);

impl RefName {
    pub fn try_parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate(&name)?;
        Ok(Self(name))
    }

    pub fn head() -> Self {
        Self(HEAD_REF_NAME.to_string())
    }

    pub fn merge_head() -> Self {
        Self(MERGE_HEAD_REF_NAME.to_string())
    }

    /// Branch name when this ref lives under `refs/heads/`
    pub fn branch_name(&self) -> Option<BranchName> {
        self.0
            .strip_prefix(HEADS_PREFIX)
            .map(|name| BranchName(name.to_string()))
    }

    pub fn as_ref_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Short branch or tag name (`main`, `feature/login`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate(&name)?;
        Ok(Self(name))
    }

    pub fn to_branch_ref(&self) -> RefName {
        RefName(format!("{HEADS_PREFIX}{}", self.0))
    }

    pub fn to_tag_ref(&self) -> RefName {
        RefName(format!("{TAGS_PREFIX}{}", self.0))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;

    proptest! {
        #[test]
        fn valid_branch_name(branch_name in "[a-zA-Z0-9_-]+") {
            // Valid names: alphanumeric, underscore, hyphen
            assert!(BranchName::try_parse(branch_name).is_ok());
        }

        #[test]
        fn valid_branch_name_with_slashes(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+"
        ) {
            let branch_name = format!("{}/{}", prefix, suffix);
            assert!(BranchName::try_parse(branch_name).is_ok());
        }

        #[test]
        fn invalid_branch_name_starting_with_dot(suffix in "[a-zA-Z0-9_-]+") {
            assert!(BranchName::try_parse(format!(".{}", suffix)).is_err());
        }

        #[test]
        fn invalid_branch_name_ending_with_lock(prefix in "[a-zA-Z0-9_-]+") {
            assert!(BranchName::try_parse(format!("{}.lock", prefix)).is_err());
        }

        #[test]
        fn invalid_branch_name_with_consecutive_dots(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+"
        ) {
            assert!(BranchName::try_parse(format!("{}..{}", prefix, suffix)).is_err());
        }

        #[test]
        fn invalid_branch_name_with_empty_component(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+"
        ) {
            assert!(BranchName::try_parse(format!("{}//{}", prefix, suffix)).is_err());
        }

        #[test]
        fn invalid_branch_name_with_special_chars(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+",
            special_char in r"[\*:\?\[\\^~ ]"
        ) {
            let branch_name = format!("{}{}{}", prefix, special_char, suffix);
            assert!(BranchName::try_parse(branch_name).is_err());
        }
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(BranchName::try_parse("").is_err());
        assert!(RefName::try_parse("").is_err());
    }

    #[test]
    fn absolute_ref_names_are_rejected() {
        assert!(RefName::try_parse("/etc/passwd").is_err());
        assert!(RefName::try_parse("refs/../../outside").is_err());
    }

    #[test]
    fn branch_ref_round_trips_through_branch_name() {
        let branch = BranchName::try_parse("feature/x").unwrap();
        let ref_name = branch.to_branch_ref();

        assert_eq!(ref_name.as_ref(), "refs/heads/feature/x");
        assert_eq!(ref_name.branch_name(), Some(branch));
        assert_eq!(RefName::head().branch_name(), None);
    }
}
