use crate::error::KernelError;
use std::fmt;

/// Namespace half of a registry id: a non-empty `[a-z0-9_]` token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn validate(token: &str, what: &str) -> Result<(), KernelError> {
        if token.is_empty() {
            return Err(KernelError::invalid_id(format!("{what} is empty")));
        }
        if let Some(bad) = token.chars().find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '_')) {
            return Err(KernelError::invalid_id(format!("{what} '{token}' contains '{bad}'")));
        }
        Ok(())
    }
}

impl TryFrom<&str> for ProjectId {
    type Error = KernelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::validate(value, "project id")?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for ProjectId {
    type Error = KernelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::validate(&value, "project id")?;
        Ok(Self(value))
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_empty_and_foreign_characters() {
        for bad in ["", "Demo", "my-mod", "a:b", "white noise"] {
            assert!(
                matches!(ProjectId::try_from(bad), Err(KernelError::InvalidId { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    proptest! {
        #[test]
        fn accepts_lowercase_tokens(token in "[a-z0-9_]{1,24}") {
            let id = ProjectId::try_from(token.as_str()).expect("valid token");
            prop_assert_eq!(id.as_str(), token.as_str());
        }
    }
}
