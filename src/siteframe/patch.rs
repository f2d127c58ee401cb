//! Text patches over raw payloads.

use super::error::SiteframeError;

/// An edit to the raw payload text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// Replace the whole payload.
    Full(String),
    /// Replace the first exact occurrence of `search`.
    Replace { search: String, replace: String },
}

impl Patch {
    pub fn apply(&self, payload: &str) -> Result<String, SiteframeError> {
        match self {
            Self::Full(content) => Ok(content.clone()),
            Self::Replace { search, .. } if search.is_empty() => Err(
                SiteframeError::InvalidPatch("search text must not be empty".into()),
            ),
            Self::Replace { search, replace } => {
                if !payload.contains(search.as_str()) {
                    return Err(SiteframeError::SearchNotFound);
                }
                Ok(payload.replacen(search.as_str(), replace, 1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_replaces_everything() {
        let patch = Patch::Full("new".into());
        assert_eq!(patch.apply("old").unwrap(), "new");
    }

    #[test]
    fn test_replace_first_occurrence_only() {
        let patch = Patch::Replace {
            search: "<p>a</p>".into(),
            replace: "<p>b</p>".into(),
        };
        assert_eq!(
            patch.apply("<p>a</p><p>a</p>").unwrap(),
            "<p>b</p><p>a</p>"
        );
    }

    #[test]
    fn test_replace_missing_search() {
        let patch = Patch::Replace {
            search: "absent".into(),
            replace: "x".into(),
        };
        assert_eq!(patch.apply("payload"), Err(SiteframeError::SearchNotFound));
    }

    #[test]
    fn test_replace_empty_search_is_invalid() {
        let patch = Patch::Replace {
            search: String::new(),
            replace: "x".into(),
        };
        assert!(matches!(
            patch.apply("payload"),
            Err(SiteframeError::InvalidPatch(_))
        ));
    }
}
