use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AllowListError {
    #[error("Failed to read allow-list file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse allow-list file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The set of module specifiers a submission may import or require.
///
/// An empty allow-list is a valid, maximally restrictive state. Callers that
/// load from disk are expected to degrade a failed load to `AllowList::default()`
/// with a warning, never abort the scan.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    specifiers: Vec<String>,
}

/// On-disk document shape: `{"allowed": ["fs", "path"]}`. Anything else is a
/// parse error and degrades to deny-all.
#[derive(Debug, Deserialize)]
struct AllowListDocument {
    allowed: Vec<String>,
}

impl AllowList {
    pub fn load(path: &Path) -> Result<Self, AllowListError> {
        let content = std::fs::read_to_string(path)?;
        let doc: AllowListDocument = serde_json::from_str(&content)?;
        Ok(Self {
            specifiers: doc.allowed,
        })
    }

    pub fn contains(&self, specifier: &str) -> bool {
        self.specifiers.iter().any(|s| s == specifier)
    }

    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty()
    }

    /// Specifiers in document order, for the report header.
    pub fn specifiers(&self) -> &[String] {
        &self.specifiers
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            specifiers: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_allowed_field() {
        let dir = std::env::temp_dir().join("sandscan-allowlist-ok");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("allowed.json");
        std::fs::write(&path, r#"{"allowed": ["fs", "path"]}"#).unwrap();

        let list = AllowList::load(&path).unwrap();
        assert!(list.contains("fs"));
        assert!(list.contains("path"));
        assert!(!list.contains("child_process"));
    }

    #[test]
    fn missing_file_is_an_error_not_a_panic() {
        let result = AllowList::load(Path::new("/nonexistent/allowed.json"));
        assert!(matches!(result, Err(AllowListError::Io(_))));
    }

    #[test]
    fn wrong_shape_is_a_parse_error() {
        let dir = std::env::temp_dir().join("sandscan-allowlist-shape");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("allowed.json");
        std::fs::write(&path, r#"{"allowed": "fs"}"#).unwrap();

        assert!(matches!(
            AllowList::load(&path),
            Err(AllowListError::Parse(_))
        ));
    }

    #[test]
    fn empty_list_denies_everything() {
        let list = AllowList::default();
        assert!(list.is_empty());
        assert!(!list.contains("fs"));
    }
}
