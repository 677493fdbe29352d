//! POSIX path normalization for the virtual filesystem layer.
//!
//! Paths are `/`-separated with leading and trailing slashes optional; the
//! empty string and `/` both denote the scope root.

/// A normalized path, split into the directory chain and the final name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    /// Directory segments leading to the final name; empty for a top-level
    /// entry.
    pub directories: Vec<String>,
    /// The last path segment.
    pub filename: String,
}

/// True if the path denotes the scope root rather than a named entry.
pub fn is_root_path(path: &str) -> bool {
    path.is_empty() || path == "/"
}

/// Strip the optional leading and trailing slash and split the remainder.
pub fn split_path(path: &str) -> PathParts {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

    let mut directories: Vec<String> = trimmed.split('/').map(str::to_string).collect();
    let filename = directories.pop().unwrap_or_default();
    PathParts { directories, filename }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_top_level_entry() {
        let parts = split_path("/foo.txt");
        assert!(parts.directories.is_empty());
        assert_eq!(parts.filename, "foo.txt");
    }

    #[test]
    fn splits_nested_path() {
        let parts = split_path("/docs/notes/a.txt");
        assert_eq!(parts.directories, vec!["docs".to_string(), "notes".to_string()]);
        assert_eq!(parts.filename, "a.txt");
    }

    #[test]
    fn slashes_are_optional() {
        assert_eq!(split_path("docs/a.txt"), split_path("/docs/a.txt"));
        assert_eq!(split_path("/docs/a.txt/"), split_path("/docs/a.txt"));
    }

    #[test]
    fn root_paths() {
        assert!(is_root_path(""));
        assert!(is_root_path("/"));
        assert!(!is_root_path("/a"));
    }

    proptest! {
        #[test]
        fn split_recovers_joined_segments(
            segments in proptest::collection::vec("[a-zA-Z0-9._ -]{1,12}", 1..6)
        ) {
            let joined = format!("/{}", segments.join("/"));
            let parts = split_path(&joined);
            prop_assert_eq!(parts.filename.as_str(), segments.last().unwrap().as_str());
            prop_assert_eq!(parts.directories.len(), segments.len() - 1);
            prop_assert_eq!(&parts.directories[..], &segments[..segments.len() - 1]);
        }
    }
}
