use std::str::FromStr;

use crate::domain::StorageError;

/// Storage scope a path is resolved against.
///
/// Each scope maps to a distinct Google Drive listing space; objects never
/// move between spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The user-visible hierarchical space ("My Drive").
    Documents,
    /// The hidden per-app space; invisible to the user in the Drive UI.
    AppData,
}

impl Scope {
    /// The Drive space identifier used to scope listing queries.
    ///
    /// For the app-data space this identifier doubles as the synthetic parent
    /// container accepted by object-creation calls.
    pub fn space(&self) -> &'static str {
        match self {
            Scope::Documents => "drive",
            Scope::AppData => "appDataFolder",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Documents => "documents",
            Scope::AppData => "app_data",
        }
    }
}

impl FromStr for Scope {
    type Err = StorageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "documents" => Ok(Scope::Documents),
            "app_data" => Ok(Scope::AppData),
            other => Err(StorageError::InvalidScope(other.to_string())),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn parses_known_scopes() {
        assert_eq!("documents".parse::<Scope>().unwrap(), Scope::Documents);
        assert_eq!("app_data".parse::<Scope>().unwrap(), Scope::AppData);
    }

    #[test]
    fn rejects_unknown_scope() {
        let err = "dropbox".parse::<Scope>().unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidScope);
    }

    #[test]
    fn maps_to_drive_spaces() {
        assert_eq!(Scope::Documents.space(), "drive");
        assert_eq!(Scope::AppData.space(), "appDataFolder");
    }
}
