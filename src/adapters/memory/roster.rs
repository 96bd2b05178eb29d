//! YAML actor roster.
//!
//! ```yaml
//! actors:
//!   - id: "1001"
//!     role: approver
//!     name: Olga
//!     phone: "+7 912 000 11 22"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::directory::Actor;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub actors: Vec<Actor>,
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid roster {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Reads and validates a roster file.
pub fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let text = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| RosterError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directory::Role;
    use std::io::Write;

    #[test]
    fn loads_actors_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
actors:
  - id: "1001"
    role: approver
    name: Olga
    phone: "+7 912 000 11 22"
  - id: "2001"
    role: fulfiller
    name: Petr
    phone: "8 (912) 333-44-55"
"#
        )
        .unwrap();

        let roster = load_roster(file.path()).unwrap();

        assert_eq!(roster.actors.len(), 2);
        assert_eq!(roster.actors[1].role, Role::Fulfiller);
    }

    #[test]
    fn rejects_bad_phone() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "actors:\n  - id: \"1\"\n    role: requester\n    name: A\n    phone: \"12\"\n"
        )
        .unwrap();

        assert!(matches!(
            load_roster(file.path()),
            Err(RosterError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_roster(&dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(RosterError::Io { .. })));
    }
}
