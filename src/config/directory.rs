//! Directory seeding configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Optional YAML roster loaded into the directory at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfig {
    pub roster_path: Option<PathBuf>,
}
