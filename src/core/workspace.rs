//! Workspace handle for a stockping data root.
//!
//! A Workspace is the logical container for the catalog database and the
//! broker audit log. Every engine operation is scoped to one workspace;
//! nothing reaches outside its root directory.

use crate::core::error::StockpingError;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Workspace {
    /// Absolute path to the workspace root directory.
    pub root: PathBuf,
}

impl Workspace {
    pub fn at(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolves the workspace root: explicit flag, then `STOCKPING_ROOT`,
    /// then `$HOME/.stockping/data`. Creates the directory if needed.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, StockpingError> {
        let root = match explicit {
            Some(dir) => dir,
            None => match std::env::var_os("STOCKPING_ROOT") {
                Some(dir) => PathBuf::from(dir),
                None => {
                    let home = std::env::var_os("HOME").ok_or_else(|| {
                        StockpingError::PathError(
                            "cannot resolve workspace: $HOME is not set and no --root given"
                                .to_string(),
                        )
                    })?;
                    PathBuf::from(home).join(".stockping").join("data")
                }
            },
        };
        std::fs::create_dir_all(&root).map_err(StockpingError::IoError)?;
        Ok(Self { root })
    }
}
