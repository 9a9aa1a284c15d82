//! Loading override catalogs from YAML
//!
//! A catalog maps handler names to [`Overrides`] records, so help texts,
//! aliases and metavars can live next to the binary instead of in code:
//!
//! ```yaml
//! add:
//!   help_map:
//!     x: First operand
//! log:
//!   arg_map: { base: to }
//!   metavar_map: { base: BASE }
//! ```

use crate::definition::Overrides;
use crate::error::{CliarError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Parse an override catalog from a string
pub fn parse_overrides(yaml: &str) -> Result<BTreeMap<String, Overrides>> {
    if yaml.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let catalog: BTreeMap<String, Overrides> = serde_yaml::from_str(yaml)?;
    Ok(catalog)
}

/// Parse an override catalog from a file
pub fn parse_overrides_file(path: &Path) -> Result<BTreeMap<String, Overrides>> {
    let contents = fs::read_to_string(path).map_err(CliarError::Io)?;
    parse_overrides(&contents)
}
