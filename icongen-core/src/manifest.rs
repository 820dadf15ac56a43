//! Sidecar JSON manifest describing the generated icons.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::filters::snake_to_camel_case;
use crate::parser::IconSet;

/// Manifest emitted next to a file destination.
///
/// `unicodes` is keyed by the transformed name, not the raw glyph name.
/// Two raw names can transform to the same key; the later one in icon-set
/// iteration order wins, and the collision is logged.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Manifest {
    pub filename: String,
    pub name: String,
    pub unicodes: BTreeMap<String, String>,
}

impl Manifest {
    /// Build the manifest for a source file and its parsed icon set.
    pub fn from_icon_set(source: &Path, set: &IconSet) -> Self {
        let mut unicodes = BTreeMap::new();

        for (raw, codepoint) in &set.icons {
            let transformed = snake_to_camel_case(raw);
            if let Some(previous) = unicodes.insert(transformed.clone(), codepoint.clone()) {
                log::warn!(
                    "manifest name {transformed:?} maps to more than one glyph, \
                     dropping codepoint {previous}"
                );
            }
        }

        Manifest {
            filename: source
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            name: source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            unicodes,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Sibling path for the manifest: the rendered output's extension replaced
/// with `json`.
pub fn manifest_path(output: &Path) -> PathBuf {
    output.with_extension("json")
}
