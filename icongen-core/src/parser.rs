//! Icon source parsing: font and JSON variants normalized into an [`IconSet`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::error::Error;
use crate::filters::to_codepoint_hex;

/// First scalar of the Private Use Area block scanned for icon glyphs.
pub const PUA_FIRST: u32 = 0xE000;
/// Last scalar of the Private Use Area block, inclusive.
pub const PUA_LAST: u32 = 0xF8FF;

/// Canonical icon metadata extracted from a source file.
///
/// Keys are raw glyph names exactly as sourced; values are uppercase hex
/// codepoint text with no `0x` prefix (unvalidated for the JSON variant).
/// Constructed once per parse and treated as immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconSet {
    pub family_name: Option<String>,
    pub icons: BTreeMap<String, String>,
}

/// Narrow view over a font's glyph inventory.
///
/// The underlying font APIs are a black box; everything the PUA scan needs
/// is behind this trait so it can run against a fake in tests. `Sync` because
/// the scan resolves glyph names in parallel.
pub trait GlyphSource: Sync {
    /// Family name reported by the font, if any.
    fn family_name(&self) -> Option<String>;
    /// Whether the font's character set covers the scalar.
    fn has_scalar(&self, scalar: u32) -> bool;
    /// Glyph name for the scalar, if one can be resolved.
    fn glyph_name(&self, scalar: u32) -> Option<String>;
}

/// The closed set of supported source kinds, resolved once from the file
/// extension before any I/O happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Font,
    Json,
}

fn source_kind(path: &Path) -> Result<SourceKind, Error> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("ttf") | Some("otf") => Ok(SourceKind::Font),
        Some("json") => Ok(SourceKind::Json),
        other => Err(Error::UnsupportedSourceFormat(
            other.unwrap_or_default().to_string(),
        )),
    }
}

/// Parse an icon source file into an [`IconSet`].
pub fn parse(path: &Path) -> Result<IconSet> {
    match source_kind(path)? {
        SourceKind::Font => parse_font(path),
        SourceKind::Json => parse_json(path),
    }
}

/// Scan a font's Private Use Area and collect named glyphs.
///
/// Scalars whose glyph name cannot be resolved are logged and skipped; the
/// scan never aborts over a single glyph. Name resolution fans out per
/// scalar, so only map-key uniqueness is guaranteed here. Ordering belongs
/// to the context builder.
pub fn scan_pua(source: &dyn GlyphSource) -> IconSet {
    let pairs: Vec<(String, String)> = (PUA_FIRST..=PUA_LAST)
        .into_par_iter()
        .filter(|&scalar| source.has_scalar(scalar))
        .filter_map(|scalar| match source.glyph_name(scalar) {
            Some(name) => Some((name, to_codepoint_hex(scalar))),
            None => {
                log::warn!("{}", Error::GlyphNameUnresolved { scalar });
                None
            }
        })
        .collect();

    IconSet {
        family_name: source.family_name(),
        icons: pairs.into_iter().collect(),
    }
}

#[cfg(feature = "fontations")]
fn parse_font(path: &Path) -> Result<IconSet> {
    let data = fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    let source = fontations::FontationsGlyphSource::new(&data).ok_or(Error::UnreadableFont {
        path: path.to_path_buf(),
    })?;
    Ok(scan_pua(&source))
}

#[cfg(not(feature = "fontations"))]
fn parse_font(path: &Path) -> Result<IconSet> {
    let _ = path;
    Err(Error::UnsupportedSourceFormat(
        "font parsing requires the fontations feature".to_string(),
    )
    .into())
}

fn parse_json(path: &Path) -> Result<IconSet> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    // Verbatim copy, no hex validation: downstream consumers tolerate
    // malformed codepoint text coming from this path.
    let icons: BTreeMap<String, String> =
        serde_json::from_str(&data).map_err(|_| Error::MalformedJsonSource {
            path: path.to_path_buf(),
        })?;

    Ok(IconSet {
        family_name: None,
        icons,
    })
}

#[cfg(feature = "fontations")]
mod fontations {
    use read_fonts::tables::name::NameId;
    use read_fonts::types::GlyphId16;
    use read_fonts::{FontRef, TableProvider};
    use skrifa::{FontRef as SkrifaFontRef, MetadataProvider};

    use super::GlyphSource;

    /// Production [`GlyphSource`] backed by read-fonts and skrifa.
    pub struct FontationsGlyphSource<'a> {
        font: FontRef<'a>,
        skrifa: SkrifaFontRef<'a>,
    }

    impl<'a> FontationsGlyphSource<'a> {
        /// `None` when no font face can be read from the data.
        pub fn new(data: &'a [u8]) -> Option<Self> {
            let font = FontRef::new(data).ok()?;
            let skrifa = SkrifaFontRef::new(data).ok()?;
            Some(Self { font, skrifa })
        }
    }

    impl GlyphSource for FontationsGlyphSource<'_> {
        fn family_name(&self) -> Option<String> {
            family_name(&self.font)
        }

        fn has_scalar(&self, scalar: u32) -> bool {
            self.skrifa.charmap().map(scalar).is_some()
        }

        fn glyph_name(&self, scalar: u32) -> Option<String> {
            let gid = self.skrifa.charmap().map(scalar)?;
            let gid16 = u16::try_from(gid.to_u32()).ok().map(GlyphId16::new)?;
            let post = self.font.post().ok()?;
            post.glyph_name(gid16).map(str::to_owned)
        }
    }

    fn family_name(font: &FontRef) -> Option<String> {
        let name_table = font.name().ok()?;
        let data = name_table.string_data();
        let wanted = [NameId::FAMILY_NAME, NameId::TYPOGRAPHIC_FAMILY_NAME];

        for id in wanted {
            for record in name_table.name_record() {
                if record.name_id() != id || !record.is_unicode() {
                    continue;
                }
                if let Ok(entry) = record.string(data) {
                    let rendered = entry.to_string();
                    if !rendered.trim().is_empty() {
                        return Some(rendered.trim().to_string());
                    }
                }
            }
        }

        None
    }
}
