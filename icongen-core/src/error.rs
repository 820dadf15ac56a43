use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input file extension is not one of ttf, otf or json.
    /// Raised before any I/O is attempted.
    #[error("unsupported source format {0:?} (expected a ttf, otf or json file)")]
    UnsupportedSourceFormat(String),

    /// The font collaborator could not produce a single face from the file.
    #[error("unable to read a font face from {path}")]
    UnreadableFont { path: PathBuf },

    /// A PUA scalar is present in the font but has no resolvable glyph name.
    /// Recoverable: the scalar is skipped and the scan continues.
    #[error("no glyph name for U+{scalar:04X}, skipping")]
    GlyphNameUnresolved { scalar: u32 },

    /// The JSON source is not a flat string-to-string mapping.
    #[error("{path} is not a flat JSON object mapping names to codepoints")]
    MalformedJsonSource { path: PathBuf },

    /// A template filter received a value outside its semantic domain.
    #[error("filter {filter:?} expected {expected}, got {found}")]
    InvalidInput {
        filter: &'static str,
        expected: &'static str,
        found: String,
    },

    /// Neither the named nor the explicitly passed template resolves to a file.
    #[error("template {name:?} not found; use --template-path to pass an explicit file")]
    TemplateNotFound { name: String },

    /// Writing the rendered output or the manifest failed. Reported to the
    /// caller, never retried.
    #[error("writing {path} failed")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
