//! icongen-core: the extraction-and-transformation pipeline behind icongen.
//!
//! Icon fonts hide their icons in the Private Use Area, one named glyph per
//! codepoint. This crate digs them out and turns them into generated source
//! code, in four stages:
//!
//! - **Parsing**: a `.ttf`/`.otf` file (introspected through read-fonts and
//!   skrifa) or a flat `.json` name-to-codepoint map becomes a canonical
//!   [`parser::IconSet`].
//! - **Transforming**: the pure functions in [`filters`] rewrite raw glyph
//!   names into code-generation-safe identifiers and escape literals.
//! - **Context assembly**: [`context`] sorts the icon set, binds the filter
//!   set as named template helpers, and hands both to the template engine.
//! - **Writing**: [`output`] writes rendered text idempotently, and
//!   [`manifest`] emits the sidecar JSON describing what was generated.
//!
//! The font-introspection seam is the [`parser::GlyphSource`] trait, so the
//! scan logic stays testable without real font files on disk.

pub mod context;
pub mod error;
pub mod filters;
pub mod manifest;
pub mod output;
pub mod parser;

pub use error::{Error, Result};
