//! Idempotent output writing.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Where rendered text goes: standard output or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    Console,
    File(PathBuf),
}

/// What a write call actually did to the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

impl OutputDestination {
    /// Write `content` to the destination.
    ///
    /// Console destinations always write; `only_if_changed` applies to file
    /// destinations only. When set, the existing file is byte-compared
    /// against `content` and an identical file is left untouched. A failure
    /// to read the existing file counts as a mismatch and falls through to
    /// the write.
    pub fn write(&self, content: &str, only_if_changed: bool) -> Result<WriteOutcome> {
        match self {
            OutputDestination::Console => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                handle
                    .write_all(content.as_bytes())
                    .map_err(|source| Error::WriteFailure {
                        path: PathBuf::from("(stdout)"),
                        source,
                    })?;
                Ok(WriteOutcome::Written)
            }
            OutputDestination::File(path) => {
                if only_if_changed
                    && fs::read(path).is_ok_and(|existing| existing == content.as_bytes())
                {
                    return Ok(WriteOutcome::Unchanged);
                }

                fs::write(path, content).map_err(|source| Error::WriteFailure {
                    path: path.clone(),
                    source,
                })?;
                Ok(WriteOutcome::Written)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn identical_content_skips_the_write() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("out.swift");
        fs::write(&path, "generated\n").expect("seed file");

        let destination = OutputDestination::File(path.clone());
        let outcome = destination.write("generated\n", true).expect("write");

        assert_eq!(outcome, WriteOutcome::Unchanged);
        assert_eq!(fs::read_to_string(&path).expect("read"), "generated\n");
    }

    #[test]
    fn missing_file_is_written() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("out.swift");

        let destination = OutputDestination::File(path.clone());
        let outcome = destination.write("generated\n", true).expect("write");

        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&path).expect("read"), "generated\n");
    }

    #[test]
    fn changed_content_is_rewritten() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("out.swift");
        fs::write(&path, "old\n").expect("seed file");

        let destination = OutputDestination::File(path.clone());
        let outcome = destination.write("new\n", true).expect("write");

        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&path).expect("read"), "new\n");
    }

    #[test]
    fn unwritable_path_reports_write_failure() {
        let destination = OutputDestination::File(PathBuf::from("/no/such/dir/out.swift"));
        let err = destination.write("content", false).unwrap_err();
        assert!(matches!(err, Error::WriteFailure { .. }));
    }
}
