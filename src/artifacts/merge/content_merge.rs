//! Per-file content merge
//!
//! A [`ContentMerger`] receives the three versions of one path (any of which
//! may be absent) and returns the merged content, or `None` when the path
//! should not exist after the merge.

use crate::errors::{IoResultExt, Result, StoreError};
use bytes::{BufMut, Bytes, BytesMut};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

pub const HEAD_LABEL: &str = "HEAD";
pub const BASE_LABEL: &str = "BASE";
pub const MERGE_HEAD_LABEL: &str = "MERGE_HEAD";

pub trait ContentMerger {
    fn merge(
        &self,
        path: &Path,
        base: Option<&[u8]>,
        head: Option<&[u8]>,
        other: Option<&[u8]>,
    ) -> Result<Option<Bytes>>;
}

/// Resolve a path without looking inside the files, when one side left it alone
fn trivial_merge(
    base: Option<&[u8]>,
    head: Option<&[u8]>,
    other: Option<&[u8]>,
) -> Option<Option<Bytes>> {
    let resolved = if head == other || base == other {
        head
    } else if base == head {
        other
    } else {
        return None;
    };

    Some(resolved.map(Bytes::copy_from_slice))
}

/// Merge that never looks inside a file
///
/// A side that left the path unchanged yields to the other side. When both
/// sides changed it differently, the whole file is wrapped in conflict
/// markers, an absent side contributing no lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct WholeFileMerger;

impl ContentMerger for WholeFileMerger {
    fn merge(
        &self,
        path: &Path,
        base: Option<&[u8]>,
        head: Option<&[u8]>,
        other: Option<&[u8]>,
    ) -> Result<Option<Bytes>> {
        if let Some(resolved) = trivial_merge(base, head, other) {
            return Ok(resolved);
        }

        warn!(path = %path.display(), "conflicting changes, writing conflict markers");

        let head = head.unwrap_or_default();
        let other = other.unwrap_or_default();
        let mut merged = BytesMut::with_capacity(head.len() + other.len() + 64);

        merged.put_slice(format!("<<<<<<< {HEAD_LABEL}\n").as_bytes());
        put_section(&mut merged, head);
        merged.put_slice(b"=======\n");
        put_section(&mut merged, other);
        merged.put_slice(format!(">>>>>>> {MERGE_HEAD_LABEL}\n").as_bytes());

        Ok(Some(merged.freeze()))
    }
}

fn put_section(buffer: &mut BytesMut, content: &[u8]) {
    buffer.put_slice(content);
    if !content.is_empty() && !content.ends_with(b"\n") {
        buffer.put_u8(b'\n');
    }
}

/// Line-based merge through an external `diff3 -m`
///
/// Paths that one side left alone are resolved without spawning the tool.
/// Absent versions are passed to `diff3` as empty files.
#[derive(Debug, Clone)]
pub struct Diff3Merger {
    program: String,
}

impl Default for Diff3Merger {
    fn default() -> Self {
        Diff3Merger {
            program: "diff3".to_string(),
        }
    }
}

impl Diff3Merger {
    pub fn with_program(program: impl Into<String>) -> Self {
        Diff3Merger {
            program: program.into(),
        }
    }

    fn temp_file(content: Option<&[u8]>) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new().at_path(&std::env::temp_dir())?;
        file.write_all(content.unwrap_or_default())
            .at_path(file.path())?;
        file.flush().at_path(file.path())?;

        Ok(file)
    }
}

impl ContentMerger for Diff3Merger {
    fn merge(
        &self,
        path: &Path,
        base: Option<&[u8]>,
        head: Option<&[u8]>,
        other: Option<&[u8]>,
    ) -> Result<Option<Bytes>> {
        if let Some(resolved) = trivial_merge(base, head, other) {
            return Ok(resolved);
        }

        let head_file = Self::temp_file(head)?;
        let base_file = Self::temp_file(base)?;
        let other_file = Self::temp_file(other)?;

        let output = Command::new(&self.program)
            .arg("-m")
            .args(["-L", HEAD_LABEL, "-L", BASE_LABEL, "-L", MERGE_HEAD_LABEL])
            .arg(head_file.path())
            .arg(base_file.path())
            .arg(other_file.path())
            .output()
            .map_err(|e| StoreError::ContentMerge {
                path: path.to_path_buf(),
                reason: format!("failed to run {}: {e}", self.program),
            })?;

        // 0 is a clean merge, 1 a merge with conflict markers
        match output.status.code() {
            Some(0) => debug!(path = %path.display(), "merged cleanly"),
            Some(1) => warn!(path = %path.display(), "conflicting changes, diff3 wrote conflict markers"),
            _ => {
                return Err(StoreError::ContentMerge {
                    path: path.to_path_buf(),
                    reason: format!(
                        "{} exited with {}: {}",
                        self.program,
                        output.status,
                        String::from_utf8_lossy(&output.stderr).trim()
                    ),
                });
            }
        }

        Ok(Some(Bytes::from(output.stdout)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn merge(
        base: Option<&str>,
        head: Option<&str>,
        other: Option<&str>,
    ) -> Option<String> {
        WholeFileMerger
            .merge(
                Path::new("file.txt"),
                base.map(str::as_bytes),
                head.map(str::as_bytes),
                other.map(str::as_bytes),
            )
            .unwrap()
            .map(|merged| String::from_utf8(merged.to_vec()).unwrap())
    }

    #[rstest]
    #[case::identical_sides(Some("base"), Some("same"), Some("same"), Some("same"))]
    #[case::only_other_changed(Some("base"), Some("base"), Some("theirs"), Some("theirs"))]
    #[case::only_head_changed(Some("base"), Some("ours"), Some("base"), Some("ours"))]
    #[case::added_on_one_side(None, None, Some("new"), Some("new"))]
    #[case::deleted_on_unchanged_side(Some("base"), Some("base"), None, None)]
    #[case::deleted_on_both_sides(Some("base"), None, None, None)]
    fn one_sided_changes_resolve_cleanly(
        #[case] base: Option<&str>,
        #[case] head: Option<&str>,
        #[case] other: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(merge(base, head, other), expected.map(str::to_string));
    }

    #[test]
    fn conflicting_edits_are_wrapped_in_markers() {
        assert_eq!(
            merge(Some("base\n"), Some("ours\n"), Some("theirs")).unwrap(),
            "<<<<<<< HEAD\nours\n=======\ntheirs\n>>>>>>> MERGE_HEAD\n"
        );
    }

    #[test]
    fn edit_against_delete_keeps_the_edit_inside_markers() {
        assert_eq!(
            merge(Some("base\n"), None, Some("edited\n")).unwrap(),
            "<<<<<<< HEAD\n=======\nedited\n>>>>>>> MERGE_HEAD\n"
        );
    }

    #[test]
    fn missing_diff3_program_is_a_content_merge_error() {
        let merger = Diff3Merger::with_program("definitely-not-an-installed-diff3");

        assert!(matches!(
            merger.merge(Path::new("f"), Some(b"a\n"), Some(b"b\n"), Some(b"c\n")),
            Err(StoreError::ContentMerge { .. })
        ));
    }

    #[test]
    fn diff3_is_skipped_for_one_sided_changes() {
        let merger = Diff3Merger::with_program("definitely-not-an-installed-diff3");

        assert_eq!(
            merger
                .merge(Path::new("f"), Some(b"a\n"), Some(b"a\n"), Some(b"c\n"))
                .unwrap(),
            Some(Bytes::from_static(b"c\n"))
        );
    }
}
