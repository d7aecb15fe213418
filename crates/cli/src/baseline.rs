//! Baseline (suppression) file handling.
//!
//! A baseline file allowlists known violations by their stable identity
//! key, one key per line. `#` starts a comment and blank lines are
//! ignored. Keys depend only on (element path, change kind), so a baseline
//! stays valid across message rewording.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use surface_diff::Diagnostic;

/// Load a baseline file into a suppression set.
pub fn load_baseline(path: &Path) -> io::Result<BTreeSet<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_baseline(&contents))
}

/// Parse baseline file contents: trimmed lines, skipping comments and
/// blanks.
pub fn parse_baseline(contents: &str) -> BTreeSet<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Write every diagnostic's violation key as a baseline file.
///
/// Both error and warning keys are written, so a freshly written baseline
/// makes the next identical run gate clean.
pub fn write_baseline(path: &Path, diagnostics: &[Diagnostic]) -> io::Result<()> {
    let keys: BTreeSet<&str> = diagnostics
        .iter()
        .map(|d| d.mismatch.violation_key.as_str())
        .collect();

    let mut lines = vec![
        "# surface baseline: known violations allowlisted by identity key.".to_string(),
        "# One key per line; '#' starts a comment.".to_string(),
    ];
    lines.extend(keys.into_iter().map(str::to_string));
    lines.push(String::new());
    fs::write(path, lines.join("\n"))
}
