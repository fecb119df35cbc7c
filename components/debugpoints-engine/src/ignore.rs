//! Ignore-pattern matching.
//!
//! Users write loose patterns (`*.generated.*`, `vendor/`) and expect
//! partial-path containment, not anchored equality, so each pattern is
//! compiled as a glob allowed to match anywhere inside the candidate.

use globset::GlobBuilder;

/// True if any of `patterns` matches anywhere within `candidate`.
///
/// `candidate` should be workspace-relative with the leading separator
/// stripped (see `debugpoints_breakpoint::relative_to_root`). An empty
/// pattern list never matches; an unparseable pattern is skipped with a
/// warning.
pub fn matches(candidate: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| contains(candidate, pattern))
}

fn contains(candidate: &str, pattern: &str) -> bool {
    // `*` must cross separators here, both in the containment wrapper and
    // inside the user's pattern.
    let glob = match GlobBuilder::new(&format!("*{pattern}*"))
        .literal_separator(false)
        .build()
    {
        Ok(glob) => glob,
        Err(error) => {
            tracing::warn!(%pattern, %error, "skipping unparseable ignore pattern");
            return false;
        }
    };
    glob.compile_matcher().is_match(candidate)
}
