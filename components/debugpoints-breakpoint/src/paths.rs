use std::path::{Path, PathBuf};

/// Normalizes host path quirks before comparison. The one that matters in
/// practice: some hosts report the same file with inconsistent casing of a
/// Windows drive prefix (`C:` vs `c:`, with or without a leading slash).
pub fn normalize_path(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    let bytes = text.as_bytes();

    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_uppercase() {
        let mut out = String::with_capacity(text.len());
        out.push(bytes[0].to_ascii_lowercase() as char);
        out.push_str(&text[1..]);
        return PathBuf::from(out);
    }

    if bytes.len() >= 3
        && (bytes[0] == b'/' || bytes[0] == b'\\')
        && bytes[2] == b':'
        && bytes[1].is_ascii_uppercase()
    {
        let mut out = String::with_capacity(text.len());
        out.push(bytes[0] as char);
        out.push(bytes[1].to_ascii_lowercase() as char);
        out.push_str(&text[2..]);
        return PathBuf::from(out);
    }

    path.to_path_buf()
}

/// Renders `path` relative to `root` with the leading separator stripped,
/// the form ignore patterns are matched against. A path outside `root` is
/// returned whole (normalized), so loose patterns still get a chance.
pub fn relative_to_root(path: &Path, root: &Path) -> String {
    let path = normalize_path(path).to_string_lossy().into_owned();
    let root = normalize_path(root).to_string_lossy().into_owned();

    let stripped = path.strip_prefix(&root).unwrap_or(&path);
    stripped
        .trim_start_matches(['/', '\\'])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_prefix_lowercased() {
        assert_eq!(
            normalize_path(Path::new("C:/work/a.ts")),
            PathBuf::from("c:/work/a.ts")
        );
        assert_eq!(
            normalize_path(Path::new("/C:/work/a.ts")),
            PathBuf::from("/c:/work/a.ts")
        );
        assert_eq!(
            normalize_path(Path::new("/root/a.ts")),
            PathBuf::from("/root/a.ts")
        );
    }

    #[test]
    fn relative_strips_root_and_separator() {
        assert_eq!(
            relative_to_root(Path::new("/root/generated/x.ts"), Path::new("/root")),
            "generated/x.ts"
        );
        assert_eq!(
            relative_to_root(Path::new("/other/b.ts"), Path::new("/root")),
            "other/b.ts"
        );
    }
}
