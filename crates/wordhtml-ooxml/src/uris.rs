//! Path helpers for relationship targets

/// Resolve a relationship target to a path inside the package
///
/// Absolute targets are rooted at the package; relative ones are
/// resolved against `base` (the directory of the source part).
pub fn uri_to_zip_entry_name(base: &str, uri: &str) -> String {
    match uri.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None if base.is_empty() => uri.to_string(),
        None => format!("{}/{}", base.trim_end_matches('/'), uri),
    }
}

/// Replace (or add) the fragment of a URI
pub fn replace_fragment(uri: &str, fragment: &str) -> String {
    let base = uri.split_once('#').map_or(uri, |(base, _)| base);
    format!("{}#{}", base, fragment)
}

/// Split a part path into its directory and file name
pub fn split_path(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

/// Location of the relationships part for a given part
///
/// `word/document.xml` → `word/_rels/document.xml.rels`
pub fn relationships_path(part_path: &str) -> String {
    let (dir, name) = split_path(part_path);
    if dir.is_empty() {
        format!("_rels/{}.rels", name)
    } else {
        format!("{}/_rels/{}.rels", dir, name)
    }
}
