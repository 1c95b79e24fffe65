use std::collections::HashSet;

use ammonia::Builder;

/// Strips all markup from user supplied text and trims it.
/// Returns `None` when nothing is left.
pub fn clean_text(input: Option<&str>) -> Option<String> {
    let raw = input?.trim();
    if raw.is_empty() {
        return None;
    }

    let cleaned = Builder::default()
        .tags(HashSet::new())
        .clean(raw)
        .to_string();
    let cleaned = cleaned.trim();

    (!cleaned.is_empty()).then(|| cleaned.to_string())
}
