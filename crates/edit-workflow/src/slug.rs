/// Derive the URL-safe slug for a category title.
///
/// The title is lowercased and trimmed, each run of whitespace collapses to a
/// single `_`, and anything outside `[a-z0-9_]` is dropped. The result may be
/// empty.
pub fn derive_slug(title: &str) -> String {
    let lowered = title.to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut gap = false;

    // Dropped characters do not split a whitespace gap: "a & b" is one gap.
    for ch in lowered.trim().chars() {
        if ch.is_whitespace() {
            gap = true;
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
            if gap {
                slug.push('_');
                gap = false;
            }
            slug.push(ch);
        }
    }

    if gap {
        slug.push('_');
    }

    slug
}

/// Check whether `slug` only contains characters `derive_slug` can produce.
pub fn is_derived_form(slug: &str) -> bool {
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
