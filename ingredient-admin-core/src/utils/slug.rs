/// Derive a URL slug from a display name.
///
/// Lowercases the input and replaces every run of whitespace with a single
/// `-`. Nothing is trimmed, so leading or trailing whitespace becomes a
/// leading or trailing hyphen (`"  Multiple   Spaces "` gives
/// `"-multiple-spaces-"`), and no other characters are filtered.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }

    slug
}
