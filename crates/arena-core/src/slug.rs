//! Slug normalization and derivation.

use deunicode::deunicode;

/// Fallback slug for titles with no usable characters.
pub const FALLBACK_SLUG: &str = "article";

/// Normalize an incoming URL slug for lookup.
///
/// The public URL space is case-insensitive, so `DodgeBall` and `dodgeball`
/// address the same record.
pub fn normalize(raw: &str) -> String {
    raw.trim().trim_matches('/').to_lowercase()
}

/// Derive a URL-safe slug from a title.
///
/// Transliterates to ASCII, spells out `&` as `and`, lowercases, drops
/// punctuation and joins words with single hyphens: `"My First Post!"`
/// becomes `"my-first-post"`.
pub fn slugify(title: &str) -> String {
    let ascii = deunicode(title).replace('&', " and ");
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
        }
        // Everything else is stripped without introducing a separator.
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Append a numeric disambiguation suffix (`base-2`, `base-3`, ...).
pub fn with_suffix(base: &str, n: u32) -> String {
    format!("{base}-{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("DodgeBall"), "dodgeball");
        assert_eq!(normalize(" /Leeds/ "), "leeds");
    }

    #[test]
    fn test_slugify_punctuation() {
        assert_eq!(slugify("My First Post!"), "my-first-post");
        assert_eq!(slugify("Jump: The Sequel"), "jump-the-sequel");
        assert_eq!(slugify("  multiple   spaces  "), "multiple-spaces");
        assert_eq!(slugify("Don't Stop"), "dont-stop");
    }

    #[test]
    fn test_slugify_ampersand() {
        assert_eq!(slugify("Tips & Tricks"), "tips-and-tricks");
        assert_eq!(slugify("Bounce&Burn"), "bounce-and-burn");
    }

    #[test]
    fn test_slugify_transliterates() {
        assert_eq!(slugify("Café Crème"), "cafe-creme");
        assert_eq!(slugify("Fête d'été"), "fete-dete");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify("!!!"), FALLBACK_SLUG);
        assert_eq!(slugify(""), FALLBACK_SLUG);
    }

    #[test]
    fn test_with_suffix() {
        assert_eq!(with_suffix("my-post", 2), "my-post-2");
    }
}
