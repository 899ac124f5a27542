//! Permanent redirects from legacy paths, checked before routing.

/// A legacy path pattern and its canonical target.
///
/// A `:slug` segment in `from` matches exactly one non-empty path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub from: &'static str,
    pub to: &'static str,
}

const fn redirect(from: &'static str, to: &'static str) -> Redirect {
    Redirect { from, to }
}

pub static REDIRECTS: &[Redirect] = &[
    redirect("/faqs/:slug", "/faqs"),
    redirect("/gallery/:slug", "/gallery"),
    redirect("/offers/:slug", "/offers"),
    redirect("/demo/:slug", "/franchise"),
    redirect("/newsletter", "/blog"),
    redirect("/tv_screen", "/activities"),
    redirect("/corporate", "/vip-party-package"),
    redirect("/banner-join-now-form", "/booking-now"),
    redirect("/fit-jump-is-amazing-what-a-work-out", "/blog"),
    redirect(
        "/i-never-thought-i-could-enjoy-a-class-so-much-great-atmosphere-great-session-i-am-now-addicted",
        "/blog",
    ),
    redirect("/halloween-at-jumparena", "/event"),
    redirect("/select-park", "/location"),
    redirect("/groups-parties", "/activities/parties"),
    redirect("/monthly-jump-pass", "/offers"),
    redirect("/select-waiver", "/faqs"),
    redirect("/waiver", "/faqs"),
    redirect("/whats-on", "/event"),
    redirect("/leeds", "/location/leeds"),
    redirect("/leeds-party-package", "/location/leeds"),
    redirect("/terms-conditions", "/legal/tc"),
    redirect("/black-friday", "/offers"),
    redirect("/wp-content/uploads/2017/10", "/gallery"),
];

impl Redirect {
    /// Whether a normalized request path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        let mut pattern = self.from.split('/');
        let mut segments = path.split('/');
        loop {
            match (pattern.next(), segments.next()) {
                (None, None) => return true,
                (Some(":slug"), Some(segment)) if !segment.is_empty() => {}
                (Some(expected), Some(segment)) if expected == segment => {}
                _ => return false,
            }
        }
    }
}

/// Target of the first redirect matching `path`.
///
/// A single trailing slash is ignored, so `/waiver/` and `/waiver` redirect
/// alike.
pub fn lookup(path: &str) -> Option<&'static str> {
    let path = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    };
    REDIRECTS.iter().find(|r| r.matches(path)).map(|r| r.to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_redirects() {
        assert_eq!(lookup("/newsletter"), Some("/blog"));
        assert_eq!(lookup("/leeds"), Some("/location/leeds"));
        assert_eq!(lookup("/groups-parties"), Some("/activities/parties"));
        assert_eq!(lookup("/terms-conditions"), Some("/legal/tc"));
    }

    #[test]
    fn test_slug_pattern_matches_one_segment() {
        assert_eq!(lookup("/faqs/how-to-book"), Some("/faqs"));
        assert_eq!(lookup("/demo/anything"), Some("/franchise"));
        assert_eq!(lookup("/faqs/a/b"), None);
        assert_eq!(lookup("/faqs"), None);
    }

    #[test]
    fn test_trailing_slash() {
        assert_eq!(lookup("/wp-content/uploads/2017/10/"), Some("/gallery"));
        assert_eq!(lookup("/wp-content/uploads/2017/10"), Some("/gallery"));
        assert_eq!(lookup("/waiver/"), Some("/faqs"));
    }

    #[test]
    fn test_canonical_paths_pass_through() {
        for path in ["/", "/blog", "/location/leeds", "/activities/parties", "/editeur"] {
            assert_eq!(lookup(path), None, "{path} should not redirect");
        }
    }

    #[test]
    fn test_targets_never_redirect() {
        for r in REDIRECTS {
            assert_eq!(lookup(r.to), None, "{} loops", r.to);
        }
    }
}
