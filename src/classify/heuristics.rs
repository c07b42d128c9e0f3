//! Body keyword heuristics
//!
//! Two stateless detectors over raw response text. The phrase tables are
//! named data so classifier tests can enumerate and extend them without
//! touching control flow. All matching is case-insensitive; phrases are
//! stored lowercase.

/// Phrases an anonymous viewer sees when a login wall or "page not
/// available" screen is shown. Multilingual: the platform localizes the
/// wall, so English and German variants are both listed. Note the curly
/// apostrophe in the English "isn't" variant, which is what the platform
/// actually renders.
pub const LOGIN_WALL_PHRASES: &[&str] = &[
    "log in",
    "anmelden",
    "sorry, this page isn\u{2019}t available",
    "diese seite ist leider nicht verf\u{fc}gbar",
];

/// Tokens tied to the platform's internal data model. Their presence in an
/// anonymous response body suggests internal fields were exposed.
pub const LEAKY_KEYWORDS: &[&str] = &[
    "shortcode",
    "video_url",
    "display_url",
    "graphql",
    "media_id",
];

/// True when none of the login-wall phrases appear in the body.
///
/// Used only on plain HTML page fetches: a 200 without any wall signal
/// means an anonymous viewer may have been shown real content.
pub fn missing_login_wall(body: &str) -> bool {
    let haystack = body.to_lowercase();
    !LOGIN_WALL_PHRASES.iter().any(|p| haystack.contains(p))
}

/// True when the body contains any leaky keyword, case-insensitively.
pub fn has_leaky_keywords(body: &str) -> bool {
    let haystack = body.to_lowercase();
    LEAKY_KEYWORDS.iter().any(|p| haystack.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_lowercase() {
        for phrase in LOGIN_WALL_PHRASES.iter().chain(LEAKY_KEYWORDS) {
            assert_eq!(*phrase, phrase.to_lowercase());
        }
    }

    #[test]
    fn login_wall_present() {
        assert!(!missing_login_wall("<html><body>Log in to continue</body></html>"));
        assert!(!missing_login_wall("Bitte ANMELDEN um fortzufahren"));
        assert!(!missing_login_wall("Sorry, this page isn\u{2019}t available."));
    }

    #[test]
    fn login_wall_absent() {
        assert!(missing_login_wall("<html><body>full reel content here</body></html>"));
        assert!(missing_login_wall(""));
    }

    #[test]
    fn leaky_keywords_case_insensitive() {
        assert!(has_leaky_keywords(r#"{"data":{"GraphQL":{}}}"#));
        assert!(has_leaky_keywords("window.__data = {shortcode: 'abc'}"));
        assert!(has_leaky_keywords("DISPLAY_URL=https://..."));
    }

    #[test]
    fn clean_body_has_no_leaks() {
        assert!(!has_leaky_keywords("<html><body>Log in</body></html>"));
        assert!(!has_leaky_keywords(""));
    }
}
