use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// URL slug for a title, category, tag or author name.
///
/// Lowercases, drops anything outside `[a-z0-9]`, whitespace and hyphens,
/// turns whitespace runs into single hyphens and strips hyphens at both ends.
pub fn generate_slug(text: &str) -> String {
    let lower = text.to_lowercase();
    let cleaned = DISALLOWED.replace_all(&lower, "");
    let hyphenated = WHITESPACE.replace_all(&cleaned, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim().trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_slug_basic() {
        assert_eq!(generate_slug("Neon Dreams"), "neon-dreams");
        assert_eq!(generate_slug("Motion Graphics"), "motion-graphics");
    }

    #[test]
    fn test_generate_slug_strips_special_chars() {
        assert_eq!(generate_slug("UI/UX"), "uiux");
        assert_eq!(generate_slug("3D Animation!"), "3d-animation");
        assert_eq!(generate_slug("Café Racer"), "caf-racer");
    }

    #[test]
    fn test_generate_slug_collapses_separators() {
        assert_eq!(generate_slug("  Hello -- World  "), "hello-world");
        assert_eq!(generate_slug("a\t\tb"), "a-b");
        assert_eq!(generate_slug("--edge--"), "edge");
    }

    #[test]
    fn test_generate_slug_empty() {
        assert_eq!(generate_slug(""), "");
        assert_eq!(generate_slug("!!!"), "");
    }
}
