use once_cell::sync::Lazy;
use regex::Regex;

pub const UNKNOWN_REGION_SCORE: f64 = 50.0;

pub static REGION_IMPORTANCE: &[(&str, f64)] = &[
    ("global", 100.0),
    ("worldwide", 100.0),
    ("international", 90.0),
    ("united states", 90.0),
    ("us", 90.0),
    ("china", 90.0),
    ("europe", 85.0),
    ("european union", 85.0),
    ("eu", 85.0),
    ("russia", 80.0),
    ("japan", 80.0),
    ("india", 80.0),
    ("uk", 75.0),
    ("united kingdom", 75.0),
    ("germany", 75.0),
    ("france", 75.0),
    ("brazil", 70.0),
    ("canada", 70.0),
    ("australia", 70.0),
    ("middle east", 75.0),
    ("asia", 75.0),
    ("latin america", 70.0),
    ("africa", 70.0),
];

static REGION_PATTERNS: Lazy<Vec<(Regex, f64)>> = Lazy::new(|| {
    REGION_IMPORTANCE
        .iter()
        .map(|(region, score)| {
            let pattern = format!(r"\b{}\b", regex::escape(region));
            (Regex::new(&pattern).expect("valid region regex"), *score)
        })
        .collect()
});

/// Highest importance among the regions mentioned in `content`.
pub fn geographic_importance(content: &str) -> f64 {
    let lowered = content.to_lowercase();
    REGION_PATTERNS
        .iter()
        .filter(|(pattern, _)| pattern.is_match(&lowered))
        .map(|(_, score)| *score)
        .reduce(f64::max)
        .unwrap_or(UNKNOWN_REGION_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_the_maximum_mentioned_region() {
        assert_eq!(geographic_importance("Brazil and Canada sign a deal"), 70.0);
        assert_eq!(geographic_importance("Brazil, China and Japan"), 90.0);
        assert_eq!(geographic_importance("A GLOBAL slowdown hits Africa"), 100.0);
        assert_eq!(geographic_importance("the Middle East"), 75.0);
    }

    #[test]
    fn requires_whole_words() {
        assert_eq!(geographic_importance("Business in Russian markets"), UNKNOWN_REGION_SCORE);
        assert_eq!(geographic_importance("Eurozone bonds"), UNKNOWN_REGION_SCORE);
    }

    #[test]
    fn no_region_defaults() {
        assert_eq!(geographic_importance(""), UNKNOWN_REGION_SCORE);
        assert_eq!(geographic_importance("inflation inflation inflation"), UNKNOWN_REGION_SCORE);
    }
}
