pub const UNKNOWN_SOURCE_SCORE: f64 = 40.0;

/// Known outlets and their trust score, lower-cased.
///
/// Matching is by substring and the first hit wins, so entries that contain
/// one another must keep the more specific name first.
pub static SOURCE_CREDIBILITY: &[(&str, f64)] = &[
    ("the wall street journal", 90.0),
    ("financial times", 90.0),
    ("bloomberg", 85.0),
    ("reuters", 85.0),
    ("the economist", 85.0),
    ("cnbc", 75.0),
    ("the new york times", 80.0),
    ("bbc", 80.0),
    ("twitter", 50.0),
];

pub fn source_credibility(source: &str) -> f64 {
    let source = source.to_lowercase();
    SOURCE_CREDIBILITY
        .iter()
        .find(|(outlet, _)| source.contains(outlet))
        .map(|(_, score)| *score)
        .unwrap_or(UNKNOWN_SOURCE_SCORE)
}
