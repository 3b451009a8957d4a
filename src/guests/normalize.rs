//! Name tokenization used by every name comparison.

/// Lower-cases `name` and splits it on runs of whitespace.
///
/// Deliberately crude: no punctuation stripping and no stemming, so
/// "O'Neil" and "ONeil" stay different tokens.
pub fn normalize(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Case-insensitive, whitespace-collapsed identity of a guest name.
pub fn name_key(name: &str) -> String {
    normalize(name).join(" ")
}
