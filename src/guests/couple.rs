//! Best-effort split of a couple's combined name for display.

const SEPARATORS: [&str; 4] = [" & ", " and ", " + ", "/"];

/// Split "Alice Brown & Bob Lee" into first names ("Alice", Some("Bob")).
///
/// The earliest separator in the string wins. Without a separator the
/// whole string is one person. Blank sides are dropped.
pub fn split_couple_names(combined: &str) -> (String, Option<String>) {
    // ASCII-only lowering keeps byte offsets aligned with `combined`
    let lowered = combined.to_ascii_lowercase();
    let split = SEPARATORS
        .iter()
        .filter_map(|sep| lowered.find(sep).map(|at| (at, sep.len())))
        .min_by_key(|(at, _)| *at);

    let (left, right) = match split {
        Some((at, len)) => (&combined[..at], Some(&combined[at + len..])),
        None => (combined, None),
    };

    let first = first_name(left);
    let second = right.map(first_name).filter(|name| !name.is_empty());
    match (first.is_empty(), second) {
        (true, Some(second)) => (second, None),
        (_, second) => (first, second),
    }
}

fn first_name(part: &str) -> String {
    part.split_whitespace().next().unwrap_or_default().to_string()
}
