//! Token normalization and unit classification
//!
//! Header tokens carry their measurement unit in prose (`pool queue
//! wait (ms)`, `outbound throughput (kbit/s)`). Classification is a
//! fixed sequence of substring tests over the normalized token.

use crate::app::models::Unit;
use crate::constants::unit_markers;

/// Normalize a raw header token for matching: lowercase, with leading
/// and trailing runs of non-alphanumeric characters stripped.
///
/// Interior punctuation is preserved, so rate markers like `kbit/s`
/// survive normalization and stay matchable.
pub fn normalize_token(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Classify the measurement unit of a header token
///
/// The tests run in a fixed order and the first match wins; `kbit/s`
/// must be recognized before the broader `/s`. Tokens matching nothing
/// are relayed without a unit.
pub fn classify_unit(token: &str) -> Option<Unit> {
    let normalized = normalize_token(token);

    let rules: [(&[&str], Unit); 5] = [
        (unit_markers::MILLISECONDS, Unit::Milliseconds),
        (unit_markers::BYTES, Unit::Bytes),
        (unit_markers::KILOBITS_PER_SECOND, Unit::KilobitsPerSecond),
        (unit_markers::COUNT_PER_SECOND, Unit::CountPerSecond),
        (unit_markers::COUNT, Unit::Count),
    ];

    for (markers, unit) in rules {
        if markers.iter().any(|marker| normalized.contains(marker)) {
            return Some(unit);
        }
    }

    None
}
