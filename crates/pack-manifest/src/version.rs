//! The publish-time version bump.
//!
//! The scheme concatenates the dot-separated numeric components into one
//! integer, increments it, and reads the result back as
//! `major.minor.patch` with the last two digits as minor and patch:
//! `"1.2.9"` → `129` → `130` → `"1.3.0"`, and `"9.9.9"` → `1000` →
//! `"10.0.0"`. The concatenation is lossy for multi-digit input
//! components (`"1.10.3"` reads as `1103`); that quirk is inherited
//! behavior and kept deliberately.

use crate::error::{Error, Result};

/// Compute the next version after `latest` under the concatenated-digit
/// scheme.
///
/// The output is always a 3-dot-separated numeral string strictly
/// greater than the input under concatenated-integer ordering.
pub fn next_version(latest: &str) -> Result<String> {
    let digits: String = latest.split('.').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidVersion {
            version: latest.to_string(),
            reason: "expected dot-separated numeric components".to_string(),
        });
    }

    let next = digits
        .parse::<u64>()
        .ok()
        .and_then(|current| current.checked_add(1))
        .ok_or_else(|| Error::InvalidVersion {
            version: latest.to_string(),
            reason: "concatenated components exceed the representable range".to_string(),
        })?;

    let bumped = format!("{next:03}");
    // The last two digits are minor and patch; everything before is major.
    let (major, rest) = bumped.split_at(bumped.len() - 2);
    let (minor, patch) = rest.split_at(1);
    Ok(format!("{major}.{minor}.{patch}"))
}
