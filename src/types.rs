use std::str::FromStr;
use serde::Deserialize;

/// What to do when a tracked file now has fewer lines than its stored offset
/// (it was truncated or rewritten in place).
///
/// - `Reset`: treat the file as removed and re-added. The offset goes back to
///   0 and the whole current content is scanned again in the same cycle
///   (default behaviour).
/// - `Clamp`: keep the entry, scan nothing, and lower the offset to the new
///   line count so that only lines appended afterwards are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruncationPolicy {
    Reset,
    Clamp,
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        TruncationPolicy::Reset
    }
}

impl FromStr for TruncationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reset" => Ok(TruncationPolicy::Reset),
            "clamp" => Ok(TruncationPolicy::Clamp),
            other => Err(format!(
                "invalid on_truncate: {other} (expected \"reset\" or \"clamp\")"
            )),
        }
    }
}
