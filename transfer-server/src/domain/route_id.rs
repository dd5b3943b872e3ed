//! Route identifier normalization.
//!
//! The MBTA shapes endpoint requires a canonical route id (e.g. `Red`,
//! `1`, `SL1`), not a display name (e.g. `Red Line`). Upstream planners
//! and legacy payloads hand us either, so this module maps free-form
//! labels onto canonical ids, best-effort.
//!
//! The mapping is an ordered table of rules; the first rule that matches
//! wins. An unmapped label passes through unchanged — an unrecognized id
//! yields an empty shapes result downstream ("no polyline available"),
//! which callers must treat as absence, not an error.

/// One rule in the normalization cascade.
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Label contains `needle` → emit `id`.
    Substring {
        needle: &'static str,
        id: &'static str,
    },
    /// Green Line branches: `Green-B` through `Green-E`, plain `Green`
    /// when no branch letter appears.
    GreenBranch,
    /// Silver Line: extract the digit after `SL` (an optional single
    /// space is tolerated), defaulting to `SL1` when no branch digit
    /// is given.
    SilverBranch,
    /// `<keyword> <token>` anywhere in the label → the token verbatim,
    /// e.g. "Bus 66" → "66", "Route 1" → "1".
    Capture { keyword: &'static str },
}

/// The cascade, in priority order. Colour lines are matched before the
/// bus/route captures so that "Red Line bus replacement" still maps to
/// `Red`.
const RULES: &[Rule] = &[
    Rule::Substring {
        needle: "red",
        id: "Red",
    },
    Rule::Substring {
        needle: "orange",
        id: "Orange",
    },
    Rule::Substring {
        needle: "blue",
        id: "Blue",
    },
    Rule::GreenBranch,
    Rule::SilverBranch,
    Rule::Capture { keyword: "bus" },
    Rule::Capture { keyword: "route" },
];

/// Green branch substrings, checked in order. The B branch only matches
/// its hyphenated form; C/D/E match both spaced and hyphenated forms.
const GREEN_BRANCHES: &[(&str, &str)] = &[
    ("green-b", "Green-B"),
    ("green c", "Green-C"),
    ("green-c", "Green-C"),
    ("green d", "Green-D"),
    ("green-d", "Green-D"),
    ("green e", "Green-E"),
    ("green-e", "Green-E"),
];

impl Rule {
    /// Apply this rule to a label. `lower` is the ASCII-lowercased form
    /// of `trimmed` (byte offsets in the two strings coincide).
    fn apply(&self, trimmed: &str, lower: &str) -> Option<String> {
        match self {
            Rule::Substring { needle, id } => {
                lower.contains(needle).then(|| (*id).to_string())
            }
            Rule::GreenBranch => {
                if !lower.contains("green") {
                    return None;
                }
                for (needle, id) in GREEN_BRANCHES {
                    if lower.contains(needle) {
                        return Some((*id).to_string());
                    }
                }
                Some("Green".to_string())
            }
            Rule::SilverBranch => {
                if !lower.contains("silver") {
                    return None;
                }
                match silver_branch_digit(lower) {
                    Some(digit) => Some(format!("SL{digit}")),
                    None => Some("SL1".to_string()),
                }
            }
            Rule::Capture { keyword } => capture_after_keyword(trimmed, lower, keyword),
        }
    }
}

/// Find a branch digit following `sl` (with at most one intervening
/// space) anywhere in the lowercased label.
fn silver_branch_digit(lower: &str) -> Option<char> {
    let bytes = lower.as_bytes();
    for pos in 0..bytes.len().saturating_sub(2) {
        if &bytes[pos..pos + 2] != b"sl" {
            continue;
        }
        let mut rest = &bytes[pos + 2..];
        if rest.first() == Some(&b' ') {
            rest = &rest[1..];
        }
        if let Some(&b) = rest.first() {
            if b.is_ascii_digit() {
                return Some(b as char);
            }
        }
    }
    None
}

/// Capture the alphanumeric token after `<keyword><whitespace>`,
/// case-insensitively, preserving the token's original case.
///
/// Scans every occurrence of the keyword: an embedded occurrence with
/// no trailing token ("Busway") must not mask a later real one.
fn capture_after_keyword(trimmed: &str, lower: &str, keyword: &str) -> Option<String> {
    for (pos, _) in lower.match_indices(keyword) {
        let rest = &trimmed[pos + keyword.len()..];

        // At least one whitespace character must separate keyword and token
        let after_ws = rest.trim_start();
        if after_ws.len() == rest.len() {
            continue;
        }

        let token: String = after_ws
            .chars()
            .take_while(char::is_ascii_alphanumeric)
            .collect();

        if !token.is_empty() {
            return Some(token);
        }
    }

    None
}

/// Is this label already a canonical route id?
///
/// Canonical MBTA ids are short (`Red`, `66`, `SL1`, `Green-B`), never
/// contain the word "line", and never contain whitespace. The
/// whitespace condition keeps short labelled forms like "Bus 66" out of
/// the short-circuit so the capture rules can extract their token.
fn is_canonical(trimmed: &str, lower: &str) -> bool {
    trimmed.chars().count() <= 6
        && !lower.contains("line")
        && !trimmed.chars().any(char::is_whitespace)
}

/// Map a free-form transit line label to a canonical route id.
///
/// Case-insensitive, first matching rule wins; an unmapped label is
/// returned trimmed but otherwise unchanged. This function never fails
/// and is idempotent: canonical outputs re-normalize to themselves.
///
/// # Examples
///
/// ```
/// use transfer_server::domain::normalize_route_id;
///
/// assert_eq!(normalize_route_id("Red Line"), "Red");
/// assert_eq!(normalize_route_id("Green Line B Branch"), "Green-B");
/// assert_eq!(normalize_route_id("Bus 66"), "66");
/// assert_eq!(normalize_route_id("Mattapan Trolley"), "Mattapan Trolley");
/// ```
pub fn normalize_route_id(label: &str) -> String {
    let trimmed = label.trim();
    let lower = trimmed.to_ascii_lowercase();

    if is_canonical(trimmed, &lower) {
        return trimmed.to_string();
    }

    for rule in RULES {
        if let Some(id) = rule.apply(trimmed, &lower) {
            return id;
        }
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_ids_pass_through() {
        assert_eq!(normalize_route_id("Red"), "Red");
        assert_eq!(normalize_route_id("66"), "66");
        assert_eq!(normalize_route_id("SL1"), "SL1");
        assert_eq!(normalize_route_id("Orange"), "Orange");
        assert_eq!(normalize_route_id("  Blue  "), "Blue");
    }

    #[test]
    fn colour_lines() {
        assert_eq!(normalize_route_id("Red Line"), "Red");
        assert_eq!(normalize_route_id("Orange Line"), "Orange");
        assert_eq!(normalize_route_id("Blue Line"), "Blue");
        assert_eq!(normalize_route_id("the red line"), "Red");
    }

    #[test]
    fn green_branches() {
        assert_eq!(normalize_route_id("Green Line B Branch"), "Green-B");
        assert_eq!(normalize_route_id("Green-B Branch Line"), "Green-B");
        assert_eq!(normalize_route_id("Green C Line"), "Green-C");
        assert_eq!(normalize_route_id("Green-C service"), "Green-C");
        assert_eq!(normalize_route_id("Green D Line"), "Green-D");
        assert_eq!(normalize_route_id("Green E Line"), "Green-E");
    }

    #[test]
    fn green_without_branch() {
        assert_eq!(normalize_route_id("Green Line"), "Green");
        assert_eq!(normalize_route_id("Green Line Trolley"), "Green");
    }

    #[test]
    fn green_b_requires_hyphen() {
        // The spaced form "Green B" has no branch rule; it falls back
        // to plain Green, matching the original matcher exactly.
        assert_eq!(normalize_route_id("Green B Line"), "Green");
    }

    #[test]
    fn silver_line() {
        assert_eq!(normalize_route_id("Silver Line 1"), "SL1");
        assert_eq!(normalize_route_id("Silver Line SL2"), "SL2");
        assert_eq!(normalize_route_id("Silver Line SL 3"), "SL3");
        // No branch digit given: default to SL1
        assert_eq!(normalize_route_id("Silver Line Waterfront"), "SL1");
    }

    #[test]
    fn bus_capture() {
        assert_eq!(normalize_route_id("Bus 66"), "66");
        assert_eq!(normalize_route_id("bus 1"), "1");
        assert_eq!(normalize_route_id("MBTA Bus 66"), "66");
        assert_eq!(normalize_route_id("Bus CT2"), "CT2");
    }

    #[test]
    fn route_capture() {
        assert_eq!(normalize_route_id("Route 1"), "1");
        assert_eq!(normalize_route_id("Route 66"), "66");
    }

    #[test]
    fn colour_wins_over_capture() {
        // "red" appears before the bus capture in the cascade
        assert_eq!(normalize_route_id("Red Line bus replacement"), "Red");
    }

    #[test]
    fn unmapped_labels_pass_through() {
        assert_eq!(normalize_route_id("Mattapan Trolley"), "Mattapan Trolley");
        assert_eq!(normalize_route_id("  Mattapan Trolley  "), "Mattapan Trolley");
        assert_eq!(normalize_route_id("Commuter Rail"), "Commuter Rail");
    }

    #[test]
    fn empty_and_whitespace() {
        assert_eq!(normalize_route_id(""), "");
        assert_eq!(normalize_route_id("   "), "");
    }

    #[test]
    fn silver_digit_extraction() {
        assert_eq!(silver_branch_digit("silver sl1"), Some('1'));
        assert_eq!(silver_branch_digit("silver sl 4"), Some('4'));
        assert_eq!(silver_branch_digit("silver line"), None);
        assert_eq!(silver_branch_digit("sl"), None);
    }

    #[test]
    fn keyword_capture_needs_whitespace() {
        assert_eq!(capture_after_keyword("Busway", "busway", "bus"), None);
        assert_eq!(
            capture_after_keyword("Bus 66", "bus 66", "bus"),
            Some("66".to_string())
        );
    }

    #[test]
    fn keyword_capture_scans_past_embedded_occurrences() {
        // "Busway" contains the keyword but no token follows it; the
        // later standalone "bus 39" must still be captured.
        assert_eq!(normalize_route_id("Busway bus 39"), "39");
        assert_eq!(
            capture_after_keyword("Busway bus 39", "busway bus 39", "bus"),
            Some("39".to_string())
        );
        assert_eq!(capture_after_keyword("Busway walkway", "busway walkway", "bus"), None);
    }

    #[test]
    fn canonical_outputs_are_stable() {
        for label in [
            "Red Line",
            "Green Line B Branch",
            "Silver Line 1",
            "Bus 66",
            "Route 1",
            "Mattapan Trolley",
        ] {
            let once = normalize_route_id(label);
            let twice = normalize_route_id(&once);
            assert_eq!(once, twice, "not idempotent for {label:?}");
        }
    }
}
