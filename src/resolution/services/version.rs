//! Version coercion and comparison.
//!
//! PyPI version strings are not all well-formed. Instead of a full PEP
//! 440 implementation, versions are coerced into a `(major, minor,
//! patch)` triple, with missing segments defaulting to 0 and trailing
//! non-numeric noise ignored. Anything uncomparable conservatively
//! counts as "no update available".

/// Coerces a version string into a comparable triple.
///
/// `"1.0"` becomes `(1, 0, 0)`, `"2.0.0b1"` becomes `(2, 0, 0)`.
/// Returns `None` for empty or non-numeric input.
pub fn coerce(version: &str) -> Option<(u64, u64, u64)> {
    let trimmed = version.trim().trim_start_matches(['v', 'V']);
    if trimmed.is_empty() {
        return None;
    }

    let mut parts = [0u64; 3];
    for (i, segment) in trimmed.split('.').take(3).enumerate() {
        let digits: String = segment.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            // The leading segment must be numeric; later segments may
            // degrade to 0 (e.g. "1.x").
            if i == 0 {
                return None;
            }
            break;
        }
        parts[i] = digits.parse().ok()?;
    }
    Some((parts[0], parts[1], parts[2]))
}

/// Returns true if `candidate` is a strictly newer version than `base`.
///
/// If either input is absent, empty, or uncoercible the answer is
/// `false` - an uncomparable pair must never surface as "update
/// available".
pub fn is_newer(candidate: &str, base: &str) -> bool {
    match (coerce(candidate), coerce(base)) {
        (Some(candidate), Some(base)) => candidate > base,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_full_version() {
        assert_eq!(coerce("2.32.3"), Some((2, 32, 3)));
    }

    #[test]
    fn test_coerce_partial_versions_default_to_zero() {
        assert_eq!(coerce("1.0"), Some((1, 0, 0)));
        assert_eq!(coerce("3"), Some((3, 0, 0)));
    }

    #[test]
    fn test_coerce_tolerates_suffixes() {
        assert_eq!(coerce("2.0.0b1"), Some((2, 0, 0)));
        assert_eq!(coerce("1.26rc2"), Some((1, 26, 0)));
        assert_eq!(coerce("v4.2.1"), Some((4, 2, 1)));
    }

    #[test]
    fn test_coerce_rejects_garbage() {
        assert_eq!(coerce(""), None);
        assert_eq!(coerce("abc"), None);
        assert_eq!(coerce("   "), None);
    }

    #[test]
    fn test_is_newer_basic() {
        assert!(is_newer("2.0.0", "1.9.9"));
        assert!(!is_newer("1.9.9", "2.0.0"));
    }

    #[test]
    fn test_is_newer_equal_versions() {
        assert!(!is_newer("1.0", "1.0.0"));
        assert!(!is_newer("2.32.3", "2.32.3"));
    }

    #[test]
    fn test_is_newer_reflexive_false_even_for_malformed() {
        for v in ["1.0.0", "", "abc", "1.x.y", "not-a-version"] {
            assert!(!is_newer(v, v), "is_newer must be false for {:?}", v);
        }
    }

    #[test]
    fn test_is_newer_uncomparable_pairs_are_false() {
        assert!(!is_newer("", "1.0.0"));
        assert!(!is_newer("abc", "1.0.0"));
        assert!(!is_newer("1.0.0", ""));
        assert!(!is_newer("1.0.0", "abc"));
    }

    #[test]
    fn test_is_newer_minor_and_patch() {
        assert!(is_newer("1.1.0", "1.0.9"));
        assert!(is_newer("1.0.1", "1.0.0"));
        assert!(!is_newer("1.0.0", "1.0.1"));
    }
}
