//! Dotted version string comparison.
//!
//! External tools self-report versions in loosely dotted form ("4.0.9",
//! "wine-5.3" after extraction, "20.10.17"). [`compare_versions`] imposes a
//! total order on those strings: component-wise numeric comparison with a
//! lexical fallback for components that don't parse, and the empty string
//! ordering below any non-empty version. Pure and panic-free.

use std::cmp::Ordering;

/// Compare two dotted version strings.
///
/// `compare_versions("4.9", "5.0") == Ordering::Less`,
/// `compare_versions("5.0.1", "5.0") == Ordering::Greater`,
/// `compare_versions("", "5.0") == Ordering::Less`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    let left: Vec<&str> = a.split('.').collect();
    let right: Vec<&str> = b.split('.').collect();

    for (l, r) in left.iter().zip(right.iter()) {
        let ord = compare_component(l, r);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    // Equal so far: the longer version is the greater one ("5.0.1" > "5.0").
    left.len().cmp(&right.len())
}

/// Returns true when `version` satisfies `minimum`.
pub fn at_least(version: &str, minimum: &str) -> bool {
    compare_versions(version, minimum) != Ordering::Less
}

/// Compare a single version component, numerically when both sides parse.
fn compare_component(l: &str, r: &str) -> Ordering {
    match (l.parse::<u64>(), r.parse::<u64>()) {
        (Ok(ln), Ok(rn)) => ln.cmp(&rn),
        // Unparsable components fall back to lexical ordering.
        _ => l.cmp(r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_versions() {
        assert_eq!(compare_versions("5.0", "5.0"), Ordering::Equal);
    }

    #[test]
    fn lesser_version() {
        assert_eq!(compare_versions("4.9", "5.0"), Ordering::Less);
    }

    #[test]
    fn longer_version_is_greater() {
        assert_eq!(compare_versions("5.0.1", "5.0"), Ordering::Greater);
    }

    #[test]
    fn empty_is_less_than_any() {
        assert_eq!(compare_versions("", "5.0"), Ordering::Less);
        assert_eq!(compare_versions("5.0", ""), Ordering::Greater);
    }

    #[test]
    fn both_empty_equal() {
        assert_eq!(compare_versions("", ""), Ordering::Equal);
    }

    #[test]
    fn numeric_not_lexical() {
        // Lexically "10" < "9"; numerically it is greater.
        assert_eq!(compare_versions("1.10", "1.9"), Ordering::Greater);
    }

    #[test]
    fn non_numeric_components_compare_lexically() {
        assert_eq!(compare_versions("5.rc1", "5.rc2"), Ordering::Less);
        assert_eq!(compare_versions("5.beta", "5.beta"), Ordering::Equal);
    }

    #[test]
    fn mixed_component_falls_back_lexically() {
        // "0a" doesn't parse, so "0a" vs "1" compares as strings.
        assert_eq!(compare_versions("5.0a", "5.1"), Ordering::Less);
    }

    #[test]
    fn at_least_boundary() {
        assert!(at_least("5.0", "5.0"));
        assert!(at_least("5.3", "5.0"));
        assert!(!at_least("4.9", "5.0"));
        assert!(!at_least("", "5.0"));
    }

    #[test]
    fn total_order_is_antisymmetric() {
        let pairs = [("4.9", "5.0"), ("5.0", "5.0.1"), ("", "0.1")];
        for (a, b) in pairs {
            assert_eq!(compare_versions(a, b), compare_versions(b, a).reverse());
        }
    }
}
