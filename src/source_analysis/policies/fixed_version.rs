use crate::source_analysis::domain::{Range, Version};

/// Computes the latest version that fixes a vulnerability across `ranges`.
///
/// Only `SEMVER` ranges are considered. The result is `None` when no fix
/// event exists, or when any introduction (other than the "0" sentinel) is
/// at or after the latest fix, since the vulnerability was re-introduced
/// and versions past that fix may still be affected.
///
/// Introductions are checked against the maximum fix over all ranges: the
/// ranges of one affected package describe a single version surface.
///
/// # Examples
/// ```
/// use osv_reachability::source_analysis::domain::{Event, Range};
/// use osv_reachability::source_analysis::policies::latest_fixed_version;
///
/// let ranges = vec![Range::semver(vec![
///     Event::introduced("0"),
///     Event::fixed("1.1.0"),
///     Event::introduced("1.2.0"),
///     Event::fixed("1.2.2"),
/// ])];
/// assert_eq!(latest_fixed_version(&ranges).as_deref(), Some("1.2.2"));
/// ```
pub fn latest_fixed_version(ranges: &[Range]) -> Option<String> {
    let semver_ranges = || ranges.iter().filter(|range| range.is_semver());

    let mut latest_fixed = Version::default();
    for fixed in semver_ranges()
        .flat_map(|range| range.events.iter())
        .filter_map(|event| event.fixed.as_deref())
        .filter(|fixed| !fixed.is_empty())
        .map(Version::from)
    {
        if latest_fixed.before(&fixed) {
            latest_fixed = fixed;
        }
    }

    if latest_fixed.is_empty() {
        return None;
    }

    let reintroduced = semver_ranges()
        .flat_map(|range| range.events.iter())
        .filter_map(|event| event.introduced.as_deref())
        .map(Version::from)
        .filter(|introduced| !introduced.is_empty() && !introduced.is_start_sentinel())
        .any(|introduced| !introduced.before(&latest_fixed));

    if reintroduced {
        None
    } else {
        Some(latest_fixed.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::domain::Event;

    fn fixed(ranges: Vec<Range>) -> Option<String> {
        latest_fixed_version(&ranges)
    }

    #[test]
    fn test_empty_ranges() {
        assert_eq!(fixed(vec![]), None);
    }

    #[test]
    fn test_no_fix() {
        assert_eq!(fixed(vec![Range::semver(vec![Event::introduced("0")])]), None);
    }

    #[test]
    fn test_no_latest_fix() {
        let ranges = vec![Range::semver(vec![
            Event::introduced("0"),
            Event::fixed("1.0.4"),
            Event::introduced("1.1.2"),
        ])];
        assert_eq!(fixed(ranges), None);
    }

    #[test]
    fn test_unsorted_no_latest_fix() {
        let ranges = vec![Range::semver(vec![
            Event::fixed("1.0.4"),
            Event::introduced("0"),
            Event::introduced("1.1.2"),
            Event::introduced("1.5.0"),
            Event::fixed("1.1.4"),
        ])];
        assert_eq!(fixed(ranges), None);
    }

    #[test]
    fn test_reintroduction_order_does_not_matter() {
        let ranges = vec![Range::semver(vec![
            Event::introduced("1.1.2"),
            Event::fixed("1.0.4"),
            Event::introduced("0"),
        ])];
        assert_eq!(fixed(ranges), None);
    }

    #[test]
    fn test_unsorted_with_fix() {
        let ranges = vec![Range::semver(vec![
            Event::fixed("1.0.0"),
            Event::introduced("0"),
            Event::fixed("0.1.0"),
            Event::introduced("0.5.0"),
        ])];
        assert_eq!(fixed(ranges).as_deref(), Some("1.0.0"));
    }

    #[test]
    fn test_multiple_ranges() {
        let ranges = vec![
            Range::semver(vec![Event::introduced("0"), Event::fixed("0.1.0")]),
            Range::semver(vec![Event::introduced("0"), Event::fixed("0.2.0")]),
        ];
        assert_eq!(fixed(ranges).as_deref(), Some("0.2.0"));
    }

    #[test]
    fn test_reintroduction_in_other_range_invalidates_fix() {
        let ranges = vec![
            Range::semver(vec![Event::introduced("0"), Event::fixed("1.0.0")]),
            Range::semver(vec![Event::introduced("2.0.0")]),
        ];
        assert_eq!(fixed(ranges), None);
    }

    #[test]
    fn test_introduced_at_fix_invalidates_fix() {
        let ranges = vec![Range::semver(vec![
            Event::introduced("0"),
            Event::fixed("1.0.0"),
            Event::introduced("1.0.0"),
        ])];
        assert_eq!(fixed(ranges), None);
    }

    #[test]
    fn test_pseudoversion() {
        let ranges = vec![Range::semver(vec![
            Event::introduced("0"),
            Event::fixed("0.0.0-20220824120805-abc"),
            Event::introduced("0.0.0-20230824120805-efg"),
            Event::fixed("0.0.0-20240824120805-hij"),
        ])];
        assert_eq!(fixed(ranges).as_deref(), Some("0.0.0-20240824120805-hij"));
    }

    #[test]
    fn test_non_semver_ranges_ignored() {
        let mut git_range = Range::semver(vec![Event::introduced("0"), Event::fixed("abc123")]);
        git_range.range_type = "GIT".to_string();
        let ranges = vec![
            git_range,
            Range::semver(vec![Event::introduced("0"), Event::fixed("1.3.0")]),
        ];
        assert_eq!(fixed(ranges).as_deref(), Some("1.3.0"));
    }

    #[test]
    fn test_fixed_then_reintroduced_then_fixed_again() {
        let ranges = vec![Range::semver(vec![
            Event::introduced("0"),
            Event::fixed("1.1.0"),
            Event::introduced("1.2.0"),
            Event::fixed("1.2.2"),
        ])];
        assert_eq!(fixed(ranges).as_deref(), Some("1.2.2"));
    }
}
