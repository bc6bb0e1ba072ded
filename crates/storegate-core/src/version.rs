/// Strip everything from the first `+` onward.
#[must_use]
pub fn base_version(version: &str) -> &str {
    version
        .split_once('+')
        .map_or(version, |(base, _)| base)
}

/// The part after the first `+`, if any.
#[must_use]
pub fn build_suffix(version: &str) -> Option<&str> {
    version.split_once('+').map(|(_, build)| build)
}

/// Three-tier match between an installed version and a record version.
///
/// Exact equality always matches. When only one side carries a `+BUILD`
/// suffix, that side is reduced to its base before comparing. When both
/// sides carry a build, only exact equality counts.
#[must_use]
pub fn matches_record(installed: &str, record: &str) -> bool {
    if installed == record {
        return true;
    }

    match (build_suffix(installed), build_suffix(record)) {
        (Some(_), None) => base_version(installed) == record,
        (None, Some(_)) => base_version(record) == installed,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_version_strips_build() {
        assert_eq!(base_version("1.2.3+45"), "1.2.3");
        assert_eq!(base_version("1.2.3"), "1.2.3");
        assert_eq!(base_version("1.2.3+4+5"), "1.2.3");
        assert_eq!(base_version(""), "");
    }

    #[test]
    fn build_suffix_returns_text_after_plus() {
        assert_eq!(build_suffix("1.2.3+45"), Some("45"));
        assert_eq!(build_suffix("1.2.3+"), Some(""));
        assert_eq!(build_suffix("1.2.3"), None);
    }

    #[test]
    fn exact_match_wins_regardless_of_build() {
        assert!(matches_record("0.0.1+1", "0.0.1+1"));
        assert!(matches_record("0.0.1", "0.0.1"));
    }

    #[test]
    fn one_sided_build_compares_base_parts() {
        assert!(matches_record("0.0.1+1", "0.0.1"));
        assert!(matches_record("0.0.1", "0.0.1+7"));
        assert!(!matches_record("0.0.2+1", "0.0.1"));
        assert!(!matches_record("0.0.1", "0.0.2+7"));
    }

    #[test]
    fn two_sided_build_requires_exact_match() {
        assert!(!matches_record("1.0.0+1", "1.0.0+2"));
    }
}
