use semver::{BuildMetadata, Version};

/// Clean a loosely written version string into a strict `semver::Version`.
///
/// Surrounding whitespace and any leading `=` / `v` characters are removed,
/// then the remainder must be a complete `MAJOR.MINOR.PATCH[-PRE]` version
/// without leading zeros or empty identifiers.
/// Build metadata is dropped since it takes no part in precedence.
///
/// Examples:
/// - "1.2.3" -> Version(1, 2, 3)
/// - " v1.2.3 " -> Version(1, 2, 3)
/// - "=1.2.1-beta" -> Version(1, 2, 1, "beta")
/// - "1.2" -> None (partial versions are ranges, not versions)
pub fn clean_version(version: &str) -> Option<Version> {
    let stripped = version.trim().trim_start_matches(['=', 'v']);
    let mut parsed = Version::parse(stripped).ok()?;
    parsed.build = BuildMetadata::EMPTY;
    Some(parsed)
}

/// Whether two versions share the same `MAJOR.MINOR.PATCH` tuple.
pub fn same_release(a: &Version, b: &Version) -> bool {
    a.major == b.major && a.minor == b.minor && a.patch == b.patch
}

/// Whether `version` sorts below every release and pre-release of `bound`,
/// i.e. `version < bound-0` in npm notation.
pub fn below_release(version: &Version, bound: &Version) -> bool {
    (version.major, version.minor, version.patch) < (bound.major, bound.minor, bound.patch)
}
