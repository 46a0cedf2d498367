//! PHP version resolution.
//!
//! Maps a composer constraint such as `^7.3|^8.0` or `>=8.1` onto one of the
//! PHP versions the runtime image is published for.

use std::sync::LazyLock;

use regex::Regex;

/// PHP versions the base image ships, oldest first.
pub const SUPPORTED_VERSIONS: [&str; 7] = ["7.3", "7.4", "8.0", "8.1", "8.2", "8.3", "8.4"];

/// Version used when the manifest does not say.
pub const DEFAULT_VERSION: &str = "8.3";

static MAJOR_MINOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+").expect("valid regex"));

/// How a [`Resolution`] was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionSource {
    /// The requested version is supported as-is.
    Exact,
    /// The requested version is unsupported; the nearest one was chosen.
    Closest { requested: String },
    /// No version could be read; the default was used.
    Default,
}

/// A resolved PHP version. `version` is always a supported version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub version: String,
    pub source: ResolutionSource,
}

impl Resolution {
    /// Whether the unsupported-version fallback was applied.
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ResolutionSource::Closest { .. })
    }
}

/// Resolves constraints against an ordered list of supported versions.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    supported: Vec<String>,
    default: String,
}

impl Default for VersionResolver {
    fn default() -> Self {
        VersionResolver::new(SUPPORTED_VERSIONS, DEFAULT_VERSION)
    }
}

impl VersionResolver {
    /// Create a resolver. `supported` must not be empty.
    pub fn new<I, S>(supported: I, default: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let supported: Vec<String> = supported.into_iter().map(Into::into).collect();
        debug_assert!(!supported.is_empty(), "supported version list is empty");

        VersionResolver {
            supported,
            default: default.into(),
        }
    }

    /// Resolve an optional manifest requirement.
    ///
    /// A missing requirement resolves to the default version.
    pub fn resolve_requirement(&self, constraint: Option<&str>) -> Resolution {
        match constraint {
            Some(constraint) => self.resolve(constraint),
            None => self.default_resolution(),
        }
    }

    /// Resolve a raw constraint string. Never fails.
    pub fn resolve(&self, constraint: &str) -> Resolution {
        let Some(version) = extract_version(constraint) else {
            tracing::debug!("no version in constraint `{}`, using default", constraint);
            return self.default_resolution();
        };

        if self.supported.iter().any(|v| *v == version) {
            return Resolution {
                version,
                source: ResolutionSource::Exact,
            };
        }

        let closest = self.closest(&version).to_string();
        tracing::debug!("PHP {} is unsupported, nearest is {}", version, closest);
        Resolution {
            version: closest,
            source: ResolutionSource::Closest { requested: version },
        }
    }

    fn default_resolution(&self) -> Resolution {
        let version = if self.supported.contains(&self.default) {
            self.default.clone()
        } else {
            self.closest(&self.default).to_string()
        };

        Resolution {
            version,
            source: ResolutionSource::Default,
        }
    }

    /// The supported version numerically nearest to `version`.
    ///
    /// Ties go to the earlier entry in the list.
    fn closest(&self, version: &str) -> &str {
        let target = numeric_value(version);
        let mut best: Option<(&str, f64)> = None;

        for candidate in &self.supported {
            let distance = (numeric_value(candidate) - target).abs();
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((candidate.as_str(), distance)),
            }
        }

        best.map(|(v, _)| v).unwrap_or(self.default.as_str())
    }
}

/// Pull the first `major.minor` out of a constraint.
///
/// With alternatives (`^7.3|^8.0`) only the first alternative is considered.
pub fn extract_version(constraint: &str) -> Option<String> {
    let first = constraint.split('|').next().unwrap_or(constraint);
    MAJOR_MINOR.find(first).map(|m| m.as_str().to_string())
}

fn numeric_value(version: &str) -> f64 {
    version.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_versions_resolve_to_themselves() {
        let resolver = VersionResolver::default();
        for version in SUPPORTED_VERSIONS {
            let resolution = resolver.resolve(version);
            assert_eq!(resolution.version, version);
            assert_eq!(resolution.source, ResolutionSource::Exact);
        }
    }

    #[test]
    fn test_caret_and_comparison_prefixes() {
        let resolver = VersionResolver::default();
        assert_eq!(resolver.resolve("^8.1").version, "8.1");
        assert_eq!(resolver.resolve(">=8.2").version, "8.2");
        assert_eq!(resolver.resolve("~7.4.0").version, "7.4");
    }

    #[test]
    fn test_alternatives_take_first() {
        let resolver = VersionResolver::default();
        assert_eq!(resolver.resolve("^7.3|^8.0").version, "7.3");
        assert_eq!(resolver.resolve("^8.2 || ^8.3").version, "8.2");
    }

    #[test]
    fn test_unsupported_resolves_to_nearest() {
        let resolver = VersionResolver::default();

        let old = resolver.resolve("^5.6");
        assert_eq!(old.version, "7.3");
        assert_eq!(
            old.source,
            ResolutionSource::Closest {
                requested: "5.6".to_string()
            }
        );
        assert!(old.is_fallback());

        assert_eq!(resolver.resolve("^7.9").version, "8.0");
        assert_eq!(resolver.resolve("^9.0").version, "8.4");
    }

    #[test]
    fn test_tie_goes_to_first_supported() {
        let resolver = VersionResolver::new(["1.0", "2.0", "3.0"], "3.0");
        assert_eq!(resolver.resolve("1.5").version, "1.0");
        assert_eq!(resolver.resolve("2.5").version, "2.0");
    }

    #[test]
    fn test_no_version_uses_default() {
        let resolver = VersionResolver::default();

        let resolution = resolver.resolve("*");
        assert_eq!(resolution.version, DEFAULT_VERSION);
        assert_eq!(resolution.source, ResolutionSource::Default);

        let resolution = resolver.resolve_requirement(None);
        assert_eq!(resolution.version, DEFAULT_VERSION);
        assert!(!resolution.is_fallback());
    }

    #[test]
    fn test_default_outside_list_is_still_supported() {
        let resolver = VersionResolver::new(["7.4", "8.0"], "8.3");
        assert_eq!(resolver.resolve_requirement(None).version, "8.0");
    }

    #[test]
    fn test_extract_version() {
        assert_eq!(extract_version("^8.1"), Some("8.1".to_string()));
        assert_eq!(extract_version("8"), None);
        assert_eq!(extract_version("dev-master|^8.1"), None);
    }
}
