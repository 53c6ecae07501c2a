use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

static VERSION_DIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)*)(?:_(\d+))?$").expect("valid regex"));

/// An installed version directory name such as `1.10` or `2.0_1`.
///
/// Ordered numerically component by component, so `1.10 > 1.2`. A name that
/// is a prefix of another sorts first (`1 < 1.0`) and a missing `_N` suffix
/// sorts before any suffix (`2.0 < 2.0_0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDir {
    name: String,
    components: Vec<u64>,
    suffix: Option<u64>,
}

impl VersionDir {
    pub fn parse(name: &str) -> Option<Self> {
        let caps = VERSION_DIR_RE.captures(name)?;
        let components = caps[1]
            .split('.')
            .map(|part| part.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;
        let suffix = match caps.get(2) {
            Some(m) => Some(m.as_str().parse::<u64>().ok()?),
            None => None,
        };

        Some(Self {
            name: name.to_string(),
            components,
            suffix,
        })
    }

    /// The directory name as found on disk.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The dotted version without the `_N` install suffix.
    pub fn version(&self) -> &str {
        match self.name.find('_') {
            Some(idx) => &self.name[..idx],
            None => &self.name,
        }
    }
}

impl Ord for VersionDir {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components
            .cmp(&other.components)
            .then_with(|| self.suffix.cmp(&other.suffix))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for VersionDir {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Picks the highest version among directory names, ignoring non-versions.
pub fn highest_version<I, S>(names: I) -> Option<VersionDir>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|n| VersionDir::parse(n.as_ref()))
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_names() {
        assert!(VersionDir::parse("1").is_some());
        assert!(VersionDir::parse("1.2.3.4").is_some());
        assert!(VersionDir::parse("2.0_1").is_some());
    }

    #[test]
    fn test_parse_rejects_non_versions() {
        assert!(VersionDir::parse("").is_none());
        assert!(VersionDir::parse("Temp").is_none());
        assert!(VersionDir::parse("1.").is_none());
        assert!(VersionDir::parse(".1").is_none());
        assert!(VersionDir::parse("1..2").is_none());
        assert!(VersionDir::parse("1.2_").is_none());
        assert!(VersionDir::parse("v1.2").is_none());
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        let nine = VersionDir::parse("9").unwrap();
        let ten = VersionDir::parse("10").unwrap();
        assert!(ten > nine);

        let a = VersionDir::parse("1.2").unwrap();
        let b = VersionDir::parse("1.10").unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_suffix_ordering() {
        let plain = VersionDir::parse("2.0").unwrap();
        let suffixed = VersionDir::parse("2.0_1").unwrap();
        let later = VersionDir::parse("2.0_2").unwrap();
        assert!(suffixed > plain);
        assert!(later > suffixed);
    }

    #[test]
    fn test_highest_version_selection() {
        let best = highest_version(["1.2", "1.10", "2.0_1"]).unwrap();
        assert_eq!(best.name(), "2.0_1");
        assert_eq!(best.version(), "2.0");
    }

    #[test]
    fn test_highest_version_ignores_junk() {
        let best = highest_version(["Temp", "3.1", "metadata"]).unwrap();
        assert_eq!(best.name(), "3.1");
        assert!(highest_version(["Temp", "_metadata"]).is_none());
    }
}
