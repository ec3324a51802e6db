//! OGC service version numbers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A `major.minor` or `major.minor.patch` service version.
///
/// Versions order the way version negotiation expects: `2.0 < 2.0.1 < 2.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid version '{0}'")]
pub struct VersionError(pub String);

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            patch: None,
        }
    }

    pub const fn with_patch(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch: Some(patch),
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.split('.');
        let major = parts.next();
        let minor = parts.next();
        let patch = parts.next();
        if parts.next().is_some() {
            return Err(VersionError(raw.to_string()));
        }

        let parse = |part: &str| part.parse::<u32>().map_err(|_| VersionError(raw.to_string()));
        match (major, minor) {
            (Some(major), Some(minor)) => Ok(Self {
                major: parse(major)?,
                minor: parse(minor)?,
                patch: patch.map(parse).transpose()?,
            }),
            _ => Err(VersionError(raw.to_string())),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format() {
        assert_eq!("2.0".parse::<Version>().unwrap(), Version::new(2, 0));
        assert_eq!(
            "2.0.1".parse::<Version>().unwrap(),
            Version::with_patch(2, 0, 1)
        );
        assert_eq!(Version::new(3, 0).to_string(), "3.0");
        assert_eq!(Version::with_patch(2, 0, 1).to_string(), "2.0.1");
    }

    #[test]
    fn rejects_malformed() {
        for raw in ["", "2", "2.", "a.b", "2.0.1.3", "2.-1"] {
            assert!(raw.parse::<Version>().is_err(), "{raw:?} should not parse");
        }
    }

    #[test]
    fn ordering() {
        assert!(Version::new(2, 0) < Version::with_patch(2, 0, 1));
        assert!(Version::with_patch(2, 0, 1) < Version::new(2, 1));
        assert!(Version::new(2, 1) < Version::new(3, 0));
    }
}
