//! Version identifiers of released updates.
//!
//! Version directories of a project are named after their [`UpdateVersion`],
//! so [`UpdateVersion::is_valid`] decides which directories belong to a
//! project's release history.
use crate::error::Version as VersionError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const MIN_COMPONENTS: usize = 2;
const MAX_COMPONENTS: usize = 4;

// *****************
// *** Dev Stage ***
// *****************

/// Pre-release stage of a version.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub enum DevStage {
    Alpha,
    Beta,
    ReleaseCandidate,
}

impl DevStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::ReleaseCandidate => "rc",
        }
    }
}

impl FromStr for DevStage {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alpha" => Ok(Self::Alpha),
            "beta" => Ok(Self::Beta),
            "rc" => Ok(Self::ReleaseCandidate),
            _ => Err(VersionError::InvalidStage(s.to_string())),
        }
    }
}

// **********************
// *** Update Version ***
// **********************

/// A version of the form `major.minor[.patch[.revision]][-stage[.n]]`.
///
/// # Examples
/// `1.0`, `1.0.0`, `2.3.1.4`, `1.0.0-beta`, `1.0.0-rc.2`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct UpdateVersion {
    components: Vec<u32>,
    stage: Option<(DevStage, Option<u32>)>,
}

impl UpdateVersion {
    /// Create a release version from its components.
    ///
    /// # Errors
    /// + [`VersionError::ComponentCount`] if not between 2 and 4 components are given.
    pub fn new(components: impl Into<Vec<u32>>) -> Result<Self, VersionError> {
        let components = components.into();
        if !(MIN_COMPONENTS..=MAX_COMPONENTS).contains(&components.len()) {
            return Err(VersionError::ComponentCount(components.len()));
        }

        Ok(Self {
            components,
            stage: None,
        })
    }

    /// Returns the version with the given development stage.
    pub fn with_stage(mut self, stage: DevStage, number: Option<u32>) -> Self {
        self.stage = Some((stage, number));
        self
    }

    /// Whether `version` parses as an `UpdateVersion`.
    pub fn is_valid(version: &str) -> bool {
        version.parse::<Self>().is_ok()
    }

    pub fn components(&self) -> &[u32] {
        &self.components
    }

    pub fn major(&self) -> u32 {
        self.components[0]
    }

    pub fn minor(&self) -> u32 {
        self.components[1]
    }

    pub fn stage(&self) -> Option<DevStage> {
        self.stage.map(|(stage, _)| stage)
    }

    pub fn stage_number(&self) -> Option<u32> {
        self.stage.and_then(|(_, number)| number)
    }

    /// Whether the version is a development (pre-release) version.
    pub fn is_development(&self) -> bool {
        self.stage.is_some()
    }

    /// Component at `index`, missing components count as `0`.
    fn component(&self, index: usize) -> u32 {
        self.components.get(index).copied().unwrap_or(0)
    }
}

/// Parses a single numeric component.
/// Leading zeros are rejected so that a version displays as the string it was parsed from.
fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if s.len() > 1 && s.starts_with('0') {
        return None;
    }

    s.parse().ok()
}

impl FromStr for UpdateVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(VersionError::Empty);
        }

        let (base, stage) = match s.split_once('-') {
            Some((base, stage)) => (base, Some(stage)),
            None => (s, None),
        };

        let parts = base.split('.').collect::<Vec<_>>();
        if !(MIN_COMPONENTS..=MAX_COMPONENTS).contains(&parts.len()) {
            return Err(VersionError::ComponentCount(parts.len()));
        }

        let components = parts
            .into_iter()
            .map(|part| {
                parse_number(part).ok_or_else(|| VersionError::InvalidComponent(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let stage = match stage {
            None => None,
            Some(stage_str) => {
                let (kind, number) = match stage_str.split_once('.') {
                    Some((kind, number)) => {
                        let Some(number) = parse_number(number) else {
                            return Err(VersionError::InvalidStage(stage_str.to_string()));
                        };

                        (kind, Some(number))
                    }
                    None => (stage_str, None),
                };

                let kind = kind
                    .parse::<DevStage>()
                    .map_err(|_| VersionError::InvalidStage(stage_str.to_string()))?;

                Some((kind, number))
            }
        };

        Ok(Self { components, stage })
    }
}

impl fmt::Display for UpdateVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self
            .components
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(".");

        write!(f, "{base}")?;
        if let Some((stage, number)) = self.stage {
            write!(f, "-{}", stage.as_str())?;
            if let Some(number) = number {
                write!(f, ".{number}")?;
            }
        }

        Ok(())
    }
}

impl Ord for UpdateVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        for index in 0..MAX_COMPONENTS {
            match self.component(index).cmp(&other.component(index)) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        // a release is newer than any of its development stages
        let stage_ord = match (&self.stage, &other.stage) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some((me, my_num)), Some((you, your_num))) => me
                .cmp(you)
                .then_with(|| my_num.unwrap_or(0).cmp(&your_num.unwrap_or(0)))
                .then_with(|| my_num.is_some().cmp(&your_num.is_some())),
        };

        // keep `Ord` consistent with `Eq` for `1.0` vs `1.0.0`
        stage_ord.then_with(|| self.components.len().cmp(&other.components.len()))
    }
}

impl PartialOrd for UpdateVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<String> for UpdateVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UpdateVersion> for String {
    fn from(version: UpdateVersion) -> Self {
        version.to_string()
    }
}

#[cfg(test)]
#[path = "./update_version_test.rs"]
mod update_version_test;
