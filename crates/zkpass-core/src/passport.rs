//! # Passport Domain Newtypes
//!
//! Validated wrappers for the passport attributes that cross into proof
//! parameters: citizenship codes and the sex field. Each validates its
//! format at construction time, so an invalid code cannot exist past the
//! type boundary.
//!
//! ## Citizenship codes
//!
//! ISO 3166-1 alpha-3 country codes ("UKR", "USA", "FRA", …). Exception:
//! `D<<` is used for Germany in some passport formats — a 1-letter country
//! code (`D`) followed by MRZ filler characters.

use serde::{Deserialize, Serialize, Serializer};

use crate::error::ParamsError;

/// A citizenship mask value: ISO 3166-1 alpha-3, or the `D<<` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CitizenshipCode(String);

impl CitizenshipCode {
    /// Validate and wrap a citizenship code.
    ///
    /// Returns [`ParamsError::InvalidCitizenshipCode`] unless the input is
    /// three ASCII uppercase letters or exactly `D<<`.
    pub fn new(code: impl Into<String>) -> Result<Self, ParamsError> {
        let code = code.into();
        let valid = code == "D<<"
            || (code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()));
        if !valid {
            return Err(ParamsError::InvalidCitizenshipCode(code));
        }
        Ok(Self(code))
    }

    /// The code as passed on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CitizenshipCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CitizenshipCode {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for CitizenshipCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Passport sex field.
///
/// The wire form is a single letter, or the empty string when unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sex {
    /// `M`
    Male,
    /// `F`
    Female,
    /// `O`
    Other,
    /// Empty string on the wire.
    #[default]
    Unspecified,
}

impl Sex {
    /// Parse the wire form (`M`, `F`, `O`, or empty).
    pub fn parse(code: &str) -> Result<Self, ParamsError> {
        match code {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            "O" => Ok(Self::Other),
            "" => Ok(Self::Unspecified),
            other => Err(ParamsError::InvalidSexCode(other.to_string())),
        }
    }

    /// The wire form of this value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "O",
            Self::Unspecified => "",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Sex {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Sex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Sex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
