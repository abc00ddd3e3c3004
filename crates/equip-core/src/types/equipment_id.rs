//! Equipment identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Opaque identifier of an equipment record.
///
/// Identifiers are assigned by the resource collection and carried verbatim;
/// the only requirement is that they are non-empty. Ids typed by a user go
/// through [`EquipmentId::parse`], which also refuses surrounding whitespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EquipmentId(String);

impl EquipmentId {
    /// Wrap an identifier as received from the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        if s.is_empty() {
            return Err(InvalidInputError::EquipmentId {
                value: s,
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        Ok(Self(s))
    }

    /// Parse an identifier typed by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or padded with whitespace.
    pub fn parse(s: &str) -> Result<Self, Error> {
        if s.trim() != s {
            return Err(InvalidInputError::EquipmentId {
                value: s.to_string(),
                reason: "must not have leading or trailing whitespace".to_string(),
            }
            .into());
        }
        Self::new(s)
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EquipmentId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for EquipmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for EquipmentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EquipmentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EquipmentId::new(s).map_err(serde::de::Error::custom)
    }
}
