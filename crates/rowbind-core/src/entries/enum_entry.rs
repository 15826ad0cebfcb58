//! Enum type entry.

use crate::TypeHash;
use crate::value::EnumValue;

/// A named enum case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCase {
    pub name: String,
    pub value: i64,
}

/// Registry entry for an enumeration type.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumEntry {
    pub name: String,
    pub type_hash: TypeHash,
    pub cases: Vec<EnumCase>,
}

impl EnumEntry {
    /// Create an enum entry with no cases.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Self {
            name,
            type_hash,
            cases: Vec::new(),
        }
    }

    /// Add a case. Cases are numbered by position.
    pub fn with_case(mut self, name: impl Into<String>) -> Self {
        let value = self.cases.len() as i64;
        self.cases.push(EnumCase {
            name: name.into(),
            value,
        });
        self
    }

    /// Add several cases.
    pub fn with_cases<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self = self.with_case(name);
        }
        self
    }

    /// Look up a case by its exact name.
    pub fn case_by_name(&self, name: &str) -> Option<EnumValue> {
        self.cases
            .iter()
            .find(|c| c.name == name)
            .map(|c| EnumValue::new(self.type_hash, c.name.clone(), c.value))
    }
}
