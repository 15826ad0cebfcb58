//! Settable properties.
//!
//! Columns left over after construction are written to properties. A
//! property is either a setter or a plain field; both are registered as a
//! closure that receives the instance and the converted value.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::DataType;
use crate::Value;
use crate::error::ConversionError;

/// How a property is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// A setter method.
    Setter,
    /// A directly writable field.
    Field,
}

pub(crate) type SetFn =
    dyn Fn(&mut (dyn Any + Send + Sync), Value) -> Result<(), ConversionError> + Send + Sync;

/// A property that can be assigned after construction.
#[derive(Clone)]
pub struct PropertyEntry {
    pub name: String,
    pub data_type: DataType,
    pub kind: PropertyKind,
    set: Arc<SetFn>,
}

impl PropertyEntry {
    /// Create a property entry with the closure that writes it.
    pub fn new<F>(name: impl Into<String>, data_type: DataType, kind: PropertyKind, set: F) -> Self
    where
        F: Fn(&mut (dyn Any + Send + Sync), Value) -> Result<(), ConversionError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            data_type,
            kind,
            set: Arc::new(set),
        }
    }

    /// Check whether a column name refers to this property.
    ///
    /// Matching ignores case and underscores, so `first_name` matches `firstName`.
    pub fn matches_column(&self, column: &str) -> bool {
        normalize(&self.name) == normalize(column)
    }

    /// Write an already converted value into `instance`.
    pub fn set(
        &self,
        instance: &mut (dyn Any + Send + Sync),
        value: Value,
    ) -> Result<(), ConversionError> {
        (self.set)(instance, value)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Debug for PropertyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyEntry")
            .field("name", &self.name)
            .field("data_type", &self.data_type)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
