//! TypeEntry enum for unified type storage.

use crate::TypeHash;

use super::{ClassEntry, EnumEntry};

/// Registry entry for a built-in column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveEntry {
    pub name: &'static str,
    pub type_hash: TypeHash,
}

/// Unified type entry for registry storage.
#[derive(Debug, Clone)]
pub enum TypeEntry {
    /// Built-in column type.
    Primitive(PrimitiveEntry),
    /// Registered class.
    Class(ClassEntry),
    /// Registered enumeration.
    Enum(EnumEntry),
}

impl TypeEntry {
    /// Get the type hash for this entry.
    pub fn type_hash(&self) -> TypeHash {
        match self {
            TypeEntry::Primitive(e) => e.type_hash,
            TypeEntry::Class(e) => e.type_hash,
            TypeEntry::Enum(e) => e.type_hash,
        }
    }

    /// Get the registered name of this type.
    pub fn name(&self) -> &str {
        match self {
            TypeEntry::Primitive(e) => e.name,
            TypeEntry::Class(e) => &e.name,
            TypeEntry::Enum(e) => &e.name,
        }
    }

    /// Get the class entry, if this is a class.
    pub fn as_class(&self) -> Option<&ClassEntry> {
        match self {
            TypeEntry::Class(e) => Some(e),
            _ => None,
        }
    }

    /// Get the enum entry, if this is an enum.
    pub fn as_enum(&self) -> Option<&EnumEntry> {
        match self {
            TypeEntry::Enum(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClassEntry> for TypeEntry {
    fn from(entry: ClassEntry) -> Self {
        TypeEntry::Class(entry)
    }
}

impl From<EnumEntry> for TypeEntry {
    fn from(entry: EnumEntry) -> Self {
        TypeEntry::Enum(entry)
    }
}

impl From<PrimitiveEntry> for TypeEntry {
    fn from(entry: PrimitiveEntry) -> Self {
        TypeEntry::Primitive(entry)
    }
}
