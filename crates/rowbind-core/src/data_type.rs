//! DataType - the type descriptor model.
//!
//! `DataType` describes the declared type of a result column, a constructor
//! parameter or a property. Named types (primitives, classes, enums) are
//! identified by [`TypeHash`]; container and optional shapes wrap an element
//! type.
//!
//! # Example
//!
//! ```
//! use rowbind_core::{DataType, primitives};
//!
//! let tags = DataType::list(DataType::STRING);
//! assert_eq!(tags.element_type(), Some(&DataType::STRING));
//!
//! let maybe_id = DataType::optional(DataType::simple(primitives::LONG));
//! assert!(maybe_id.is_optional());
//! ```

use std::fmt;

use crate::{TypeHash, primitives};

/// A complete type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// The top type. Every type is assignable to it.
    Any,
    /// A named type: primitive, registered class or registered enum.
    Simple(TypeHash),
    /// A database array value with the given element type.
    SqlArray(Box<DataType>),
    /// An ordered list.
    List(Box<DataType>),
    /// A deduplicated set that keeps first-seen order.
    Set(Box<DataType>),
    /// A native array.
    Array(Box<DataType>),
    /// An optional wrapper.
    Optional(Box<DataType>),
    /// Optional specialised for `int`.
    OptionalInt,
    /// Optional specialised for `long`.
    OptionalLong,
    /// Optional specialised for `double`.
    OptionalDouble,
}

impl DataType {
    pub const BOOL: DataType = DataType::Simple(primitives::BOOL);
    pub const INT: DataType = DataType::Simple(primitives::INT);
    pub const LONG: DataType = DataType::Simple(primitives::LONG);
    pub const FLOAT: DataType = DataType::Simple(primitives::FLOAT);
    pub const DOUBLE: DataType = DataType::Simple(primitives::DOUBLE);
    pub const CHAR: DataType = DataType::Simple(primitives::CHAR);
    pub const STRING: DataType = DataType::Simple(primitives::STRING);
    pub const BYTES: DataType = DataType::Simple(primitives::BYTES);
    pub const TIMESTAMP: DataType = DataType::Simple(primitives::TIMESTAMP);
    pub const DATE: DataType = DataType::Simple(primitives::DATE);

    /// A named type.
    pub const fn simple(hash: TypeHash) -> Self {
        DataType::Simple(hash)
    }

    /// A named type looked up by name.
    pub fn named(name: &str) -> Self {
        DataType::Simple(TypeHash::from_name(name))
    }

    pub fn sql_array(element: DataType) -> Self {
        DataType::SqlArray(Box::new(element))
    }

    pub fn list(element: DataType) -> Self {
        DataType::List(Box::new(element))
    }

    pub fn set(element: DataType) -> Self {
        DataType::Set(Box::new(element))
    }

    pub fn array(element: DataType) -> Self {
        DataType::Array(Box::new(element))
    }

    pub fn optional(inner: DataType) -> Self {
        DataType::Optional(Box::new(inner))
    }

    /// The hash of a named type, `None` for structural types.
    pub fn type_hash(&self) -> Option<TypeHash> {
        match self {
            DataType::Simple(hash) => Some(*hash),
            _ => None,
        }
    }

    /// The element type of a container, or the wrapped type of an optional.
    pub fn element_type(&self) -> Option<&DataType> {
        match self {
            DataType::SqlArray(e)
            | DataType::List(e)
            | DataType::Set(e)
            | DataType::Array(e)
            | DataType::Optional(e) => Some(e),
            _ => None,
        }
    }

    /// Check if this is any of the optional shapes.
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            DataType::Optional(_)
                | DataType::OptionalInt
                | DataType::OptionalLong
                | DataType::OptionalDouble
        )
    }
}

impl DataType {
    /// Render this type, naming simple types with `name_of`.
    pub fn display_with(&self, name_of: &dyn Fn(TypeHash) -> String) -> String {
        match self {
            DataType::Any => "any".to_string(),
            DataType::Simple(hash) => name_of(*hash),
            DataType::SqlArray(e) => format!("sql_array<{}>", e.display_with(name_of)),
            DataType::List(e) => format!("list<{}>", e.display_with(name_of)),
            DataType::Set(e) => format!("set<{}>", e.display_with(name_of)),
            DataType::Array(e) => format!("{}[]", e.display_with(name_of)),
            DataType::Optional(e) => format!("optional<{}>", e.display_with(name_of)),
            DataType::OptionalInt => "optional_int".to_string(),
            DataType::OptionalLong => "optional_long".to_string(),
            DataType::OptionalDouble => "optional_double".to_string(),
        }
    }
}

/// Names built-in types; other named types print as their hash.
fn primitive_name(hash: TypeHash) -> String {
    primitives::ALL
        .iter()
        .find(|(_, h)| *h == hash)
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| hash.to_string())
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(&primitive_name))
    }
}
