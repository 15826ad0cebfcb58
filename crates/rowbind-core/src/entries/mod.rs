//! Registry entry types.
//!
//! - [`TypeEntry`] - Unified enum wrapping all type entries
//! - [`ClassEntry`] - Instantiable classes with constructors and properties
//! - [`EnumEntry`] - Enumeration types
//! - [`PrimitiveEntry`] - Built-in column types
//!
//! Supporting types:
//! - [`ConstructorEntry`], [`ConstructorFlags`], [`ArgList`] - Constructors
//! - [`PropertyEntry`], [`PropertyKind`] - Settable properties

mod class;
mod constructor;
mod enum_entry;
mod property;
mod type_entry;

pub use class::ClassEntry;
pub use constructor::{ArgList, ConstructorEntry, ConstructorFlags};
pub use enum_entry::{EnumCase, EnumEntry};
pub use property::{PropertyEntry, PropertyKind};
pub use type_entry::{PrimitiveEntry, TypeEntry};
