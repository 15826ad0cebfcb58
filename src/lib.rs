//! rowbind - map typed, named result-set columns onto registered Rust types.
//!
//! Given a target type and the names and types of a query's columns,
//! rowbind works out once how to build the target from a row: which
//! constructor to call, how to convert each column to the matching
//! parameter, and which properties receive the columns the constructor does
//! not take. The resulting [`Instantiator`] is then applied to every row.
//!
//! # Crates
//!
//! - `rowbind-core` - values, type descriptors, registration entries and errors
//! - `rowbind-registry` - type and conversion registries
//! - this crate - conversion and constructor resolution, instantiators,
//!   dialects and conversion modules
//!
//! The commonly used items of the other two are re-exported here.
//!
//! # Features
//!
//! - `chrono` - conversions between timestamps and dates and `chrono` types
//! - `profiling` / `profile-with-puffin` - instrument resolution with `profiling`

pub mod constructor;
pub mod conversion;
mod dialect;
mod instantiator;
pub mod modules;
mod provider;

pub use dialect::{DefaultDialect, Dialect};
pub use instantiator::{Instantiator, PropertyAccessor};
pub use modules::ConversionModule;
pub use provider::{InstantiatorProvider, ProviderConfig};

pub use rowbind_core::{
    ArgList, ClassBuilder, ClassEntry, ConstructorFlags, ConversionError, DataType, Direction,
    EnumEntry, EnumValue, Error, FromValue, InstantiationError, IntoValue, NamedType,
    NamedTypeList, Object, PropertyKind, RegistrationError, ResolutionError, TypeConversion,
    TypeHash, Value, primitives,
};
pub use rowbind_registry::{TypeConversionRegistry, TypeRegistry};
