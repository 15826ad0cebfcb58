//! Core types for rowbind.
//!
//! This crate holds everything the registries and the instantiation engine
//! share: type identity ([`TypeHash`]), type descriptors ([`DataType`]),
//! runtime values ([`Value`]), conversion function values
//! ([`TypeConversion`]), result-set metadata ([`NamedTypeList`]), the
//! registration entries that replace reflection, and the error types.

mod class_builder;
mod conversion;
mod convert;
mod data_type;
pub mod entries;
mod error;
mod named_type;
mod type_hash;
mod value;

pub use class_builder::ClassBuilder;
pub use conversion::{Direction, TypeConversion};
pub use convert::{FromValue, IntoValue, object_from_value};
pub use data_type::DataType;
pub use entries::{
    ArgList, ClassEntry, ConstructorEntry, ConstructorFlags, EnumCase, EnumEntry, PrimitiveEntry,
    PropertyEntry, PropertyKind, TypeEntry,
};
pub use error::{ConversionError, Error, InstantiationError, RegistrationError, ResolutionError};
pub use named_type::{NamedType, NamedTypeList};
pub use type_hash::{TypeHash, primitives};
pub use value::{EnumValue, Object, Value};
