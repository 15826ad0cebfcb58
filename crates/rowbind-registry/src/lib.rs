//! Registries for rowbind.
//!
//! - [`TypeRegistry`] - registered classes, enums and primitives, plus
//!   assignability between [`DataType`](rowbind_core::DataType)s
//! - [`TypeConversionRegistry`] - registered inbound and outbound conversions
//!
//! Both registries are populated single-threaded at startup and are only
//! read afterwards, so shared references can be used from many threads.

mod conversion_registry;
mod type_registry;

pub use conversion_registry::TypeConversionRegistry;
pub use type_registry::TypeRegistry;
