//! ClassBuilder for registering Rust types as instantiation targets.
//!
//! ClassBuilder provides a fluent API that stands in for reflection: each
//! constructor is declared with its parameter types and a closure, and each
//! settable property with its type and a writer.
//!
//! # Example
//!
//! ```
//! use rowbind_core::{ClassBuilder, DataType};
//!
//! struct Employee {
//!     id: i64,
//!     name: String,
//!     department: Option<String>,
//! }
//!
//! let entry = ClassBuilder::<Employee>::new("Employee")
//!     .constructor(vec![DataType::LONG, DataType::STRING], |args| {
//!         Ok(Employee { id: args.next()?, name: args.next()?, department: None })
//!     })
//!     .setter("department", DataType::STRING, |e: &mut Employee, v: Option<String>| {
//!         e.department = v
//!     })
//!     .build();
//!
//! assert_eq!(entry.constructors.len(), 1);
//! assert_eq!(entry.properties.len(), 1);
//! ```

use std::any::Any;
use std::marker::PhantomData;

use crate::convert::FromValue;
use crate::entries::{
    ArgList, ClassEntry, ConstructorEntry, ConstructorFlags, PropertyEntry, PropertyKind,
};
use crate::error::ConversionError;
use crate::{DataType, TypeHash};

/// Builder for a [`ClassEntry`] backed by the Rust type `T`.
pub struct ClassBuilder<T> {
    entry: ClassEntry,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> ClassBuilder<T> {
    /// Start a public class with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            entry: ClassEntry::new(name),
            _marker: PhantomData,
        }
    }

    /// Mark the class as not public.
    pub fn non_public(mut self) -> Self {
        self.entry.is_public = false;
        self
    }

    /// Set the single base class this class is assignable to.
    pub fn base(mut self, base: TypeHash) -> Self {
        self.entry.base_class = Some(base);
        self
    }

    // === Constructors ===

    /// Add a public constructor.
    pub fn constructor<F>(self, params: Vec<DataType>, f: F) -> Self
    where
        F: Fn(&mut ArgList) -> Result<T, ConversionError> + Send + Sync + 'static,
    {
        self.constructor_with_flags(params, ConstructorFlags::PUBLIC, f)
    }

    /// Add the designated instantiator constructor. It need not be public.
    pub fn designated_constructor<F>(self, params: Vec<DataType>, f: F) -> Self
    where
        F: Fn(&mut ArgList) -> Result<T, ConversionError> + Send + Sync + 'static,
    {
        self.constructor_with_flags(params, ConstructorFlags::DESIGNATED, f)
    }

    /// Add a public constructor that implicit instantiation must skip.
    pub fn ignored_constructor<F>(self, params: Vec<DataType>, f: F) -> Self
    where
        F: Fn(&mut ArgList) -> Result<T, ConversionError> + Send + Sync + 'static,
    {
        let flags = ConstructorFlags::PUBLIC | ConstructorFlags::IGNORED;
        self.constructor_with_flags(params, flags, f)
    }

    /// Add a non-public constructor.
    pub fn private_constructor<F>(self, params: Vec<DataType>, f: F) -> Self
    where
        F: Fn(&mut ArgList) -> Result<T, ConversionError> + Send + Sync + 'static,
    {
        self.constructor_with_flags(params, ConstructorFlags::empty(), f)
    }

    /// Add a constructor with explicit marker flags.
    pub fn constructor_with_flags<F>(
        mut self,
        params: Vec<DataType>,
        flags: ConstructorFlags,
        f: F,
    ) -> Self
    where
        F: Fn(&mut ArgList) -> Result<T, ConversionError> + Send + Sync + 'static,
    {
        let ctor = ConstructorEntry::new(params, flags, move |args| {
            f(args).map(|v| Box::new(v) as Box<dyn Any + Send + Sync>)
        });
        self.entry.constructors.push(ctor);
        self
    }

    // === Properties ===

    /// Add a setter-backed property.
    pub fn setter<V, F>(self, name: impl Into<String>, data_type: DataType, f: F) -> Self
    where
        V: FromValue,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.property(name, data_type, PropertyKind::Setter, f)
    }

    /// Add a directly written field.
    pub fn field<V, F>(self, name: impl Into<String>, data_type: DataType, f: F) -> Self
    where
        V: FromValue,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.property(name, data_type, PropertyKind::Field, f)
    }

    fn property<V, F>(
        mut self,
        name: impl Into<String>,
        data_type: DataType,
        kind: PropertyKind,
        f: F,
    ) -> Self
    where
        V: FromValue,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let prop = PropertyEntry::new(name, data_type, kind, move |instance, value| {
            let target = instance
                .downcast_mut::<T>()
                .ok_or(ConversionError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                    actual: "object of another type",
                })?;
            f(target, V::from_value(value)?);
            Ok(())
        });
        self.entry.properties.push(prop);
        self
    }

    /// Finish the class and return its registry entry.
    pub fn build(self) -> ClassEntry {
        self.entry
    }
}
