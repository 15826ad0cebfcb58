//! Constructor entries.
//!
//! A constructor is registered as a closure together with its ordered
//! parameter types and marker flags. The closure receives its arguments,
//! already converted to the declared parameter types, through [`ArgList`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::convert::FromValue;
use crate::error::ConversionError;
use crate::{DataType, Value};

bitflags! {
    /// Marker flags on a constructor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConstructorFlags: u8 {
        /// Visible to implicit instantiation.
        const PUBLIC = 1 << 0;
        /// The designated instantiator. Bypasses implicit search and visibility.
        const DESIGNATED = 1 << 1;
        /// Never considered by implicit instantiation.
        const IGNORED = 1 << 2;
    }
}

/// Constructor arguments, consumed in declaration order.
#[derive(Debug)]
pub struct ArgList {
    values: std::vec::IntoIter<Value>,
    position: usize,
}

impl ArgList {
    /// Wrap already converted arguments.
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values: values.into_iter(),
            position: 0,
        }
    }

    /// Take the next argument as `T`.
    pub fn next<T: FromValue>(&mut self) -> Result<T, ConversionError> {
        let position = self.position;
        self.position += 1;
        let Some(value) = self.values.next() else {
            return Err(ConversionError::InvalidValue {
                target: "argument",
                value: format!("#{position}"),
                reason: "constructor read more arguments than it declares".to_string(),
            });
        };
        T::from_value(value)
    }
}

pub(crate) type ConstructFn =
    dyn Fn(&mut ArgList) -> Result<Box<dyn Any + Send + Sync>, ConversionError> + Send + Sync;

/// A registered constructor.
#[derive(Clone)]
pub struct ConstructorEntry {
    /// Ordered parameter types.
    pub params: Vec<DataType>,
    pub flags: ConstructorFlags,
    func: Arc<ConstructFn>,
}

impl ConstructorEntry {
    /// Create a constructor entry from its parameter types, flags and closure.
    pub fn new<F>(params: Vec<DataType>, flags: ConstructorFlags, func: F) -> Self
    where
        F: Fn(&mut ArgList) -> Result<Box<dyn Any + Send + Sync>, ConversionError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            params,
            flags,
            func: Arc::new(func),
        }
    }

    /// Number of declared parameters.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn is_public(&self) -> bool {
        self.flags.contains(ConstructorFlags::PUBLIC)
    }

    pub fn is_designated(&self) -> bool {
        self.flags.contains(ConstructorFlags::DESIGNATED)
    }

    pub fn is_ignored(&self) -> bool {
        self.flags.contains(ConstructorFlags::IGNORED)
    }

    /// Invoke the constructor with already converted arguments.
    pub fn invoke(&self, args: Vec<Value>) -> Result<Box<dyn Any + Send + Sync>, ConversionError> {
        let mut args = ArgList::new(args);
        (self.func)(&mut args)
    }
}

impl fmt::Debug for ConstructorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorEntry")
            .field("params", &self.params)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
