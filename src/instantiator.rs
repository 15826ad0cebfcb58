//! Instantiators: resolved plans for turning rows into values.
//!
//! An [`Instantiator`] is built once per (target type, column shape) and can
//! then be applied to any number of rows. It holds no per-row state, so one
//! instance can be shared between threads.

use std::any::Any;

use rowbind_core::{
    ConstructorEntry, ConversionError, FromValue, InstantiationError, NamedTypeList, Object,
    PropertyEntry, TypeConversion, TypeHash, Value, object_from_value,
};

/// A resolved property write for one column past the constructor arguments.
#[derive(Debug, Clone)]
pub struct PropertyAccessor {
    property: PropertyEntry,
    conversion: TypeConversion,
}

impl PropertyAccessor {
    /// Pair a property with the conversion for its column.
    pub fn new(property: PropertyEntry, conversion: TypeConversion) -> Self {
        Self {
            property,
            conversion,
        }
    }

    /// Declared name of the property being written.
    pub fn name(&self) -> &str {
        &self.property.name
    }
}

#[derive(Debug, Clone)]
enum Plan {
    /// One column converted straight to the target.
    Single(TypeConversion),
    /// Constructor call followed by property writes.
    Construct {
        type_name: String,
        type_hash: TypeHash,
        constructor: ConstructorEntry,
        /// One per constructor parameter.
        conversions: Vec<TypeConversion>,
        /// One per column after the constructor parameters.
        accessors: Vec<PropertyAccessor>,
    },
}

/// A reusable plan that instantiates a target type from rows of a fixed
/// column shape.
#[derive(Debug, Clone)]
pub struct Instantiator {
    columns: NamedTypeList,
    plan: Plan,
}

impl Instantiator {
    pub(crate) fn single(columns: NamedTypeList, conversion: TypeConversion) -> Self {
        Self {
            columns,
            plan: Plan::Single(conversion),
        }
    }

    pub(crate) fn construct(
        columns: NamedTypeList,
        type_name: String,
        type_hash: TypeHash,
        constructor: ConstructorEntry,
        conversions: Vec<TypeConversion>,
        accessors: Vec<PropertyAccessor>,
    ) -> Self {
        debug_assert_eq!(conversions.len(), constructor.param_count());
        debug_assert_eq!(accessors.len(), columns.len() - constructor.param_count());
        Self {
            columns,
            plan: Plan::Construct {
                type_name,
                type_hash,
                constructor,
                conversions,
                accessors,
            },
        }
    }

    /// The column shape this instantiator accepts.
    pub fn columns(&self) -> &NamedTypeList {
        &self.columns
    }

    /// Check if this is the single-column conversion shortcut.
    pub fn is_single_column(&self) -> bool {
        matches!(self.plan, Plan::Single(_))
    }

    /// The constructor this instantiator calls, if it calls one.
    pub fn constructor(&self) -> Option<&ConstructorEntry> {
        match &self.plan {
            Plan::Construct { constructor, .. } => Some(constructor),
            Plan::Single(_) => None,
        }
    }

    /// Property writes performed after construction, in column order.
    pub fn property_accessors(&self) -> &[PropertyAccessor] {
        match &self.plan {
            Plan::Construct { accessors, .. } => accessors,
            Plan::Single(_) => &[],
        }
    }

    /// Build a value from one row.
    ///
    /// Returns `Value::Object` for class targets.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn instantiate(&self, row: Vec<Value>) -> Result<Value, InstantiationError> {
        if row.len() != self.columns.len() {
            return Err(InstantiationError::RowLength {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }

        match &self.plan {
            Plan::Single(conversion) => {
                let value = row.into_iter().next().unwrap_or(Value::Null);
                conversion
                    .convert(value)
                    .map_err(|source| self.conversion_error(0, source))
            }
            Plan::Construct {
                type_name,
                type_hash,
                constructor,
                conversions,
                accessors,
            } => {
                let mut values = row.into_iter().enumerate();

                let mut args = Vec::with_capacity(conversions.len());
                for (conversion, (index, value)) in conversions.iter().zip(values.by_ref()) {
                    let arg = conversion
                        .convert(value)
                        .map_err(|source| self.conversion_error(index, source))?;
                    args.push(arg);
                }

                let mut instance = match constructor.invoke(args) {
                    Ok(instance) => instance,
                    Err(source) => {
                        return Err(InstantiationError::Construct {
                            type_name: type_name.clone(),
                            source,
                        });
                    }
                };

                for (accessor, (index, value)) in accessors.iter().zip(values) {
                    let converted = accessor
                        .conversion
                        .convert(value)
                        .map_err(|source| self.conversion_error(index, source))?;
                    accessor
                        .property
                        .set(instance.as_mut(), converted)
                        .map_err(|source| InstantiationError::Property {
                            type_name: type_name.clone(),
                            property: accessor.property.name.clone(),
                            source,
                        })?;
                }

                Ok(Value::Object(Object::from_boxed(*type_hash, instance)))
            }
        }
    }

    /// Build a value from one row and extract it as `T`.
    pub fn instantiate_as<T: FromValue>(&self, row: Vec<Value>) -> Result<T, InstantiationError> {
        let value = self.instantiate(row)?;
        T::from_value(value).map_err(|source| InstantiationError::Extract {
            target: std::any::type_name::<T>(),
            source,
        })
    }

    /// Build an instance of a registered class from one row.
    pub fn instantiate_object<T: Any>(&self, row: Vec<Value>) -> Result<T, InstantiationError> {
        let value = self.instantiate(row)?;
        object_from_value(value).map_err(|source| InstantiationError::Extract {
            target: std::any::type_name::<T>(),
            source,
        })
    }

    fn conversion_error(&self, index: usize, source: ConversionError) -> InstantiationError {
        InstantiationError::Conversion {
            index,
            column: self.columns.name(index).to_string(),
            source,
        }
    }
}
