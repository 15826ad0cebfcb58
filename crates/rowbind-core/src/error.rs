//! Unified error types for rowbind.
//!
//! ## Error Hierarchy
//!
//! ```text
//! Error (top-level wrapper)
//! ├── RegistrationError   - Type registration errors (startup)
//! ├── ResolutionError     - No usable constructor/conversion plan (find_instantiator)
//! ├── ConversionError     - A value could not be converted (per value)
//! └── InstantiationError  - A row could not be turned into an instance (per row)
//! ```
//!
//! Resolution errors abort a whole `find_instantiator` call. Conversion and
//! instantiation errors only surface when a resolved plan is applied to data.

use thiserror::Error;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors that occur while registering types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A type with the same name was already registered.
    #[error("type '{0}' is already registered")]
    DuplicateType(String),

    /// A class names a base class that has not been registered.
    #[error("class '{class}' extends unknown base class {base}")]
    UnknownBaseClass { class: String, base: String },
}

// ============================================================================
// Resolution Errors
// ============================================================================

/// Errors that abort building an instantiator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    /// The requested type is neither convertible nor a registered class.
    #[error(
        "could not find a way to instantiate {type_name} with parameters {columns}: type is not registered"
    )]
    UnknownType { type_name: String, columns: String },

    /// More than one constructor carries the designated-instantiator marker.
    #[error("only one constructor of {type_name} can be marked as the instantiator, found {count}")]
    AmbiguousInstantiator { type_name: String, count: usize },

    /// The designated constructor's arity does not match the column count.
    #[error(
        "cannot instantiate {type_name}: constructor takes {expected} arguments, but result set has {actual} (expected {expected}, got {actual})"
    )]
    ParameterCountMismatch {
        type_name: String,
        expected: usize,
        actual: usize,
    },

    /// Implicit instantiation of a non-public class.
    #[error(
        "{type_name} can't be instantiated implicitly because it is not public and has no designated instantiator"
    )]
    NotPublic { type_name: String },

    /// No constructor (plus properties) could be matched to the columns.
    #[error("could not find a way to instantiate {type_name} with parameters {columns}")]
    NoMatchingConstructor { type_name: String, columns: String },

    /// A leftover column has neither a setter nor a field.
    #[error("could not find neither setter nor field for '{property}' on {type_name}")]
    UnknownProperty { type_name: String, property: String },

    /// A column name matches more than one property of the same kind.
    #[error("ambiguous property '{property}' on {type_name}: matches {candidates}")]
    AmbiguousProperty {
        type_name: String,
        property: String,
        candidates: String,
    },

    /// No conversion path exists between two types.
    #[error("could not find a conversion from {source_type} to {target_type}")]
    NoConversion {
        source_type: String,
        target_type: String,
    },
}

// ============================================================================
// Conversion Errors
// ============================================================================

/// Errors raised while converting a single value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The value has the wrong runtime shape.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// An integer does not fit into the target type.
    #[error("integer {value} out of range for {target_type}")]
    IntegerOverflow {
        value: i64,
        target_type: &'static str,
    },

    /// No enum case has the given name.
    #[error("no enum constant {enum_name}.{value}")]
    UnknownEnumVariant { enum_name: String, value: String },

    /// The value is of the right shape but cannot represent the target.
    #[error("invalid value {value} for {target}: {reason}")]
    InvalidValue {
        target: &'static str,
        value: String,
        reason: String,
    },
}

// ============================================================================
// Instantiation Errors
// ============================================================================

/// Errors raised while applying an instantiator to a row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstantiationError {
    /// The row does not have one value per column.
    #[error("row has {actual} values, but instantiator expects {expected}")]
    RowLength { expected: usize, actual: usize },

    /// A column value failed to convert.
    #[error("failed to convert column {index} ('{column}'): {source}")]
    Conversion {
        index: usize,
        column: String,
        #[source]
        source: ConversionError,
    },

    /// The constructor rejected its arguments.
    #[error("failed to construct {type_name}: {source}")]
    Construct {
        type_name: String,
        #[source]
        source: ConversionError,
    },

    /// A property write rejected its value.
    #[error("failed to set property '{property}' of {type_name}: {source}")]
    Property {
        type_name: String,
        property: String,
        #[source]
        source: ConversionError,
    },

    /// The instance has a different type than the caller asked for.
    #[error("instance cannot be read as {target}: {source}")]
    Extract {
        target: &'static str,
        #[source]
        source: ConversionError,
    },
}

// ============================================================================
// Top-level Error
// ============================================================================

/// Top-level error wrapping every phase.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Instantiation(#[from] InstantiationError),
}
