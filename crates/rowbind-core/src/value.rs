//! Runtime values.
//!
//! [`Value`] is the dynamic representation of a single column value as it is
//! read from the database, and of everything a conversion can produce from it.
//! Constructed instances of registered classes are carried as [`Object`].
//!
//! Value does not implement Clone because objects may not be cloneable.

use std::any::Any;
use std::fmt;

use rustc_hash::FxHashSet;

use crate::{DataType, TypeHash, primitives};

/// A case of a registered enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    /// The enum type.
    pub type_hash: TypeHash,
    /// Case name.
    pub name: String,
    /// Case value.
    pub value: i64,
}

impl EnumValue {
    pub fn new(type_hash: TypeHash, name: impl Into<String>, value: i64) -> Self {
        Self {
            type_hash,
            name: name.into(),
            value,
        }
    }
}

/// A type-erased instance of a registered class.
pub struct Object {
    type_hash: TypeHash,
    inner: Box<dyn Any + Send + Sync>,
}

impl Object {
    pub fn new<T: Any + Send + Sync>(type_hash: TypeHash, value: T) -> Self {
        Self {
            type_hash,
            inner: Box::new(value),
        }
    }

    /// Wrap an already boxed instance.
    pub fn from_boxed(type_hash: TypeHash, inner: Box<dyn Any + Send + Sync>) -> Self {
        Self { type_hash, inner }
    }

    pub fn type_hash(&self) -> TypeHash {
        self.type_hash
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Take the instance out, or give the object back if it is not a `T`.
    pub fn downcast<T: Any>(self) -> Result<T, Object> {
        let type_hash = self.type_hash;
        self.inner
            .downcast::<T>()
            .map(|b| *b)
            .map_err(|inner| Object { type_hash, inner })
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({:?})", self.type_hash)
    }
}

/// A dynamic column or converted value.
pub enum Value {
    /// SQL NULL / absent value.
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    /// Microseconds since the Unix epoch, UTC.
    Timestamp(i64),
    /// Days since the Unix epoch.
    Date(i32),
    /// A database array value.
    SqlArray(Vec<Value>),
    List(Vec<Value>),
    /// Deduplicated, in first-seen order.
    Set(Vec<Value>),
    /// A native array.
    Array(Vec<Value>),
    Optional(Option<Box<Value>>),
    Enum(EnumValue),
    Object(Object),
}

impl Value {
    /// Get a human-readable name for this value's shape.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Timestamp(_) => "timestamp",
            Value::Date(_) => "date",
            Value::SqlArray(_) => "sql array",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Array(_) => "array",
            Value::Optional(_) => "optional",
            Value::Enum(_) => "enum",
            Value::Object(_) => "object",
        }
    }

    /// Build a set, dropping later duplicates.
    ///
    /// Floating point elements are compared by bit pattern with every NaN
    /// treated as the same value, so `NaN` collapses to one element while
    /// `0.0` and `-0.0` are kept apart. Objects are never duplicates.
    pub fn set_of(values: impl IntoIterator<Item = Value>) -> Self {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for (position, value) in values.into_iter().enumerate() {
            if seen.insert(SetKey::of(&value, position)) {
                out.push(value);
            }
        }
        Value::Set(out)
    }

    /// An optional that is present unless `value` is null.
    pub fn optional_of_nullable(value: Value) -> Self {
        match value {
            Value::Null => Value::Optional(None),
            v => Value::Optional(Some(Box::new(v))),
        }
    }

    /// The runtime type of this value. `None` for null.
    ///
    /// Container element types are not tracked at runtime and report as `Any`.
    pub fn data_type(&self) -> Option<DataType> {
        let dt = match self {
            Value::Null => return None,
            Value::Bool(_) => DataType::BOOL,
            Value::Int(_) => DataType::INT,
            Value::Long(_) => DataType::LONG,
            Value::Float(_) => DataType::FLOAT,
            Value::Double(_) => DataType::DOUBLE,
            Value::Char(_) => DataType::CHAR,
            Value::String(_) => DataType::STRING,
            Value::Bytes(_) => DataType::BYTES,
            Value::Timestamp(_) => DataType::simple(primitives::TIMESTAMP),
            Value::Date(_) => DataType::simple(primitives::DATE),
            Value::SqlArray(_) => DataType::sql_array(DataType::Any),
            Value::List(_) => DataType::list(DataType::Any),
            Value::Set(_) => DataType::set(DataType::Any),
            Value::Array(_) => DataType::array(DataType::Any),
            Value::Optional(_) => DataType::optional(DataType::Any),
            Value::Enum(e) => DataType::simple(e.type_hash),
            Value::Object(o) => DataType::simple(o.type_hash()),
        };
        Some(dt)
    }

    /// The string form of a scalar value, as used for enum lookup.
    ///
    /// Bytes have a text form only when they hold valid UTF-8. Timestamps and
    /// dates use their numeric representation. Null, containers, optionals
    /// and objects have none.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Bool(v) => Some(v.to_string()),
            Value::Int(v) => Some(v.to_string()),
            Value::Long(v) => Some(v.to_string()),
            Value::Float(v) => Some(v.to_string()),
            Value::Double(v) => Some(v.to_string()),
            Value::Char(v) => Some(v.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Bytes(b) => String::from_utf8(b.clone()).ok(),
            Value::Timestamp(v) => Some(v.to_string()),
            Value::Date(v) => Some(v.to_string()),
            Value::Enum(e) => Some(e.name.clone()),
            _ => None,
        }
    }
}

/// Hashable identity of a value inside a set.
#[derive(PartialEq, Eq, Hash)]
enum SetKey {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(u32),
    Double(u64),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    Timestamp(i64),
    Date(i32),
    SqlArray(Vec<SetKey>),
    List(Vec<SetKey>),
    Set(Vec<SetKey>),
    Array(Vec<SetKey>),
    Optional(Option<Box<SetKey>>),
    Enum(TypeHash, String),
    /// Position of the element in the input.
    Object(usize),
}

impl SetKey {
    fn of(value: &Value, position: usize) -> Self {
        let seq = |items: &[Value]| -> Vec<SetKey> {
            items.iter().map(|v| SetKey::of(v, position)).collect()
        };
        match value {
            Value::Null => SetKey::Null,
            Value::Bool(v) => SetKey::Bool(*v),
            Value::Int(v) => SetKey::Int(*v),
            Value::Long(v) => SetKey::Long(*v),
            Value::Float(v) if v.is_nan() => SetKey::Float(f32::NAN.to_bits()),
            Value::Float(v) => SetKey::Float(v.to_bits()),
            Value::Double(v) if v.is_nan() => SetKey::Double(f64::NAN.to_bits()),
            Value::Double(v) => SetKey::Double(v.to_bits()),
            Value::Char(v) => SetKey::Char(*v),
            Value::String(s) => SetKey::String(s.clone()),
            Value::Bytes(b) => SetKey::Bytes(b.clone()),
            Value::Timestamp(v) => SetKey::Timestamp(*v),
            Value::Date(v) => SetKey::Date(*v),
            Value::SqlArray(items) => SetKey::SqlArray(seq(items)),
            Value::List(items) => SetKey::List(seq(items)),
            Value::Set(items) => SetKey::Set(seq(items)),
            Value::Array(items) => SetKey::Array(seq(items)),
            Value::Optional(inner) => {
                let inner = inner.as_deref().map(|v| SetKey::of(v, position));
                SetKey::Optional(inner.map(Box::new))
            }
            Value::Enum(e) => SetKey::Enum(e.type_hash, e.name.clone()),
            Value::Object(_) => SetKey::Object(position),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(v) => write!(f, "Bool({v})"),
            Value::Int(v) => write!(f, "Int({v})"),
            Value::Long(v) => write!(f, "Long({v})"),
            Value::Float(v) => write!(f, "Float({v})"),
            Value::Double(v) => write!(f, "Double({v})"),
            Value::Char(v) => write!(f, "Char({v:?})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Bytes(b) => write!(f, "Bytes({} bytes)", b.len()),
            Value::Timestamp(v) => write!(f, "Timestamp({v})"),
            Value::Date(v) => write!(f, "Date({v})"),
            Value::SqlArray(v) => f.debug_tuple("SqlArray").field(v).finish(),
            Value::List(v) => f.debug_tuple("List").field(v).finish(),
            Value::Set(v) => f.debug_tuple("Set").field(v).finish(),
            Value::Array(v) => f.debug_tuple("Array").field(v).finish(),
            Value::Optional(v) => f.debug_tuple("Optional").field(v).finish(),
            Value::Enum(e) => write!(f, "Enum({})", e.name),
            Value::Object(o) => write!(f, "{o:?}"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::SqlArray(a), Value::SqlArray(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Optional(a), Value::Optional(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            // Objects can't be compared for equality
            (Value::Object(_), Value::Object(_)) => false,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => write!(f, "{self:?}"),
        }
    }
}
