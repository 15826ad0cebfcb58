//! Deterministic hash-based type identity.
//!
//! [`TypeHash`] is a 64-bit hash that identifies a named type (primitive,
//! registered class or enum). Hashes are computed from names, so the same
//! name always produces the same hash regardless of registration order, and
//! primitive hashes are compile-time constants.
//!
//! # Examples
//!
//! ```
//! use rowbind_core::{TypeHash, primitives};
//!
//! let string = TypeHash::from_name("string");
//! assert_eq!(string, primitives::STRING);
//! assert_ne!(TypeHash::from_name("Employee"), string);
//! ```

use std::fmt;

use xxhash_rust::const_xxh64::xxh64;

/// Domain marker mixed into every type hash.
const TYPE_DOMAIN: u64 = 0x2fac10b63a6cc57c;

/// A deterministic 64-bit hash identifying a type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Create a type hash from a type name.
    ///
    /// This is a `const fn`, so well-known hashes can be computed at compile time.
    #[inline]
    pub const fn from_name(name: &str) -> Self {
        TypeHash(TYPE_DOMAIN ^ xxh64(name.as_bytes(), 0))
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Well-known hashes for the built-in column types.
pub mod primitives {
    use super::TypeHash;

    /// `bool`
    pub const BOOL: TypeHash = TypeHash::from_name("bool");
    /// 32-bit signed integer.
    pub const INT: TypeHash = TypeHash::from_name("int");
    /// 64-bit signed integer.
    pub const LONG: TypeHash = TypeHash::from_name("long");
    /// 32-bit float.
    pub const FLOAT: TypeHash = TypeHash::from_name("float");
    /// 64-bit float.
    pub const DOUBLE: TypeHash = TypeHash::from_name("double");
    /// A single unicode scalar value.
    pub const CHAR: TypeHash = TypeHash::from_name("char");
    /// UTF-8 text.
    pub const STRING: TypeHash = TypeHash::from_name("string");
    /// Raw bytes.
    pub const BYTES: TypeHash = TypeHash::from_name("bytes");
    /// Microseconds since the Unix epoch, UTC.
    pub const TIMESTAMP: TypeHash = TypeHash::from_name("timestamp");
    /// Days since the Unix epoch.
    pub const DATE: TypeHash = TypeHash::from_name("date");

    /// All built-in types paired with their names.
    pub const ALL: [(&str, TypeHash); 10] = [
        ("bool", BOOL),
        ("int", INT),
        ("long", LONG),
        ("float", FLOAT),
        ("double", DOUBLE),
        ("char", CHAR),
        ("string", STRING),
        ("bytes", BYTES),
        ("timestamp", TIMESTAMP),
        ("date", DATE),
    ];
}
