//! Result-set column metadata.

use std::fmt;

use crate::DataType;

/// One result column: a name and its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedType {
    pub name: String,
    pub data_type: DataType,
}

impl NamedType {
    /// Create a column description.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered column metadata describing the shape of a query result.
///
/// Order is significant: the first columns feed constructor parameters
/// positionally, the rest are matched to properties by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NamedTypeList {
    columns: Vec<NamedType>,
}

impl NamedTypeList {
    /// Create an empty column list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column append.
    pub fn with(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.columns.push(NamedType::new(name, data_type));
        self
    }

    /// Append a column.
    pub fn push(&mut self, name: impl Into<String>, data_type: DataType) {
        self.columns.push(NamedType::new(name, data_type));
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the list has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Name of the column at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn name(&self, index: usize) -> &str {
        &self.columns[index].name
    }

    /// Declared type of the column at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn data_type(&self, index: usize) -> &DataType {
        &self.columns[index].data_type
    }

    /// Column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Iterate over the columns in order.
    pub fn iter(&self) -> std::slice::Iter<'_, NamedType> {
        self.columns.iter()
    }

    /// Render as `[name: type, ...]`, naming types with `type_name`.
    pub fn display_with(&self, type_name: &dyn Fn(&DataType) -> String) -> String {
        let parts: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{}: {}", c.name, type_name(&c.data_type)))
            .collect();
        format!("[{}]", parts.join(", "))
    }
}

impl FromIterator<NamedType> for NamedTypeList {
    fn from_iter<I: IntoIterator<Item = NamedType>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a NamedTypeList {
    type Item = &'a NamedType;
    type IntoIter = std::slice::Iter<'a, NamedType>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

impl fmt::Display for NamedTypeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(&|dt| dt.to_string()))
    }
}
