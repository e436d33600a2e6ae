//! Schema descriptors.

pub use scholar_codec::{FieldKind, FieldSpec};

/// The ordered field list and key definition of one record type.
///
/// The field order is the encoding order. Changing it changes every stored
/// byte, so a schema is fixed for the lifetime of a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Collection name used in errors and logs.
    pub name: &'static str,
    /// Key prefix used under [`KeySpace::Prefixed`](crate::KeySpace::Prefixed).
    pub key_prefix: &'static str,
    /// Fields in encoding order.
    pub fields: &'static [FieldSpec],
    /// Position of the ID field in `fields`.
    pub key_field: usize,
}

impl Schema {
    /// Number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of the field called `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The ID field.
    #[must_use]
    pub fn key_spec(&self) -> Option<&FieldSpec> {
        self.fields.get(self.key_field)
    }
}
