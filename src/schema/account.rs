//! Account layout metadata for the remote program

use serde::{Deserialize, Serialize};

use crate::schema::types::TypeDescriptor;

/// Describes how to decode raw account bytes into typed values: an ordered
/// list of typed fields following the 8-byte account discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountLayout {
    /// Layout name (schema key)
    pub name: String,
    /// Fields, in stored order
    pub fields: Vec<FieldSpec>,
}

/// One typed field of an account layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name
    pub name: String,
    /// Field type
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

impl AccountLayout {
    /// Create a new account layout with no fields
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    /// Add a field to the layout
    pub fn add_field(&mut self, name: &str, ty: TypeDescriptor) {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            ty,
        });
    }
}
