//! Schema document and validated lookups

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::SchemaError;
use crate::schema::account::AccountLayout;
use crate::schema::instruction::InstructionSpec;

/// The loadable schema document describing a remote program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    /// Program name
    pub name: String,
    /// Schema version
    pub version: String,
    /// Program instructions
    pub instructions: Vec<InstructionSpec>,
    /// Program account layouts
    pub accounts: Vec<AccountLayout>,
    /// Program metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Program metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Program address
    pub address: String,
}

/// Read-only registry over a loaded [`Schema`], with indexed lookups.
///
/// Populated once at construction; no mutation after load.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schema: Schema,
    instructions: HashMap<String, usize>,
    accounts: HashMap<String, usize>,
}

impl SchemaRegistry {
    /// Build a registry from a schema document.
    pub fn new(schema: Schema) -> Self {
        let instructions = schema
            .instructions
            .iter()
            .enumerate()
            .map(|(i, ix)| (ix.name.clone(), i))
            .collect();
        let accounts = schema
            .accounts
            .iter()
            .enumerate()
            .map(|(i, layout)| (layout.name.clone(), i))
            .collect();

        Self {
            schema,
            instructions,
            accounts,
        }
    }

    /// Registry over the built-in marketplace schema.
    pub fn builtin() -> Self {
        Self::new(crate::schema::marketplace::schema())
    }

    /// Look up an instruction by name.
    pub fn lookup_instruction(&self, name: &str) -> Result<&InstructionSpec, SchemaError> {
        self.instructions
            .get(name)
            .map(|&i| &self.schema.instructions[i])
            .ok_or_else(|| SchemaError::UnknownInstruction(name.to_string()))
    }

    /// Look up an account layout by name.
    pub fn lookup_account_layout(&self, name: &str) -> Result<&AccountLayout, SchemaError> {
        self.accounts
            .get(name)
            .map(|&i| &self.schema.accounts[i])
            .ok_or_else(|| SchemaError::UnknownAccount(name.to_string()))
    }

    /// The underlying schema document.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}
