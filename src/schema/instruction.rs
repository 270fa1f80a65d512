//! Instruction metadata for the remote program

use serde::{Deserialize, Serialize};

use crate::schema::types::TypeDescriptor;

/// Declares one instruction: its name, the account slots a request must
/// fill (in wire order) and its typed arguments (in wire order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionSpec {
    /// Instruction name (schema key)
    pub name: String,
    /// Required accounts, in declared order
    pub accounts: Vec<AccountSpec>,
    /// Arguments, in declared order
    pub args: Vec<ArgSpec>,
}

/// Declares an account slot used by an instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSpec {
    /// Slot name
    pub name: String,
    /// May the program mutate this account?
    pub is_mut: bool,
    /// Must the supplied reference sign the call?
    pub is_signer: bool,
}

/// Declares a typed instruction argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgSpec {
    /// Argument name
    pub name: String,
    /// Argument type
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

impl InstructionSpec {
    /// Create a new instruction spec with no accounts or arguments
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            accounts: Vec::new(),
            args: Vec::new(),
        }
    }

    /// Add an account slot to the instruction
    pub fn add_account(&mut self, name: &str, is_mut: bool, is_signer: bool) {
        self.accounts.push(AccountSpec {
            name: name.to_string(),
            is_mut,
            is_signer,
        });
    }

    /// Add an argument to the instruction
    pub fn add_arg(&mut self, name: &str, ty: TypeDescriptor) {
        self.args.push(ArgSpec {
            name: name.to_string(),
            ty,
        });
    }
}
