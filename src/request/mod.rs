//! Request building
//!
//! Assembles one instruction invocation into an immutable [`CallDescriptor`]:
//! account references in schema-declared order, the encoded data payload
//! (8-byte instruction discriminator followed by the encoded arguments) and
//! the set of identities that must sign. The descriptor is the sole artifact
//! the remote client accepts; the builder itself never touches the network.

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use serde_json::{Map, Value};
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use crate::encoder::{encode_args, EncodedArg};
use crate::errors::{ClientError, RequestError};
use crate::schema::SchemaRegistry;
use crate::utils::hash::instruction_discriminator;

/// A concrete account reference supplied for one of an instruction's
/// account slots, with or without signing capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRef {
    pub pubkey: Pubkey,
    pub signing: bool,
}

impl AccountRef {
    /// Reference without signing capability.
    pub fn new(pubkey: Pubkey) -> Self {
        Self {
            pubkey,
            signing: false,
        }
    }

    /// Reference accompanied by signing capability.
    pub fn signing(pubkey: Pubkey) -> Self {
        Self {
            pubkey,
            signing: true,
        }
    }
}

/// The fully assembled, ready-to-submit representation of one instruction
/// invocation. Immutable after build.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    /// Instruction name, as declared in the schema
    pub instruction: String,
    /// Target program
    pub program_id: Pubkey,
    /// Account references in schema-declared order
    pub accounts: Vec<AccountMeta>,
    /// Data payload: instruction discriminator + encoded arguments
    pub data: Vec<u8>,
    /// Identities that must sign the call
    pub signers: Vec<Pubkey>,
    /// Encoded arguments, kept alongside the payload for inspection
    pub args: Vec<EncodedArg>,
}

impl CallDescriptor {
    /// Convert to a submittable Solana instruction.
    pub fn to_instruction(&self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: self.accounts.clone(),
            data: self.data.clone(),
        }
    }
}

/// Builds call descriptors against a schema registry.
pub struct RequestBuilder<'a> {
    registry: &'a SchemaRegistry,
    program_id: Pubkey,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(registry: &'a SchemaRegistry, program_id: Pubkey) -> Self {
        Self {
            registry,
            program_id,
        }
    }

    /// Assemble a call descriptor for `instruction`.
    ///
    /// Accounts are filled in schema-declared order; every declared slot
    /// must be present in `accounts`, and slots marked as signers must be
    /// supplied with signing capability. Argument encoding failures
    /// propagate unchanged.
    pub fn build(
        &self,
        instruction: &str,
        accounts: &HashMap<String, AccountRef>,
        values: &Map<String, Value>,
    ) -> Result<CallDescriptor, ClientError> {
        let spec = self.registry.lookup_instruction(instruction)?;

        let mut metas = Vec::with_capacity(spec.accounts.len());
        let mut signers = Vec::new();
        for slot in &spec.accounts {
            let supplied = accounts
                .get(&slot.name)
                .ok_or_else(|| RequestError::MissingAccount(slot.name.clone()))?;
            if slot.is_signer {
                if !supplied.signing {
                    return Err(RequestError::MissingSigner(slot.name.clone()).into());
                }
                signers.push(supplied.pubkey);
            }
            let meta = if slot.is_mut {
                AccountMeta::new(supplied.pubkey, slot.is_signer)
            } else {
                AccountMeta::new_readonly(supplied.pubkey, slot.is_signer)
            };
            metas.push(meta);
        }

        let args = encode_args(spec, values)?;
        let mut data = instruction_discriminator(&spec.name).to_vec();
        for arg in &args {
            data.extend_from_slice(&arg.data);
        }

        Ok(CallDescriptor {
            instruction: spec.name.clone(),
            program_id: self.program_id,
            accounts: metas,
            data,
            signers,
            args,
        })
    }
}
