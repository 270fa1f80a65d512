//! Declarative schema of the remote program
//!
//! The schema enumerates the program's instructions (ordered accounts and
//! typed arguments) and its account layouts (ordered typed fields). It is
//! loaded once, either from the built-in marketplace definition or from a
//! JSON document, and is read-only for the life of the client.

pub mod account;
pub mod instruction;
pub mod loader;
pub mod marketplace;
pub mod registry;
pub mod types;


pub use self::account::{AccountLayout, FieldSpec};
pub use self::instruction::{AccountSpec, ArgSpec, InstructionSpec};
pub use self::registry::{Schema, SchemaRegistry};
pub use self::types::{EnumVariant, TypeDescriptor};
