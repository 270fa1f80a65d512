//! Error handling for the marketplace client.
//!
//! Each layer of the client owns its own error type: schema lookups,
//! argument encoding, request building, transport, and account decoding.
//! Every error crosses layer boundaries as a typed failure; nothing is
//! swallowed or coerced on the way up. The umbrella [`ClientError`] is what
//! callers of the high-level operations receive.

use thiserror::Error;

use solana_pubkey::Pubkey;

/// Errors from schema registry lookups.
///
/// These indicate a programming error (an instruction or account name the
/// schema does not know about) and are never retried.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema defines no instruction with this name.
    #[error("unknown instruction: {0}")]
    UnknownInstruction(String),

    /// The schema defines no account layout with this name.
    #[error("unknown account layout: {0}")]
    UnknownAccount(String),
}

/// Errors from validating and encoding instruction arguments.
///
/// These are caller input errors, surfaced to the application layer for
/// correction. The encoder produces no partial output on failure.
#[derive(Error, Debug)]
pub enum EncodingError {
    /// A non-optional argument was absent from the supplied values.
    #[error("missing argument `{0}`")]
    MissingArgument(String),

    /// The supplied value has the wrong shape for the declared type.
    #[error("argument `{arg}`: expected {expected}")]
    TypeMismatch { arg: String, expected: &'static str },

    /// A numeric value is not representable as an unsigned 64-bit integer.
    #[error("argument `{0}` is out of range for u64")]
    OutOfRange(String),

    /// A public key value is not a well-formed 32-byte base58 identifier.
    #[error("argument `{0}` is not a valid public key")]
    InvalidKey(String),

    /// An enum value carries an unrecognized (or missing) variant tag.
    #[error("argument `{arg}`: invalid variant `{variant}`")]
    InvalidVariant { arg: String, variant: String },
}

/// Errors from assembling a call descriptor.
///
/// These are caller wiring errors, fatal to the call that produced them.
#[derive(Error, Debug)]
pub enum RequestError {
    /// An account slot declared by the instruction was not supplied.
    #[error("missing account `{0}`")]
    MissingAccount(String),

    /// An account slot requires a signer but the supplied reference carries
    /// no signing capability.
    #[error("account `{0}` requires a signer")]
    MissingSigner(String),
}

/// Errors from the remote transport.
///
/// `Rejected` and `Unreachable` are candidates for caller-driven retry or
/// backoff; the client itself never retries.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The remote program rejected the call. The reason string comes from
    /// the program and is surfaced verbatim.
    #[error("rejected by program: {0}")]
    Rejected(String),

    /// The RPC endpoint could not be reached or the request never made it
    /// to the program.
    #[error("rpc unreachable: {0}")]
    Unreachable(String),

    /// No account exists at the requested address.
    #[error("account not found: {0}")]
    NotFound(Pubkey),
}

/// Errors from decoding fetched account bytes through a layout.
#[derive(Error, Debug)]
pub enum DecodingError {
    /// The stored bytes do not match the declared layout.
    #[error("account data does not match layout `{layout}`: {reason}")]
    LayoutMismatch { layout: String, reason: String },
}

/// Fetched state contradicts the sale-state machine: both an active listing
/// and a completed sale were observed at once, or neither. Reported to the
/// caller, never silently reconciled.
#[derive(Error, Debug)]
#[error("inconsistent sale state for {account}: {details}")]
pub struct ConsistencyError {
    pub account: Pubkey,
    pub details: String,
}

/// Umbrella error for the client's public operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decoding(#[from] DecodingError),

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

/// Result type alias for the marketplace client.
pub type ClientResult<T> = Result<T, ClientError>;
