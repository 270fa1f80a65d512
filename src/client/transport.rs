//! Remote transport seam
//!
//! The client shapes requests and parses responses; moving bytes to and
//! from the cluster is delegated to a [`Transport`]. The production
//! implementation wraps the non-blocking Solana RPC client. Tests
//! substitute their own.

use async_trait::async_trait;
use solana_account::Account;
use solana_client::client_error::{ClientError as RpcError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_hash::Hash;
use solana_keypair::Keypair;
use solana_message::Message;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use solana_transaction::Transaction;

use crate::errors::TransportError;
use crate::request::CallDescriptor;

/// Moves one call descriptor (plus signatures) to the remote program and
/// raw account bytes back.
///
/// Implementations do not retry and do not cache: retries are a caller
/// policy decision, and every fetch reflects remote state at call time.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Submit a call and await confirmation.
    async fn submit(
        &self,
        call: &CallDescriptor,
        signers: &[&Keypair],
    ) -> Result<Signature, TransportError>;

    /// Fetch the raw bytes stored at `address`.
    async fn fetch_raw(&self, address: &Pubkey) -> Result<Vec<u8>, TransportError>;
}

/// Transport over a Solana RPC endpoint.
pub struct RpcTransport {
    rpc_client: RpcClient,
}

impl RpcTransport {
    /// Create a transport for the given RPC URL.
    pub fn new(rpc_url: &str) -> Self {
        Self {
            rpc_client: RpcClient::new(rpc_url.to_string()),
        }
    }
}

/// Split RPC failures into program rejections and transport failures.
/// Rejection reasons pass through verbatim.
fn classify_submit_error(error: RpcError) -> TransportError {
    let message = error.to_string();
    match error.kind() {
        ClientErrorKind::TransactionError(tx_error) => {
            TransportError::Rejected(tx_error.to_string())
        }
        ClientErrorKind::RpcError(_)
            if message.contains("custom program error")
                || message.contains("Transaction simulation failed") =>
        {
            TransportError::Rejected(message)
        }
        _ => TransportError::Unreachable(message),
    }
}

#[async_trait]
impl Transport for RpcTransport {
    async fn submit(
        &self,
        call: &CallDescriptor,
        signers: &[&Keypair],
    ) -> Result<Signature, TransportError> {
        let payer = call
            .signers
            .first()
            .copied()
            .ok_or_else(|| TransportError::Rejected("call declares no signer".to_string()))?;

        let blockhash: Hash = self
            .rpc_client
            .get_latest_blockhash()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        let message = Message::new(&[call.to_instruction()], Some(&payer));
        let mut transaction = Transaction::new_unsigned(message);
        {
            let signing: Vec<&dyn Signer> = signers.iter().map(|k| *k as &dyn Signer).collect();
            transaction
                .try_sign(&signing, blockhash)
                .map_err(|e| TransportError::Rejected(format!("signing failed: {}", e)))?;
        }

        log::debug!(
            "Submitting `{}` to program {}",
            call.instruction,
            call.program_id
        );
        self.rpc_client
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(classify_submit_error)
    }

    async fn fetch_raw(&self, address: &Pubkey) -> Result<Vec<u8>, TransportError> {
        match self.rpc_client.get_account(address).await {
            Ok(Account { data, .. }) => Ok(data),
            // A missing account comes back as an RPC error whose message
            // carries this marker.
            Err(e) if e.to_string().contains("AccountNotFound") => {
                Err(TransportError::NotFound(*address))
            }
            Err(e) => Err(TransportError::Unreachable(e.to_string())),
        }
    }
}
