use {
  async_trait::async_trait,
  crowdfund_primitives::{Address, Amount, TxHash},
  futures::stream::BoxStream,
  serde::{Deserialize, Serialize},
  thiserror::Error,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("no wallet provider is injected into this environment")]
  Unavailable,

  #[error("the user rejected the request")]
  Rejected,

  #[error("execution reverted: {0}")]
  Reverted(String),

  #[error("timed out waiting for the provider")]
  Timeout,

  #[error("transport failure: {0}")]
  Transport(String),
}

/// Read-only contract call, answered with an encoded response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CallRequest {
  GetCampaigns { contract: Address },
}

/// Arguments of a state-changing contract method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MutationCall {
  CreateCampaign {
    owner: Address,
    title: String,
    description: String,
    target: Amount,
    deadline: u64,
    image: String,
  },
  DonateToCampaign {
    id: u64,
  },
}

/// State-changing contract call, signed by `from` and submitted to the
/// chain as a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
  pub contract: Address,
  pub from: Address,
  /// Native value attached to the call. Non-zero only for donations.
  pub value: Amount,
  pub call: MutationCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
  pub tx_hash: TxHash,
  /// False when the transaction was included in a block but its
  /// execution failed.
  pub status: bool,
}

/// Asynchronous wallet-side triggers the gateway reacts to outside of
/// direct calls. These two are the only ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
  AccountsChanged(Vec<Address>),
  ChainChanged(u64),
}

/// Capability handle to the injected wallet/signing agent.
///
/// The gateway never talks to the chain directly; everything flows
/// through this seam, which keeps the whole client testable against an
/// in-memory implementation (see [`crate::dev::DevProvider`]).
#[async_trait]
pub trait Provider: Send + Sync {
  /// Prompts the wallet for account access and returns the accounts the
  /// user exposed, the first one being the active account.
  async fn request_accounts(&self) -> Result<Vec<Address>, Error>;

  /// Issues a read-only call and returns the encoded response payload.
  async fn call(&self, request: CallRequest) -> Result<Vec<u8>, Error>;

  /// Submits a signed state-changing transaction and waits for its
  /// receipt. There is no cancellation once this has been invoked.
  async fn send_transaction(
    &self,
    request: TransactionRequest,
  ) -> Result<Receipt, Error>;

  /// Stream of asynchronous wallet-side events. Every call returns an
  /// independent subscription.
  fn events(&self) -> BoxStream<'static, ProviderEvent>;
}
