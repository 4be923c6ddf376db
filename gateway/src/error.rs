use {crate::provider, crate::validate::ValidationError, thiserror::Error};

/// Everything that can go wrong at the operations boundary.
///
/// Provider and contract faults are converted into these kinds before
/// they reach the view layer; raw provider errors never propagate past
/// this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("no wallet provider found, install a wallet extension")]
  ProviderUnavailable,

  #[error("wallet connection was rejected")]
  ConnectionRejected,

  #[error("wallet initialization failed: {0}")]
  InitializationFailed(provider::Error),

  #[error("no wallet is connected")]
  NotConnected,

  #[error("contract binding is not initialized, reconnect and retry")]
  ContractUninitialized,

  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("transaction failed: {0}")]
  TransactionFailed(provider::Error),

  #[error("read call failed: {0}")]
  FetchFailed(String),
}
