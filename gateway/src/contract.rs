use {
  crate::{
    error::Error,
    provider::{
      CallRequest,
      MutationCall,
      Provider,
      Receipt,
      TransactionRequest,
    },
    validate::ValidatedDraft,
  },
  crowdfund_primitives::{Address, Amount, Campaign},
  rmp_serde::from_slice,
  std::sync::Arc,
  tracing::debug,
};

/// Live binding to the crowdfunding contract at its fixed address.
///
/// Marshals typed arguments into provider requests and decodes the
/// responses. Handed out by [`crate::Wallet::contract`], which refuses
/// to produce a binding once a chain change invalidated it.
pub struct Contract {
  provider: Arc<dyn Provider>,
  address: Address,
}

impl Contract {
  pub(crate) fn new(provider: Arc<dyn Provider>, address: Address) -> Self {
    Self { provider, address }
  }

  pub fn address(&self) -> Address {
    self.address
  }

  /// Read-only `getCampaigns` call. Campaigns come back in the order
  /// the contract stores them, creation order.
  ///
  /// A record that cannot be decoded fails the whole read; an
  /// ownerless or otherwise malformed campaign never reaches callers.
  pub async fn get_campaigns(&self) -> Result<Vec<Campaign>, Error> {
    let bytes = self
      .provider
      .call(CallRequest::GetCampaigns {
        contract: self.address,
      })
      .await
      .map_err(|e| Error::FetchFailed(e.to_string()))?;

    from_slice(&bytes)
      .map_err(|e| Error::FetchFailed(format!("malformed campaign list: {e}")))
  }

  /// Submits the state-changing `createCampaign` call signed by `from`
  /// and waits for its receipt.
  pub async fn create_campaign(
    &self,
    from: Address,
    draft: ValidatedDraft,
  ) -> Result<Receipt, Error> {
    debug!("submitting createCampaign titled {:?}", draft.title);
    self
      .provider
      .send_transaction(TransactionRequest {
        contract: self.address,
        from,
        value: Amount::ZERO,
        call: MutationCall::CreateCampaign {
          owner: from,
          title: draft.title,
          description: draft.description,
          target: draft.target,
          deadline: draft.deadline,
          image: draft.image,
        },
      })
      .await
      .map_err(Error::TransactionFailed)
  }

  /// Submits the value-bearing `donateToCampaign` call and waits for
  /// its receipt.
  pub async fn donate(
    &self,
    from: Address,
    id: u64,
    value: Amount,
  ) -> Result<Receipt, Error> {
    debug!("submitting donation of {value} to campaign {id}");
    self
      .provider
      .send_transaction(TransactionRequest {
        contract: self.address,
        from,
        value,
        call: MutationCall::DonateToCampaign { id },
      })
      .await
      .map_err(Error::TransactionFailed)
  }
}
