use {
  crate::{
    error::Error,
    provider,
    provider::Receipt,
    session::Session,
    validate::{validate_draft, CampaignDraft},
    wallet::Wallet,
  },
  crowdfund_primitives::{Address, Amount, Campaign},
  tracing::{info, warn},
};

/// Creates a new fundraising campaign owned by the connected address.
///
/// Validation runs before anything is sent anywhere; a draft that fails
/// a client-side check never produces a contract call. Returns once the
/// contract confirmed the transaction. Nothing is retried here, a
/// failed creation is surfaced to the user who may re-submit.
pub async fn create_campaign(
  wallet: &Wallet,
  session: &Session,
  draft: &CampaignDraft,
) -> Result<Receipt, Error> {
  let validated = validate_draft(draft)?;
  let from = connected_address(session)?;
  let contract = wallet.contract()?;

  let receipt = contract.create_campaign(from, validated).await?;
  confirmed(receipt)?;
  info!("campaign created in {}", receipt.tx_hash);
  Ok(receipt)
}

/// Typed listing read: every campaign currently recorded on the
/// contract, in the order the contract returns them.
pub async fn campaigns(wallet: &Wallet) -> Result<Vec<Campaign>, Error> {
  wallet.contract()?.get_campaigns().await
}

/// Fail-soft listing read: a failed fetch renders as an empty listing
/// instead of an error, so a transient read problem never takes down
/// the listing view. The failure is logged, not swallowed silently.
pub async fn campaigns_or_empty(wallet: &Wallet) -> Vec<Campaign> {
  match campaigns(wallet).await {
    Ok(list) => list,
    Err(e) => {
      warn!("failed to load campaigns: {e}");
      vec![]
    }
  }
}

/// Donates `amount` of native currency to the campaign with the given
/// id.
///
/// Requires an active session and a positive amount. On success the
/// receipt describes a confirmed transaction; callers refresh the
/// listing by re-reading [`campaigns`] afterwards and must never update
/// cached campaign data optimistically.
pub async fn donate(
  wallet: &Wallet,
  session: &Session,
  id: u64,
  amount: Amount,
) -> Result<Receipt, Error> {
  if amount.is_zero() {
    return Err(crate::validate::ValidationError::ZeroDonation.into());
  }
  let from = connected_address(session)?;
  let contract = wallet.contract()?;

  let receipt = contract.donate(from, id, amount).await?;
  confirmed(receipt)?;
  info!("donated {amount} to campaign {id} in {}", receipt.tx_hash);
  Ok(receipt)
}

fn connected_address(session: &Session) -> Result<Address, Error> {
  if !session.is_connected() {
    return Err(Error::NotConnected);
  }
  session.address().ok_or(Error::NotConnected)
}

/// A receipt with a false status flag means the transaction was
/// included but its execution failed; treat it exactly like a revert.
fn confirmed(receipt: Receipt) -> Result<(), Error> {
  if !receipt.status {
    return Err(Error::TransactionFailed(provider::Error::Reverted(
      format!("transaction {} included with failed status", receipt.tx_hash),
    )));
  }
  Ok(())
}
