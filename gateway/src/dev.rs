//! In-memory wallet provider and contract ledger.
//!
//! Backs the integration tests and the demo client: same `Provider`
//! surface the real injected wallet has, with scripted approval, an
//! adjustable clock and direct event injection. The ledger mirrors the
//! deployed contract's semantics so flows exercised here behave the
//! way they would on chain.

use {
  crate::provider::{
    CallRequest,
    Error,
    MutationCall,
    Provider,
    ProviderEvent,
    Receipt,
    TransactionRequest,
  },
  async_trait::async_trait,
  crowdfund_primitives::{Address, Amount, Campaign, TxHash},
  futures::stream::BoxStream,
  multihash_codetable::Sha3_256,
  multihash_derive::Hasher,
  parking_lot::Mutex,
  std::{
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
  },
  tokio::sync::mpsc,
};

/// Scripted behavior of the fake wallet user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approval {
  /// Approve account requests and sign every transaction.
  Approve,
  /// Decline account requests and refuse to sign.
  Reject,
}

#[derive(Default)]
struct Ledger {
  campaigns: Vec<Campaign>,
}

impl Ledger {
  fn create_campaign(
    &mut self,
    now: u64,
    owner: Address,
    title: String,
    description: String,
    target: Amount,
    deadline: u64,
    image: String,
  ) -> Result<(), String> {
    // same rule the deployed contract enforces
    if deadline <= now {
      return Err("the deadline should be a date in the future".into());
    }
    self.campaigns.push(Campaign {
      id: self.campaigns.len() as u64,
      owner,
      title,
      description,
      target,
      raised: Amount::ZERO,
      deadline,
      donations: 0,
      image,
    });
    Ok(())
  }

  fn donate(&mut self, id: u64, value: Amount) -> Result<(), String> {
    if value.is_zero() {
      return Err("donation value must be non-zero".into());
    }
    let campaign = self
      .campaigns
      .get_mut(id as usize)
      .ok_or_else(|| format!("unknown campaign id {id}"))?;
    campaign.raised = campaign
      .raised
      .checked_add(value)
      .ok_or_else(|| "raised amount overflow".to_string())?;
    campaign.donations += 1;
    Ok(())
  }
}

pub struct DevProvider {
  accounts: Mutex<Vec<Address>>,
  approval: Mutex<Approval>,
  ledger: Mutex<Ledger>,
  clock: AtomicU64,
  fail_reads: AtomicBool,
  subscribers: Mutex<Vec<mpsc::UnboundedSender<ProviderEvent>>>,
}

impl DevProvider {
  pub fn new(accounts: Vec<Address>) -> Self {
    let now = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map(|d| d.as_secs())
      .unwrap_or_default();

    Self {
      accounts: Mutex::new(accounts),
      approval: Mutex::new(Approval::Approve),
      ledger: Mutex::new(Ledger::default()),
      clock: AtomicU64::new(now),
      fail_reads: AtomicBool::new(false),
      subscribers: Mutex::new(Vec::new()),
    }
  }

  pub fn set_approval(&self, approval: Approval) {
    *self.approval.lock() = approval;
  }

  /// Current ledger time in unix seconds.
  pub fn now(&self) -> u64 {
    self.clock.load(Ordering::SeqCst)
  }

  pub fn set_clock(&self, unix_seconds: u64) {
    self.clock.store(unix_seconds, Ordering::SeqCst);
  }

  pub fn advance_clock(&self, seconds: u64) {
    self.clock.fetch_add(seconds, Ordering::SeqCst);
  }

  /// Makes every read-only call fail, to exercise fail-soft reads.
  pub fn fail_reads(&self, fail: bool) {
    self.fail_reads.store(fail, Ordering::SeqCst);
  }

  /// Number of campaigns recorded on the ledger, for test assertions
  /// that a rejected input never produced a contract call.
  pub fn campaign_count(&self) -> usize {
    self.ledger.lock().campaigns.len()
  }

  pub fn emit_accounts_changed(&self, accounts: Vec<Address>) {
    self.emit(ProviderEvent::AccountsChanged(accounts));
  }

  pub fn emit_chain_changed(&self, chain_id: u64) {
    self.emit(ProviderEvent::ChainChanged(chain_id));
  }

  fn emit(&self, event: ProviderEvent) {
    self
      .subscribers
      .lock()
      .retain(|sub| sub.send(event.clone()).is_ok());
  }

  fn approved(&self) -> bool {
    *self.approval.lock() == Approval::Approve
  }
}

#[async_trait]
impl Provider for DevProvider {
  async fn request_accounts(&self) -> Result<Vec<Address>, Error> {
    if !self.approved() {
      return Err(Error::Rejected);
    }
    Ok(self.accounts.lock().clone())
  }

  async fn call(&self, request: CallRequest) -> Result<Vec<u8>, Error> {
    if self.fail_reads.load(Ordering::SeqCst) {
      return Err(Error::Transport("simulated read outage".into()));
    }
    match request {
      CallRequest::GetCampaigns { .. } => {
        rmp_serde::to_vec(&self.ledger.lock().campaigns)
          .map_err(|e| Error::Transport(e.to_string()))
      }
    }
  }

  async fn send_transaction(
    &self,
    request: TransactionRequest,
  ) -> Result<Receipt, Error> {
    if !self.approved() {
      return Err(Error::Rejected);
    }

    let tx_hash = hash_of(&request)?;
    let result = match request.call {
      MutationCall::CreateCampaign {
        owner,
        title,
        description,
        target,
        deadline,
        image,
      } => self.ledger.lock().create_campaign(
        self.now(),
        owner,
        title,
        description,
        target,
        deadline,
        image,
      ),
      MutationCall::DonateToCampaign { id } => {
        self.ledger.lock().donate(id, request.value)
      }
    };

    match result {
      Ok(()) => Ok(Receipt {
        tx_hash,
        status: true,
      }),
      Err(reason) => Err(Error::Reverted(reason)),
    }
  }

  fn events(&self) -> BoxStream<'static, ProviderEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    self.subscribers.lock().push(tx);
    Box::pin(futures::stream::unfold(rx, |mut rx| async move {
      rx.recv().await.map(|event| (event, rx))
    }))
  }
}

fn hash_of(request: &TransactionRequest) -> Result<TxHash, Error> {
  let bytes =
    rmp_serde::to_vec(request).map_err(|e| Error::Transport(e.to_string()))?;
  let mut hasher = Sha3_256::default();
  hasher.update(&bytes);
  Ok(TxHash::new(
    hasher
      .finalize()
      .try_into()
      .expect("sha3-256 digest is 32 bytes"),
  ))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ledger_enforces_contract_rules() {
    let mut ledger = Ledger::default();
    let owner = Address::new([1u8; 20]);

    assert!(ledger
      .create_campaign(
        100,
        owner,
        "t".into(),
        "d".into(),
        Amount::from_eth(1),
        99,
        "https://example.com/i.png".into(),
      )
      .is_err());

    ledger
      .create_campaign(
        100,
        owner,
        "t".into(),
        "d".into(),
        Amount::from_eth(1),
        101,
        "https://example.com/i.png".into(),
      )
      .unwrap();

    assert!(ledger.donate(0, Amount::ZERO).is_err());
    assert!(ledger.donate(7, Amount::from_eth(1)).is_err());

    ledger.donate(0, Amount::from_eth(1)).unwrap();
    assert_eq!(ledger.campaigns[0].raised, Amount::from_eth(1));
    assert_eq!(ledger.campaigns[0].donations, 1);
  }
}
