mod common;

use {
  common::{provider_with, wallet_on, ALICE, BOB, CONTRACT},
  crowdfund_gateway::{
    campaigns,
    campaigns_or_empty,
    create_campaign,
    dev::Approval,
    AddressCache,
    ConnectionState,
    Error,
    MemoryAddressCache,
    Provider,
    Wallet,
  },
  std::{sync::Arc, time::Duration},
  tokio::time::timeout,
};

async fn await_session_change(
  rx: &mut tokio::sync::watch::Receiver<crowdfund_gateway::Session>,
) -> anyhow::Result<()> {
  timeout(Duration::from_secs(1), rx.changed()).await??;
  Ok(())
}

#[tokio::test]
async fn initialize_requires_a_provider() {
  let result = Wallet::initialize(
    None,
    CONTRACT,
    Arc::new(MemoryAddressCache::default()),
  )
  .await;
  assert!(matches!(result, Err(Error::ProviderUnavailable)));
}

#[tokio::test]
async fn initialize_connects_and_caches_the_address() -> anyhow::Result<()> {
  let provider = provider_with(vec![ALICE]);
  let cache = Arc::new(MemoryAddressCache::default());

  let wallet = Wallet::initialize(
    Some(provider.clone() as Arc<dyn Provider>),
    CONTRACT,
    cache.clone(),
  )
  .await?;

  let session = wallet.session();
  assert!(session.is_connected());
  assert_eq!(session.address(), Some(ALICE));
  assert_eq!(cache.load(), Some(ALICE));
  Ok(())
}

#[tokio::test]
async fn rejected_initialize_degrades_to_read_restricted()
-> anyhow::Result<()> {
  let provider = provider_with(vec![ALICE]);

  // put one campaign on the ledger while the user still approves
  let writer = wallet_on(&provider).await?;
  create_campaign(
    &writer,
    &writer.session(),
    &common::draft("Seed", "1", "2099-01-01"),
  )
  .await?;

  provider.set_approval(Approval::Reject);
  let wallet = wallet_on(&provider).await?;

  let session = wallet.session();
  assert_eq!(session.state(), ConnectionState::Error);
  assert!(!session.is_connected());

  // reads keep working without a connected session
  assert_eq!(campaigns(&wallet).await?.len(), 1);
  Ok(())
}

#[tokio::test]
async fn connect_is_idempotent_when_already_connected() -> anyhow::Result<()> {
  let provider = provider_with(vec![ALICE]);
  let wallet = wallet_on(&provider).await?;

  // no re-prompt happens, so even a now-rejecting user stays connected
  provider.set_approval(Approval::Reject);
  assert_eq!(wallet.connect().await?, ALICE);
  Ok(())
}

#[tokio::test]
async fn declined_connect_is_a_rejection() -> anyhow::Result<()> {
  let provider = provider_with(vec![ALICE]);
  provider.set_approval(Approval::Reject);

  let wallet = wallet_on(&provider).await?;
  assert!(matches!(
    wallet.connect().await,
    Err(Error::ConnectionRejected)
  ));
  assert_eq!(wallet.session().state(), ConnectionState::Error);

  // the user changes their mind and re-clicks
  provider.set_approval(Approval::Approve);
  assert_eq!(wallet.connect().await?, ALICE);
  Ok(())
}

#[tokio::test]
async fn disconnect_resets_session_and_cache() -> anyhow::Result<()> {
  let provider = provider_with(vec![ALICE]);
  let cache = Arc::new(MemoryAddressCache::default());
  let wallet = Wallet::initialize(
    Some(provider.clone() as Arc<dyn Provider>),
    CONTRACT,
    cache.clone(),
  )
  .await?;

  wallet.disconnect();
  assert_eq!(wallet.session().state(), ConnectionState::Uninitialized);
  assert_eq!(wallet.session().address(), None);
  assert_eq!(cache.load(), None);
  Ok(())
}

#[tokio::test]
async fn account_change_adopts_the_new_address() -> anyhow::Result<()> {
  let provider = provider_with(vec![ALICE]);
  let wallet = wallet_on(&provider).await?;
  let mut rx = wallet.subscribe();

  provider.emit_accounts_changed(vec![BOB]);
  await_session_change(&mut rx).await?;

  let session = wallet.session();
  assert!(session.is_connected());
  assert_eq!(session.address(), Some(BOB));
  Ok(())
}

#[tokio::test]
async fn empty_account_list_disconnects() -> anyhow::Result<()> {
  let provider = provider_with(vec![ALICE]);
  let wallet = wallet_on(&provider).await?;
  let mut rx = wallet.subscribe();

  provider.emit_accounts_changed(vec![]);
  await_session_change(&mut rx).await?;

  let session = wallet.session();
  assert_eq!(session.state(), ConnectionState::Uninitialized);
  assert_eq!(session.address(), None);
  Ok(())
}

#[tokio::test]
async fn chain_change_invalidates_the_binding() -> anyhow::Result<()> {
  let provider = provider_with(vec![ALICE]);
  let wallet = wallet_on(&provider).await?;
  let mut rx = wallet.subscribe();

  provider.emit_chain_changed(5);
  await_session_change(&mut rx).await?;

  assert!(matches!(
    campaigns(&wallet).await,
    Err(Error::ContractUninitialized)
  ));
  assert!(campaigns_or_empty(&wallet).await.is_empty());
  assert_eq!(wallet.session().state(), ConnectionState::Uninitialized);

  // a fresh initialization gets a valid binding again
  let wallet = wallet_on(&provider).await?;
  assert!(campaigns(&wallet).await.is_ok());
  Ok(())
}
