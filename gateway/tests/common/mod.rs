use {
  crowdfund_gateway::{
    dev::DevProvider,
    CampaignDraft,
    MemoryAddressCache,
    Provider,
    Wallet,
  },
  crowdfund_primitives::Address,
  std::sync::Arc,
};

pub const CONTRACT: Address = Address::new([0xcf; 20]);
pub const ALICE: Address = Address::new([0xa1; 20]);
pub const BOB: Address = Address::new([0xb0; 20]);

/// A dev provider with a pinned clock so date-based assertions are
/// deterministic. The pinned instant is 2023-11-14, well before the
/// 2099 deadlines the test drafts use.
pub fn provider_with(accounts: Vec<Address>) -> Arc<DevProvider> {
  let provider = DevProvider::new(accounts);
  provider.set_clock(1_700_000_000);
  Arc::new(provider)
}

pub async fn wallet_on(
  provider: &Arc<DevProvider>,
) -> anyhow::Result<Wallet> {
  Ok(
    Wallet::initialize(
      Some(provider.clone() as Arc<dyn Provider>),
      CONTRACT,
      Arc::new(MemoryAddressCache::default()),
    )
    .await?,
  )
}

pub fn draft(title: &str, target_eth: &str, deadline: &str) -> CampaignDraft {
  CampaignDraft {
    title: title.into(),
    description: format!("{title} description"),
    target: target_eth.into(),
    deadline: deadline.into(),
    image: "https://example.com/cover.png".into(),
  }
}
