use {clap::Parser, crowdfund_primitives::Address, std::path::PathBuf};

/// Crowdfunding demo client
///
/// Drives the full campaign lifecycle against a local in-memory wallet
/// provider: connect, create campaigns, browse, search and donate.
#[derive(Debug, Parser)]
pub struct SystemSettings {
  /// Address of the deployed crowdfunding contract
  #[clap(long,
    value_name = "ADDRESS",
    default_value = "0x7efc444fd01c32902e5ec3288a5d5de0ccf7b154")]
  contract: Address,

  /// Wallet account the dev provider exposes
  #[clap(long,
    value_name = "ADDRESS",
    default_value = "0xa11ce00000000000000000000000000000000001")]
  account: Address,

  /// File the last-known wallet address is cached in
  #[clap(long, value_name = "PATH")]
  cache_file: Option<PathBuf>,

  /// Title substring to search the listing for
  #[clap(long, default_value = "water", value_name = "QUERY")]
  search: String,

  /// Number of scripted donations
  #[clap(long, short = 'n', default_value = "6", value_name = "COUNT")]
  donations: usize,
}

impl SystemSettings {
  pub fn contract(&self) -> Address {
    self.contract
  }

  pub fn account(&self) -> Address {
    self.account
  }

  pub fn cache_file(&self) -> PathBuf {
    self
      .cache_file
      .clone()
      .unwrap_or_else(|| std::env::temp_dir().join("crowdfund-client.address"))
  }

  pub fn search(&self) -> &str {
    &self.search
  }

  pub fn donations(&self) -> usize {
    self.donations
  }
}
