use {
  crate::{Address, Amount},
  serde::{Deserialize, Serialize},
  std::fmt::{Debug, Display},
};

/// Hash identifying a submitted transaction, as reported by the wallet
/// provider in a receipt.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TxHash([u8; 32]);

impl TxHash {
  pub const fn new(bytes: [u8; 32]) -> Self {
    Self(bytes)
  }
}

impl AsRef<[u8]> for TxHash {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Display for TxHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "0x{}", hex::encode(self.0))
  }
}

impl Debug for TxHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "tx(0x{})", hex::encode(self.0))
  }
}

/// Read-only projection of one fundraising campaign as recorded on the
/// external ledger.
///
/// Instances only ever describe confirmed on-chain state; `raised` and
/// `donations` are monotonically non-decreasing for a given `id` across
/// consecutive snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
  /// Position of the campaign in the contract's storage, assigned at
  /// creation and stable forever after.
  pub id: u64,
  pub owner: Address,
  pub title: String,
  pub description: String,
  /// Fundraising goal in base units.
  pub target: Amount,
  /// Total confirmed donations in base units.
  pub raised: Amount,
  /// Unix seconds after which the campaign no longer accepts donations
  /// in the UI.
  pub deadline: u64,
  /// Number of confirmed donations.
  pub donations: u64,
  /// Cover image URL, display-only.
  pub image: String,
}

impl Campaign {
  /// A campaign is closed once it reached its target or its deadline
  /// passed, whichever comes first.
  pub fn is_closed(&self, now_unix: u64) -> bool {
    self.raised >= self.target || now_unix > self.deadline
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn campaign(target: Amount, raised: Amount, deadline: u64) -> Campaign {
    Campaign {
      id: 0,
      owner: Address::new([1u8; 20]),
      title: "clean water".into(),
      description: "wells for the village".into(),
      target,
      raised,
      deadline,
      donations: 0,
      image: "https://example.com/well.png".into(),
    }
  }

  #[test]
  fn closed_iff_funded_or_past_deadline() {
    let open = campaign(Amount::from_eth(10), Amount::from_eth(3), 1000);
    assert!(!open.is_closed(999));
    assert!(!open.is_closed(1000)); // deadline second itself is still open
    assert!(open.is_closed(1001));

    let funded = campaign(Amount::from_eth(10), Amount::from_eth(10), 1000);
    assert!(funded.is_closed(0));

    let overfunded = campaign(Amount::from_eth(10), Amount::from_eth(11), 1000);
    assert!(overfunded.is_closed(0));
  }

  #[test]
  fn closed_is_monotonic_across_snapshots() {
    let earlier = campaign(Amount::from_eth(10), Amount::from_eth(10), 1000);
    assert!(earlier.is_closed(500));

    // a later snapshot may only grow `raised` and keep the deadline
    let later = campaign(
      Amount::from_eth(10),
      Amount::from_eth(12),
      earlier.deadline,
    );
    assert!(later.is_closed(500));
    assert!(later.is_closed(2000));
  }
}
