use {
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
  },
  thiserror::Error,
};

#[derive(Debug, Error, PartialEq)]
pub enum Error {
  #[error("address must start with the 0x prefix")]
  MissingPrefix,

  #[error("address must encode exactly 20 bytes, got {0} hex digits")]
  InvalidLength(usize),

  #[error("invalid hex encoding: {0}")]
  InvalidHex(#[from] hex::FromHexError),
}

/// Represents the address of an account on the target chain.
///
/// The same address type is used for externally owned wallet accounts
/// (the connected user) and for the deployed crowdfunding contract. The
/// canonical byte form makes ownership comparisons exact regardless of
/// the letter casing a wallet reported the address with.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Address([u8; 20]);

impl Address {
  pub const fn new(bytes: [u8; 20]) -> Self {
    Self(bytes)
  }
}

impl AsRef<[u8]> for Address {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Deref for Address {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "0x{}", hex::encode(self.0))
  }
}

impl Debug for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "address(0x{})", hex::encode(self.0))
  }
}

impl From<Address> for String {
  fn from(addr: Address) -> Self {
    addr.to_string()
  }
}

impl From<[u8; 20]> for Address {
  fn from(bytes: [u8; 20]) -> Self {
    Self(bytes)
  }
}

impl FromStr for Address {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let digits = s
      .strip_prefix("0x")
      .or_else(|| s.strip_prefix("0X"))
      .ok_or(Error::MissingPrefix)?;

    if digits.len() != 40 {
      return Err(Error::InvalidLength(digits.len()));
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes)?;
    Ok(Self(bytes))
  }
}

impl TryFrom<&str> for Address {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    FromStr::from_str(value)
  }
}

#[cfg(test)]
mod tests {
  use {super::*, std::str::FromStr};

  #[test]
  fn parse_roundtrip() -> anyhow::Result<()> {
    let text = "0x7efc444fd01c32902e5ec3288a5d5de0ccf7b154";
    let addr = Address::from_str(text)?;
    assert_eq!(addr.to_string(), text);
    Ok(())
  }

  #[test]
  fn parse_is_case_insensitive() -> anyhow::Result<()> {
    let lower =
      Address::from_str("0x7efc444fd01c32902e5ec3288a5d5de0ccf7b154")?;
    let upper =
      Address::from_str("0x7EfC444Fd01c32902e5ec3288a5d5DE0ccF7B154")?;
    assert_eq!(lower, upper);
    Ok(())
  }

  #[test]
  fn rejects_malformed_input() {
    assert_eq!(
      Address::from_str("7efc444fd01c32902e5ec3288a5d5de0ccf7b154"),
      Err(Error::MissingPrefix)
    );
    assert_eq!(Address::from_str("0x1234"), Err(Error::InvalidLength(4)));
    assert!(matches!(
      Address::from_str("0xzzfc444fd01c32902e5ec3288a5d5de0ccf7b154"),
      Err(Error::InvalidHex(_))
    ));
  }
}
