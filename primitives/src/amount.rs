use {
  serde::{Deserialize, Deserializer, Serialize, Serializer},
  std::fmt::{Debug, Display},
  thiserror::Error,
};

/// Number of base units (wei) in one whole unit of the native currency.
pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

const ETH_DECIMALS: usize = 18;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("amount string is empty")]
  Empty,

  #[error("amount contains a non-decimal character: {0:?}")]
  InvalidDigit(char),

  #[error("amount has more than {ETH_DECIMALS} fractional digits")]
  TooManyDecimals,

  #[error("amount does not fit in the base unit range")]
  Overflow,
}

/// A quantity of the chain's native currency in its smallest integer
/// denomination (wei).
///
/// All arithmetic happens on this integer form. Decimal ETH strings typed
/// by users are converted exactly or rejected, never rounded through
/// floating point.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Amount(u128);

impl Amount {
  pub const ZERO: Amount = Amount(0);

  pub const fn from_wei(wei: u128) -> Self {
    Self(wei)
  }

  /// A whole number of ETH, handy in tests and demo flows.
  pub const fn from_eth(eth: u64) -> Self {
    Self(eth as u128 * WEI_PER_ETH)
  }

  pub const fn wei(&self) -> u128 {
    self.0
  }

  pub const fn is_zero(&self) -> bool {
    self.0 == 0
  }

  pub fn checked_add(self, other: Amount) -> Option<Amount> {
    self.0.checked_add(other.0).map(Amount)
  }

  pub fn checked_sub(self, other: Amount) -> Option<Amount> {
    self.0.checked_sub(other.0).map(Amount)
  }

  /// Parses a decimal ETH string ("1", "0.5", ".25") into base units.
  ///
  /// The conversion is exact: inputs with more than 18 fractional digits
  /// are rejected rather than truncated.
  pub fn parse_eth(s: &str) -> Result<Self, Error> {
    let s = s.trim();
    if s.is_empty() || s == "." {
      return Err(Error::Empty);
    }

    let (whole, frac) = match s.split_once('.') {
      Some((whole, frac)) => (whole, frac),
      None => (s, ""),
    };

    if frac.contains('.') {
      return Err(Error::InvalidDigit('.'));
    }
    if frac.len() > ETH_DECIMALS {
      return Err(Error::TooManyDecimals);
    }

    let mut wei: u128 = 0;
    for c in whole.chars() {
      let digit = c.to_digit(10).ok_or(Error::InvalidDigit(c))? as u128;
      wei = wei
        .checked_mul(10)
        .and_then(|w| w.checked_add(digit))
        .ok_or(Error::Overflow)?;
    }
    wei = wei.checked_mul(WEI_PER_ETH).ok_or(Error::Overflow)?;

    let mut frac_wei: u128 = 0;
    for c in frac.chars() {
      let digit = c.to_digit(10).ok_or(Error::InvalidDigit(c))? as u128;
      frac_wei = frac_wei * 10 + digit;
    }
    frac_wei *= 10u128.pow((ETH_DECIMALS - frac.len()) as u32);

    wei.checked_add(frac_wei).map(Amount).ok_or(Error::Overflow)
  }

  /// Renders the amount as a decimal ETH string with trailing zeros
  /// trimmed, the inverse of [`Amount::parse_eth`].
  pub fn to_eth_string(&self) -> String {
    let whole = self.0 / WEI_PER_ETH;
    let frac = self.0 % WEI_PER_ETH;
    if frac == 0 {
      return whole.to_string();
    }
    let frac = format!("{frac:0>width$}", width = ETH_DECIMALS);
    format!("{whole}.{}", frac.trim_end_matches('0'))
  }
}

impl Display for Amount {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} ETH", self.to_eth_string())
  }
}

impl Debug for Amount {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} wei", self.0)
  }
}

// MessagePack has no 128-bit integers, so amounts travel as a pair of
// 64-bit halves on the wire.
impl Serialize for Amount {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    ((self.0 >> 64) as u64, self.0 as u64).serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for Amount {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let (hi, lo) = <(u64, u64)>::deserialize(deserializer)?;
    Ok(Amount(((hi as u128) << 64) | lo as u128))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_whole_eth_exactly() -> anyhow::Result<()> {
    assert_eq!(Amount::parse_eth("1")?, Amount::from_wei(WEI_PER_ETH));
    assert_eq!(Amount::parse_eth("0")?, Amount::ZERO);
    assert_eq!(
      Amount::parse_eth("42")?,
      Amount::from_wei(42 * WEI_PER_ETH)
    );
    Ok(())
  }

  #[test]
  fn parses_fractions_exactly() -> anyhow::Result<()> {
    assert_eq!(
      Amount::parse_eth("0.5")?,
      Amount::from_wei(500_000_000_000_000_000)
    );
    assert_eq!(Amount::parse_eth(".25")?.wei(), 250_000_000_000_000_000);
    assert_eq!(Amount::parse_eth("0.000000000000000001")?.wei(), 1);
    assert_eq!(
      Amount::parse_eth("1.5")?,
      Amount::from_wei(1_500_000_000_000_000_000)
    );
    Ok(())
  }

  #[test]
  fn rejects_garbage() {
    assert_eq!(Amount::parse_eth(""), Err(Error::Empty));
    assert_eq!(Amount::parse_eth("."), Err(Error::Empty));
    assert_eq!(Amount::parse_eth("abc"), Err(Error::InvalidDigit('a')));
    assert_eq!(Amount::parse_eth("1.2.3"), Err(Error::InvalidDigit('.')));
    assert_eq!(Amount::parse_eth("-1"), Err(Error::InvalidDigit('-')));
    assert_eq!(
      Amount::parse_eth("0.0000000000000000001"),
      Err(Error::TooManyDecimals)
    );
  }

  #[test]
  fn eth_string_roundtrip() -> anyhow::Result<()> {
    for text in ["1", "0.5", "12.000000000000000001", "0.000000000000000001"] {
      assert_eq!(Amount::parse_eth(text)?.to_eth_string(), text);
    }
    Ok(())
  }

  #[test]
  fn wire_codec_roundtrip() -> anyhow::Result<()> {
    let amount = Amount::from_wei(u128::MAX - 7);
    let bytes = rmp_serde::to_vec(&amount)?;
    assert_eq!(rmp_serde::from_slice::<Amount>(&bytes)?, amount);
    Ok(())
  }
}
