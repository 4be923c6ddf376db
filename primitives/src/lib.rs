mod address;
mod amount;
mod campaign;

pub use {
  address::{Address, Error as AddressError},
  amount::{Amount, Error as AmountError, WEI_PER_ETH},
  campaign::{Campaign, TxHash},
};
