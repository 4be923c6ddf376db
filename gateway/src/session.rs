use crowdfund_primitives::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
  Uninitialized,
  Connecting,
  Connected,
  Error,
}

/// Immutable snapshot of the wallet connection at one point in time.
///
/// Operations receive a snapshot explicitly instead of reading ambient
/// global state; the live value is held by [`crate::Wallet`] in a watch
/// channel and a fresh snapshot is taken per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
  address: Option<Address>,
  state: ConnectionState,
}

impl Session {
  pub(crate) fn uninitialized() -> Self {
    Self {
      address: None,
      state: ConnectionState::Uninitialized,
    }
  }

  /// Connection attempt in flight. The optional address is the cached
  /// last-known one, a display hint only, never trusted for signing.
  pub(crate) fn connecting(hint: Option<Address>) -> Self {
    Self {
      address: hint,
      state: ConnectionState::Connecting,
    }
  }

  pub(crate) fn connected(address: Address) -> Self {
    Self {
      address: Some(address),
      state: ConnectionState::Connected,
    }
  }

  pub(crate) fn failed() -> Self {
    Self {
      address: None,
      state: ConnectionState::Error,
    }
  }

  pub fn address(&self) -> Option<Address> {
    self.address
  }

  pub fn state(&self) -> ConnectionState {
    self.state
  }

  pub fn is_connected(&self) -> bool {
    self.state == ConnectionState::Connected && self.address.is_some()
  }
}

impl Default for Session {
  fn default() -> Self {
    Self::uninitialized()
  }
}
