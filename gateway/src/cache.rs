use {
  crowdfund_primitives::Address,
  parking_lot::Mutex,
  std::{fs, io::ErrorKind, path::PathBuf},
  tracing::debug,
};

/// One string of local persisted state: the last-known wallet address.
///
/// The cache is a startup convenience only. The provider's live account
/// list always wins, so every implementation is allowed to lose data
/// silently.
pub trait AddressCache: Send + Sync {
  fn load(&self) -> Option<Address>;
  fn store(&self, address: &Address);
  fn clear(&self);
}

/// Caches the address as a single line of text in a file.
pub struct FileAddressCache {
  path: PathBuf,
}

impl FileAddressCache {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl AddressCache for FileAddressCache {
  fn load(&self) -> Option<Address> {
    match fs::read_to_string(&self.path) {
      Ok(text) => match text.trim().parse() {
        Ok(address) => Some(address),
        Err(e) => {
          debug!("discarding unparseable cached address: {e}");
          None
        }
      },
      Err(e) if e.kind() == ErrorKind::NotFound => None,
      Err(e) => {
        debug!("failed to read cached address: {e}");
        None
      }
    }
  }

  fn store(&self, address: &Address) {
    if let Err(e) = fs::write(&self.path, format!("{address}\n")) {
      debug!("failed to persist wallet address: {e}");
    }
  }

  fn clear(&self) {
    if let Err(e) = fs::remove_file(&self.path) {
      if e.kind() != ErrorKind::NotFound {
        debug!("failed to clear cached address: {e}");
      }
    }
  }
}

/// Keeps the cached address in memory, for tests.
#[derive(Default)]
pub struct MemoryAddressCache(Mutex<Option<Address>>);

impl AddressCache for MemoryAddressCache {
  fn load(&self) -> Option<Address> {
    *self.0.lock()
  }

  fn store(&self, address: &Address) {
    *self.0.lock() = Some(*address);
  }

  fn clear(&self) {
    *self.0.lock() = None;
  }
}
