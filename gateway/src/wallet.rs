use {
  crate::{
    cache::AddressCache,
    contract::Contract,
    error::Error,
    provider,
    provider::{Provider, ProviderEvent},
    session::Session,
  },
  crowdfund_primitives::Address,
  futures::StreamExt,
  std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
  tokio::sync::watch,
  tracing::{info, warn},
};

/// The wallet/contract gateway: owns the connection to the injected
/// provider, the live session snapshot and the contract binding.
///
/// All durable state lives in the contract; this type only tracks which
/// address is connected and whether the binding is still valid. A chain
/// change invalidates the binding permanently, the caller re-runs
/// [`Wallet::initialize`] to get a fresh one (the moral equivalent of a
/// full page reload).
pub struct Wallet {
  provider: Arc<dyn Provider>,
  contract_address: Address,
  cache: Arc<dyn AddressCache>,
  session: Arc<watch::Sender<Session>>,
  stale: Arc<AtomicBool>,
}

impl Wallet {
  /// Binds to the injected wallet provider and requests account access.
  ///
  /// `provider` is whatever the host environment detected; `None` fails
  /// with [`Error::ProviderUnavailable`] so the view can tell the user
  /// to install a wallet extension. A declined or failed account
  /// request still yields a usable gateway in a read-restricted mode:
  /// the session is left in its error state and [`Wallet::connect`] can
  /// be retried while listing reads keep working.
  pub async fn initialize(
    provider: Option<Arc<dyn Provider>>,
    contract_address: Address,
    cache: Arc<dyn AddressCache>,
  ) -> Result<Self, Error> {
    let provider = provider.ok_or(Error::ProviderUnavailable)?;

    // the cached address is shown as a hint while the request is in
    // flight, the provider's answer below always wins
    let (session, _) = watch::channel(Session::connecting(cache.load()));
    let wallet = Self {
      provider,
      contract_address,
      cache,
      session: Arc::new(session),
      stale: Arc::new(AtomicBool::new(false)),
    };
    wallet.spawn_event_loop();

    match wallet.provider.request_accounts().await {
      Ok(accounts) => match accounts.first() {
        Some(address) => {
          wallet.adopt(*address);
          info!("wallet initialized, connected as {address}");
        }
        None => {
          wallet.session.send_replace(Session::failed());
          warn!("wallet approved access but exposed no accounts");
        }
      },
      Err(e) => {
        wallet.session.send_replace(Session::failed());
        warn!("wallet initialization failed, continuing read-only: {e}");
      }
    }

    Ok(wallet)
  }

  /// Connects the wallet. Idempotent: when already connected this
  /// returns the current address without prompting again.
  pub async fn connect(&self) -> Result<Address, Error> {
    let current = self.session();
    if current.is_connected() {
      if let Some(address) = current.address() {
        return Ok(address);
      }
    }

    self
      .session
      .send_replace(Session::connecting(current.address()));

    match self.provider.request_accounts().await {
      Ok(accounts) => match accounts.first() {
        Some(address) => {
          self.adopt(*address);
          info!("wallet connected as {address}");
          Ok(*address)
        }
        None => {
          self.session.send_replace(Session::failed());
          Err(Error::ConnectionRejected)
        }
      },
      Err(provider::Error::Rejected) => {
        self.session.send_replace(Session::failed());
        Err(Error::ConnectionRejected)
      }
      Err(provider::Error::Unavailable) => {
        self.session.send_replace(Session::failed());
        Err(Error::ProviderUnavailable)
      }
      Err(e) => {
        self.session.send_replace(Session::failed());
        Err(Error::InitializationFailed(e))
      }
    }
  }

  /// Clears the local session and the cached address. This is a
  /// local-UI-state reset only; provider-side permission cannot be
  /// revoked from here.
  pub fn disconnect(&self) {
    self.cache.clear();
    self.session.send_replace(Session::uninitialized());
    info!("wallet disconnected");
  }

  /// Immutable snapshot of the current session, to be threaded through
  /// operation calls.
  pub fn session(&self) -> Session {
    self.session.borrow().clone()
  }

  /// Subscription to session changes, for views that re-render on
  /// connect/disconnect/account-change.
  pub fn subscribe(&self) -> watch::Receiver<Session> {
    self.session.subscribe()
  }

  /// The contract binding, refused once a chain change invalidated it.
  pub fn contract(&self) -> Result<Contract, Error> {
    if self.stale.load(Ordering::SeqCst) {
      return Err(Error::ContractUninitialized);
    }
    Ok(Contract::new(self.provider.clone(), self.contract_address))
  }

  fn adopt(&self, address: Address) {
    self.cache.store(&address);
    self.session.send_replace(Session::connected(address));
  }

  /// Consumes provider events on a background task for the lifetime of
  /// the provider's event stream.
  fn spawn_event_loop(&self) {
    let mut events = self.provider.events();
    let session = self.session.clone();
    let cache = self.cache.clone();
    let stale = self.stale.clone();

    tokio::spawn(async move {
      while let Some(event) = events.next().await {
        match event {
          ProviderEvent::AccountsChanged(accounts) => {
            match accounts.first() {
              Some(address) => {
                cache.store(address);
                session.send_replace(Session::connected(*address));
                info!("active account changed to {address}");
              }
              None => {
                // the wallet revoked every account, same as a logout
                cache.clear();
                session.send_replace(Session::uninitialized());
                info!("wallet reported no accounts, disconnected");
              }
            }
          }
          ProviderEvent::ChainChanged(chain_id) => {
            stale.store(true, Ordering::SeqCst);
            session.send_replace(Session::uninitialized());
            warn!(
              "chain changed to {chain_id}, contract binding invalidated; \
               reinitialize the wallet"
            );
          }
        }
      }
    });
  }
}
