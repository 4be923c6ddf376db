mod cache;
mod contract;
mod error;
mod ops;
mod provider;
mod query;
mod session;
mod submit;
mod validate;
mod wallet;

pub mod dev;

pub use {
  cache::{AddressCache, FileAddressCache, MemoryAddressCache},
  contract::Contract,
  error::Error,
  ops::{campaigns, campaigns_or_empty, create_campaign, donate},
  provider::{
    CallRequest,
    Error as ProviderError,
    MutationCall,
    Provider,
    ProviderEvent,
    Receipt,
    TransactionRequest,
  },
  query::{filter_by_title, owned_by, sort_by_deadline_desc},
  session::{ConnectionState, Session},
  submit::{outcome_of, SubmitOutcome, SubmitState, Submission},
  validate::{
    validate_donation,
    validate_draft,
    CampaignDraft,
    ValidatedDraft,
    ValidationError,
  },
  wallet::Wallet,
};
