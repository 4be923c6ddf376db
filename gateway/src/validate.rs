use {
  crowdfund_primitives::{Amount, AmountError},
  thiserror::Error,
  time::{format_description::FormatItem, macros::format_description, Date},
};

const DATE_FORMAT: &[FormatItem<'static>] =
  format_description!("[year]-[month]-[day]");

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
  #[error("the {0} field is required")]
  MissingField(&'static str),

  #[error("target is not a valid amount: {0}")]
  InvalidTarget(AmountError),

  #[error("target must be greater than zero")]
  ZeroTarget,

  #[error("deadline is not a valid calendar date: {0}")]
  InvalidDeadline(String),

  #[error("image must be an http(s) URL")]
  InvalidImageUrl,

  #[error("donation is not a valid amount: {0}")]
  InvalidDonation(AmountError),

  #[error("donation must be greater than zero")]
  ZeroDonation,
}

/// Campaign-creation form input, exactly as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct CampaignDraft {
  pub title: String,
  pub description: String,
  /// Fundraising goal as a decimal ETH string.
  pub target: String,
  /// End date in `YYYY-MM-DD` form.
  pub deadline: String,
  /// Cover image URL.
  pub image: String,
}

/// A draft that passed every client-side check, with its values
/// converted to the contract's units.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
  pub title: String,
  pub description: String,
  pub target: Amount,
  /// Midnight UTC of the entered date, in unix seconds.
  pub deadline: u64,
  pub image: String,
}

/// Runs every client-side check on a campaign draft before anything is
/// sent anywhere.
///
/// Whether the deadline lies in the future is deliberately not checked
/// here; the contract enforces that on its own and re-implementing the
/// rule client-side would only let the two disagree.
pub fn validate_draft(
  draft: &CampaignDraft,
) -> Result<ValidatedDraft, ValidationError> {
  let required = [
    ("title", &draft.title),
    ("description", &draft.description),
    ("target", &draft.target),
    ("deadline", &draft.deadline),
    ("image", &draft.image),
  ];
  for (name, value) in required {
    if value.trim().is_empty() {
      return Err(ValidationError::MissingField(name));
    }
  }

  let target =
    Amount::parse_eth(&draft.target).map_err(ValidationError::InvalidTarget)?;
  if target.is_zero() {
    return Err(ValidationError::ZeroTarget);
  }

  let deadline = parse_deadline(&draft.deadline)?;

  let image = draft.image.trim();
  if !image.starts_with("http://") && !image.starts_with("https://") {
    return Err(ValidationError::InvalidImageUrl);
  }

  Ok(ValidatedDraft {
    title: draft.title.trim().to_owned(),
    description: draft.description.trim().to_owned(),
    target,
    deadline,
    image: image.to_owned(),
  })
}

/// Validates a donation amount string into base units, rejecting
/// non-numeric and non-positive values before any contract call.
pub fn validate_donation(amount: &str) -> Result<Amount, ValidationError> {
  let amount =
    Amount::parse_eth(amount).map_err(ValidationError::InvalidDonation)?;
  if amount.is_zero() {
    return Err(ValidationError::ZeroDonation);
  }
  Ok(amount)
}

fn parse_deadline(text: &str) -> Result<u64, ValidationError> {
  let date = Date::parse(text.trim(), DATE_FORMAT)
    .map_err(|e| ValidationError::InvalidDeadline(e.to_string()))?;
  let timestamp = date
    .with_hms(0, 0, 0)
    .map_err(|e| ValidationError::InvalidDeadline(e.to_string()))?
    .assume_utc()
    .unix_timestamp();
  u64::try_from(timestamp)
    .map_err(|_| ValidationError::InvalidDeadline("before 1970".into()))
}
