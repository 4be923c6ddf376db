use {
  crate::settings::SystemSettings,
  clap::Parser,
  crowdfund_gateway::{
    campaigns,
    campaigns_or_empty,
    create_campaign,
    dev::DevProvider,
    donate,
    filter_by_title,
    outcome_of,
    owned_by,
    sort_by_deadline_desc,
    CampaignDraft,
    FileAddressCache,
    Provider,
    SubmitOutcome,
    Submission,
    Wallet,
  },
  crowdfund_primitives::{Amount, WEI_PER_ETH},
  rand::{seq::SliceRandom, Rng},
  std::sync::Arc,
  time::{macros::format_description, OffsetDateTime},
  tracing::{info, warn},
};

mod settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt::init();

  let opts = SystemSettings::parse();
  info!("Client options: {opts:?}");

  let provider = Arc::new(DevProvider::new(vec![opts.account()]));
  let cache = Arc::new(FileAddressCache::new(opts.cache_file()));
  let wallet = Wallet::initialize(
    Some(provider.clone() as Arc<dyn Provider>),
    opts.contract(),
    cache,
  )
  .await?;

  // connect is idempotent, this returns the address adopted above
  let address = wallet.connect().await?;
  let session = wallet.session();
  info!("connected as {address}");

  // put a few campaigns on the ledger, closing at staggered dates
  let drafts = [
    ("Clean Water Wells", "12"),
    ("School Library", "3.5"),
    ("Community Garden", "0.75"),
  ];
  for (i, (title, target)) in drafts.iter().enumerate() {
    let deadline = date_string(provider.now() + (30 + 30 * i as u64) * 86400)?;
    let draft = CampaignDraft {
      title: (*title).into(),
      description: format!("Raising funds for: {title}"),
      target: (*target).into(),
      deadline,
      image: "https://example.com/cover.png".into(),
    };
    let receipt = create_campaign(&wallet, &session, &draft).await?;
    info!("created campaign {title:?} in {}", receipt.tx_hash);
  }

  let listing = sort_by_deadline_desc(campaigns_or_empty(&wallet).await);
  info!("home listing, latest deadline first:");
  for c in &listing {
    info!(
      "  #{} {:?} target {} raised {} ({} donations)",
      c.id, c.title, c.target, c.raised, c.donations
    );
  }

  let hits = filter_by_title(&listing, opts.search());
  info!("search {:?} matched {} campaigns", opts.search(), hits.len());

  // scripted donations, each through its own submit guard
  let mut rng = rand::thread_rng();
  for _ in 0..opts.donations() {
    let now = provider.now();
    let listing = campaigns_or_empty(&wallet).await;
    let open: Vec<_> = listing.iter().filter(|c| !c.is_closed(now)).collect();
    let Some(campaign) = open.choose(&mut rng) else {
      info!("every campaign is closed, stopping donations");
      break;
    };

    // 0.1 to 2.0 ETH in 0.1 steps
    let amount =
      Amount::from_wei(rng.gen_range(1..=20u128) * WEI_PER_ETH / 10);

    let mut submission = Submission::default();
    if !submission.begin() {
      continue;
    }
    let result = donate(&wallet, &session, campaign.id, amount).await;
    let outcome = outcome_of(&result);
    submission.finish(outcome);

    match outcome {
      SubmitOutcome::Confirmed => {
        info!("donated {amount} to {:?}", campaign.title);
      }
      other => warn!("donation to {:?} ended {other:?}", campaign.title),
    }
  }

  // profile view: only campaigns owned by the connected address
  let listing = campaigns(&wallet).await?;
  let mine = owned_by(&listing, &address);
  info!("{address} owns {} campaigns:", mine.len());
  for c in mine {
    info!("  {:?}: {} raised of {}", c.title, c.raised, c.target);
  }

  wallet.disconnect();
  Ok(())
}

fn date_string(unix_seconds: u64) -> anyhow::Result<String> {
  Ok(
    OffsetDateTime::from_unix_timestamp(i64::try_from(unix_seconds)?)?
      .date()
      .format(format_description!("[year]-[month]-[day]"))?,
  )
}
