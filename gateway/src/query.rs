use crowdfund_primitives::{Address, Campaign};

/// Case-insensitive substring filter on campaign titles. An empty query
/// matches everything.
pub fn filter_by_title<'a>(
  campaigns: &'a [Campaign],
  query: &str,
) -> Vec<&'a Campaign> {
  if query.is_empty() {
    return campaigns.iter().collect();
  }
  let needle = query.to_lowercase();
  campaigns
    .iter()
    .filter(|c| c.title.to_lowercase().contains(&needle))
    .collect()
}

/// Orders campaigns latest-deadline-first, the ordering of the home
/// listing. The contract returns campaigns in creation order and makes
/// no ordering promises beyond that, so callers re-sort before display.
pub fn sort_by_deadline_desc(mut campaigns: Vec<Campaign>) -> Vec<Campaign> {
  campaigns.sort_by(|a, b| b.deadline.cmp(&a.deadline));
  campaigns
}

/// Campaigns created by the given wallet, the content of the profile
/// view.
pub fn owned_by<'a>(
  campaigns: &'a [Campaign],
  owner: &Address,
) -> Vec<&'a Campaign> {
  campaigns.iter().filter(|c| c.owner == *owner).collect()
}
