use chrono::NaiveDate;
use paydao_core::{AppNotification, Contributor, ContributorId, ContributorStore, Role};

use crate::panels::contribution_tracker::ContributionTrackerData;

/// Rewards are never shown in clear.
pub const REWARD_MASK: &str = "••••••••";

/// `Mar 10, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Everything a contributor card (and its details dialog) displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorCardData {
    pub id: ContributorId,
    pub name: String,
    pub role: Role,
    pub contributions: i64,
    pub is_encrypted: bool,
    pub joined: String,
    pub last_active: String,
    pub tracker: ContributionTrackerData,
}

impl ContributorCardData {
    pub fn from_contributor(contributor: &Contributor) -> Self {
        Self {
            id: contributor.id.clone(),
            name: contributor.name.clone(),
            role: contributor.role,
            contributions: contributor.contributions,
            is_encrypted: contributor.is_encrypted,
            joined: format_date(contributor.join_date),
            last_active: format_date(contributor.last_active),
            tracker: ContributionTrackerData::from_contributor(contributor),
        }
    }

    /// The "Remove Contributor" action.
    pub fn remove(&self, store: &mut ContributorStore) -> AppNotification {
        store.remove_contributor(self.id.as_str());
        AppNotification::success(
            "Contributor Removed",
            format!("{} has been removed from the DAO.", self.name),
        )
    }

    pub fn render(&self) -> String {
        let badge = if self.is_encrypted { "  [Encrypted]" } else { "" };
        format!(
            "#{} {} ({}){badge}\n  Contributions  {}\n  Rewards        {REWARD_MASK}\n  Last Active    {}",
            self.id, self.name, self.role, self.contributions, self.last_active
        )
    }

    pub fn render_details(&self) -> String {
        format!(
            "Contributor Details - {}\n  Role: {}\n  Contributions: {}\n  Joined: {}\n  Last Active: {}\n{}",
            self.name,
            self.role,
            self.contributions,
            self.joined,
            self.last_active,
            self.tracker.render()
        )
    }
}
