// Dashboard views: plain data built from the store, rendered as text

pub mod components;
pub mod panels;

pub use components::contributor_card::{ContributorCardData, REWARD_MASK, format_date};
pub use components::toast::{ToastKind, render_notification, render_toast};
pub use panels::add_contributor::AddContributorForm;
pub use panels::contribution_tracker::{ContributionTrackerData, QuickAction};
pub use panels::contributors::ContributorsPanel;
pub use panels::treasury::{TreasuryOverviewData, TreasuryStat};
