use paydao_core::{
    AppNotification, Contributor, ContributorId, ContributorPatch, ContributorStore,
    NotificationType,
};
use tracing::warn;

/// The four quick-action buttons, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    MinusOne,
    PlusOne,
    PlusFive,
    PlusTen,
}

impl QuickAction {
    pub fn amount(self) -> i64 {
        match self {
            Self::MinusOne => -1,
            Self::PlusOne => 1,
            Self::PlusFive => 5,
            Self::PlusTen => 10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MinusOne => "-1",
            Self::PlusOne => "+1",
            Self::PlusFive => "+5",
            Self::PlusTen => "+10",
        }
    }

    pub fn all() -> [Self; 4] {
        [Self::MinusOne, Self::PlusOne, Self::PlusFive, Self::PlusTen]
    }
}

/// Quick-action view for one contributor's counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionTrackerData {
    pub contributor_id: ContributorId,
    pub contributor_name: String,
    pub current_contributions: i64,
}

impl ContributionTrackerData {
    pub fn from_contributor(contributor: &Contributor) -> Self {
        Self {
            contributor_id: contributor.id.clone(),
            contributor_name: contributor.name.clone(),
            current_contributions: contributor.contributions,
        }
    }

    pub fn can_decrement(&self) -> bool {
        self.current_contributions > 0
    }

    pub fn is_enabled(&self, action: QuickAction) -> bool {
        action != QuickAction::MinusOne || self.can_decrement()
    }

    pub fn apply(&self, action: QuickAction, store: &mut ContributorStore) -> AppNotification {
        self.increment(store, action.amount())
    }

    /// Add `amount` (possibly negative) to the counter.
    ///
    /// A negative amount while the counter is at or below zero is what the
    /// disabled `-1` button would have sent; it is refused without touching
    /// the store.
    pub fn increment(&self, store: &mut ContributorStore, amount: i64) -> AppNotification {
        if amount < 0 && !self.can_decrement() {
            warn!(id = %self.contributor_id, amount, "decrement refused at zero");
            return AppNotification::new(
                NotificationType::Warning,
                format!("{}'s contributions cannot go below 0.", self.contributor_name),
            )
            .with_title("Contribution Not Updated");
        }

        store.increment_contributions(self.contributor_id.as_str(), amount);
        let direction = if amount > 0 { "increased" } else { "decreased" };
        AppNotification::success(
            "Contribution Updated",
            format!(
                "{}'s contributions {direction} by {}.",
                self.contributor_name,
                amount.unsigned_abs()
            ),
        )
    }

    pub fn set_total(&self, store: &mut ContributorStore, new_total: i64) -> AppNotification {
        store.update_contributor(
            self.contributor_id.as_str(),
            ContributorPatch::default().contributions(new_total),
        );
        AppNotification::success(
            "Contributions Updated",
            format!(
                "{}'s total contributions set to {new_total}.",
                self.contributor_name
            ),
        )
    }

    pub fn render(&self) -> String {
        let buttons: Vec<String> = QuickAction::all()
            .into_iter()
            .map(|action| {
                if self.is_enabled(action) {
                    format!("[{}]", action.label())
                } else {
                    format!("({})", action.label())
                }
            })
            .collect();
        format!(
            "Quick Actions\n  Current Total: {}\n  {}",
            self.current_contributions,
            buttons.join(" ")
        )
    }
}
