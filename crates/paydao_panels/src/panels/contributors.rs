use paydao_core::ContributorStore;

use crate::components::contributor_card::ContributorCardData;

/// The contributors section: a header count and one card per contributor in
/// store order.
///
/// Built from the store via `from_store()` each time it is shown, so it always
/// reflects the latest snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorsPanel {
    pub revision: u64,
    pub cards: Vec<ContributorCardData>,
}

impl ContributorsPanel {
    pub fn from_store(store: &ContributorStore) -> Self {
        Self {
            revision: store.revision(),
            cards: store
                .contributors()
                .iter()
                .map(ContributorCardData::from_contributor)
                .collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn header(&self) -> String {
        format!("{} active contributors", self.count())
    }

    pub fn card(&self, id: &str) -> Option<&ContributorCardData> {
        self.cards.iter().find(|card| card.id.as_str() == id)
    }

    /// True when the store has changed since this panel was built.
    pub fn is_stale(&self, store: &ContributorStore) -> bool {
        self.revision != store.revision()
    }

    pub fn render(&self) -> String {
        let mut out = format!("Contributors  [Rewards Encrypted]  {}\n", self.header());
        for card in &self.cards {
            out.push('\n');
            out.push_str(&card.render());
            out.push('\n');
        }
        out
    }
}
