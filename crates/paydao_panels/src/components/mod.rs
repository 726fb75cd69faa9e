pub mod contributor_card;
pub mod toast;
