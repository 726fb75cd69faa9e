pub mod add_contributor;
pub mod contribution_tracker;
pub mod contributors;
pub mod treasury;
