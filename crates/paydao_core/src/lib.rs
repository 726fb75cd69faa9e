pub mod config;
pub mod contributors;
pub mod error_handler;
pub mod logging;
pub mod notifications;

pub use config::{ConfigManager, PayDaoConfig};
pub use contributors::{
    Clock, Contributor, ContributorId, ContributorPatch, ContributorStore, FixedClock,
    NewContributor, Role, SystemClock, seed_contributors,
};
pub use error_handler::{
    ClassifiedCategory, ClassifiedError, ErrorCategory, ErrorSeverity, PayDaoError, classify_error,
};
pub use notifications::{AppNotification, NotificationStore, NotificationType};
