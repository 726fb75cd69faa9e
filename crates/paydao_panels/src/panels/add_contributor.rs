use chrono::NaiveDate;
use paydao_core::{AppNotification, ContributorStore, NewContributor, Role};
use tracing::debug;

/// State of the "Add New Contributor" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddContributorForm {
    pub name: String,
    pub role: Option<Role>,
    pub contributions: i64,
    pub join_date: NaiveDate,
    pub is_encrypted: bool,
}

impl AddContributorForm {
    /// Blank form: no name or role, zero contributions, joining today,
    /// rewards encrypted.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            role: None,
            contributions: 0,
            join_date: today,
            is_encrypted: true,
        }
    }

    /// Numeric input semantics: anything that is not an integer counts as 0.
    pub fn set_contributions_input(&mut self, input: &str) {
        self.contributions = input.trim().parse().unwrap_or(0);
    }

    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.role.is_some()
    }

    /// Validate and add the contributor. The form resets on success and is
    /// left as-is on a validation error.
    pub fn submit(&mut self, store: &mut ContributorStore, today: NaiveDate) -> AppNotification {
        let Some(role) = self.role.filter(|_| self.is_valid()) else {
            debug!("add contributor form incomplete");
            return AppNotification::error(
                "Validation Error",
                "Please fill in all required fields.",
            );
        };

        let name = self.name.clone();
        store.add_contributor(NewContributor {
            name: name.clone(),
            role,
            contributions: self.contributions,
            is_encrypted: self.is_encrypted,
            join_date: self.join_date,
            last_active: today,
        });

        *self = Self::new(today);
        AppNotification::success("Success", format!("{name} has been added as a contributor."))
    }
}
