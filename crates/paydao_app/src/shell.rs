use paydao_chain::{ContractGateway, ContractTransport, GatewayError};
use paydao_core::{
    AppNotification, ClassifiedCategory, ContributorStore, NotificationStore, NotificationType,
    PayDaoError, classify_error,
};
use paydao_panels::{
    AddContributorForm, ContributorCardData, ContributorsPanel, QuickAction, TreasuryOverviewData,
    render_notification,
};
use tracing::{debug, error, warn};

use crate::cli::{ChainCommand, ShellCommand, parse_line};

/// What the prompt loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

/// Interactive dashboard state: the contributor store, toast history and an
/// optional contract gateway.
pub struct Dashboard<T: ContractTransport> {
    store: ContributorStore,
    notifications: NotificationStore,
    treasury: TreasuryOverviewData,
    /// `Err` carries the reason chain commands are unavailable.
    gateway: Result<ContractGateway<T>, String>,
}

impl<T: ContractTransport> Dashboard<T> {
    pub fn new(store: ContributorStore, gateway: Result<ContractGateway<T>, String>) -> Self {
        Self {
            store,
            notifications: NotificationStore::new(),
            treasury: TreasuryOverviewData::hardcoded(),
            gateway,
        }
    }

    pub fn set_gateway(&mut self, gateway: Result<ContractGateway<T>, String>) {
        self.gateway = gateway;
    }

    pub fn store(&self) -> &ContributorStore {
        &self.store
    }

    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    /// Landing view: treasury tiles and the contributor list.
    pub fn overview(&self) -> String {
        format!(
            "Private Pay DAO - Work Openly, Earn Privately\n\n{}\n{}",
            self.treasury.render(),
            ContributorsPanel::from_store(&self.store).render()
        )
    }

    /// Parse and run one prompt line. Toasts raised by the command are
    /// appended to its output.
    pub async fn handle_line(&mut self, line: &str) -> Outcome {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Outcome::Continue(String::new()),
            Err(e) => return Outcome::Continue(e.render().to_string().trim_end().to_string()),
        };
        debug!(?command, "shell command");

        let Some(mut output) = self.execute(command).await else {
            return Outcome::Quit;
        };

        for toast in self.notifications.drain_unread() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&render_notification(&toast));
        }
        Outcome::Continue(output)
    }

    /// `None` means quit.
    async fn execute(&mut self, command: ShellCommand) -> Option<String> {
        let output = match command {
            ShellCommand::List => ContributorsPanel::from_store(&self.store).render(),
            ShellCommand::Show { id } => match self.card(&id) {
                Some(card) => card.render_details(),
                None => unknown_contributor(&id),
            },
            ShellCommand::Add {
                name,
                role,
                contributions,
                join_date,
                public,
            } => {
                let today = self.store.today();
                let mut form = AddContributorForm::new(today);
                form.name = name.join(" ");
                form.role = role;
                form.set_contributions_input(&contributions);
                form.join_date = join_date.unwrap_or(today);
                form.is_encrypted = !public;
                let toast = form.submit(&mut self.store, today);
                self.notifications.push(toast);
                String::new()
            }
            ShellCommand::Inc { id, amount } => {
                self.with_card(&id, |card, store| card.tracker.increment(store, amount))
            }
            ShellCommand::Dec { id } => self.with_card(&id, |card, store| {
                card.tracker.apply(QuickAction::MinusOne, store)
            }),
            ShellCommand::Set { id, total } => {
                self.with_card(&id, |card, store| card.tracker.set_total(store, total))
            }
            ShellCommand::Remove { id } => self.with_card(&id, |card, store| card.remove(store)),
            ShellCommand::Treasury => self.treasury.render(),
            ShellCommand::Notifications { clear: false } => self.notification_history(),
            ShellCommand::Notifications { clear: true } => {
                let count = self.notifications.all().len();
                self.notifications.clear();
                format!("Cleared {count} notifications.")
            }
            ShellCommand::Chain(command) => {
                self.run_chain(command).await;
                String::new()
            }
            ShellCommand::Quit => return None,
        };
        Some(output)
    }

    fn card(&self, id: &str) -> Option<ContributorCardData> {
        self.store.get(id).map(ContributorCardData::from_contributor)
    }

    fn with_card(
        &mut self,
        id: &str,
        action: impl FnOnce(&ContributorCardData, &mut ContributorStore) -> AppNotification,
    ) -> String {
        let Some(card) = self.card(id) else {
            return unknown_contributor(id);
        };
        let toast = action(&card, &mut self.store);
        self.notifications.push(toast);
        String::new()
    }

    fn notification_history(&self) -> String {
        if self.notifications.all().is_empty() {
            return "No notifications yet.".to_string();
        }
        self.notifications
            .all()
            .iter()
            .map(|n| format!("{}  {}", n.timestamp.format("%H:%M:%S"), render_notification(n)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn run_chain(&mut self, command: ChainCommand) {
        let gateway = match &self.gateway {
            Ok(gateway) => gateway,
            Err(reason) => {
                self.notifications
                    .push(AppNotification::error("Contract Unavailable", reason.clone()));
                return;
            }
        };

        let result: Result<(&str, String), GatewayError> = match command {
            ChainCommand::AddContributor { name, wallet } => gateway
                .add_contributor(&name, wallet)
                .await
                .map(|hash| ("Contributor Registered", format!("{name} submitted in {hash}."))),
            ChainCommand::Verify { id, verified } => gateway
                .verify_contribution(id, verified)
                .await
                .map(|hash| ("Contribution Verified", format!("Contribution {id} submitted in {hash}."))),
            ChainCommand::Claim { id } => gateway
                .claim_reward(id)
                .await
                .map(|hash| ("Reward Claimed", format!("Reward {id} submitted in {hash}."))),
            ChainCommand::Deposit { amount } => gateway
                .deposit_to_treasury(&amount)
                .await
                .map(|hash| ("Deposit Submitted", format!("{amount} ETH deposited in {hash}."))),
            ChainCommand::Withdraw { amount } => gateway
                .withdraw_from_treasury(&amount)
                .await
                .map(|hash| ("Withdrawal Submitted", format!("{amount} ETH withdrawn in {hash}."))),
            ChainCommand::Info => gateway
                .get_treasury_info()
                .await
                .map(|info| ("On-chain Treasury", info.to_string())),
        };

        let toast = match result {
            Ok((title, message)) => AppNotification::new(NotificationType::Info, message).with_title(title),
            Err(e) => {
                let classified = classify_error(&anyhow::Error::from(e));
                if classified.category == ClassifiedCategory::Validation {
                    warn!("chain command rejected: {}", classified.message);
                    let err = PayDaoError::Validation(classified.message);
                    AppNotification::error("Validation Error", err.user_message())
                } else {
                    error!(category = ?classified.category, "chain command failed: {}", classified.message);
                    AppNotification::error("Transaction Failed", classified.user_message)
                }
            }
        };
        self.notifications.push(toast);
    }
}

fn unknown_contributor(id: &str) -> String {
    format!("No contributor with id {id}.")
}
