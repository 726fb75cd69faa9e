use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use paydao_chain::Address;
use paydao_core::Role;

/// One line typed at the dashboard prompt.
#[derive(Parser, Debug)]
#[command(name = "paydao", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// List all contributors
    List,
    /// Show a contributor's details and quick actions
    Show { id: String },
    /// Add a contributor
    Add {
        /// Display name (may be several words)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        /// Role label, e.g. "QA Engineer"
        #[arg(long)]
        role: Option<Role>,
        /// Initial contributions
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        contributions: String,
        /// Join date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        join_date: Option<NaiveDate>,
        /// Show rewards publicly instead of encrypted
        #[arg(long)]
        public: bool,
    },
    /// Add to a contributor's count (default 1, may be negative)
    Inc {
        id: String,
        #[arg(default_value_t = 1, allow_negative_numbers = true)]
        amount: i64,
    },
    /// Subtract one contribution
    Dec { id: String },
    /// Set a contributor's total contributions
    Set {
        id: String,
        #[arg(allow_negative_numbers = true)]
        total: i64,
    },
    /// Remove a contributor from the DAO
    Remove { id: String },
    /// Show the treasury overview
    Treasury,
    /// Show notification history
    Notifications {
        /// Forget every stored notification
        #[arg(long)]
        clear: bool,
    },
    /// Contract calls
    #[command(subcommand)]
    Chain(ChainCommand),
    /// Leave the dashboard
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ChainCommand {
    /// Register a contributor on-chain
    AddContributor { name: String, wallet: Address },
    /// Mark a contribution as verified or not
    Verify {
        id: u64,
        #[arg(action = ArgAction::Set)]
        verified: bool,
    },
    /// Claim a reward
    Claim { id: u64 },
    /// Deposit ether into the treasury
    Deposit { amount: String },
    /// Withdraw ether from the treasury
    Withdraw { amount: String },
    /// Read treasury balances
    Info,
}

/// Split a line shell-style and parse it. `Ok(None)` for a blank line.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, clap::Error> {
    let Some(tokens) = shlex::split(line) else {
        return Err(clap::Error::raw(
            clap::error::ErrorKind::InvalidValue,
            "unbalanced quotes\n",
        ));
    };
    if tokens.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(tokens).map(|parsed| Some(parsed.command))
}
