use anyhow::{Context, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Environment variable overriding [`PayDaoConfig::contract_address`].
pub const CONTRACT_ADDRESS_ENV: &str = "PAYDAO_CONTRACT_ADDRESS";

/// Environment variable relocating the `~/.paydao` base directory.
pub const HOME_ENV: &str = "PAYDAO_HOME";

const CONFIG_FILE_NAME: &str = "config.json";

// ---------------------------------------------------------------------------
// PayDaoConfig
// ---------------------------------------------------------------------------

/// Application configuration stored at `~/.paydao/config.json`.
///
/// Addresses are kept as strings here; `paydao_chain` validates them when it
/// builds a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayDaoConfig {
    /// Network name understood by `paydao_chain::Network` (`sepolia`,
    /// `mainnet`, `localhost`).
    pub network: String,
    /// Overrides the network's default RPC endpoint.
    pub rpc_url: Option<String>,
    /// Deployed `PrivatePayDAO` address.
    pub contract_address: Option<String>,
    /// Account the node signs transactions with.
    pub sender_address: Option<String>,
    pub http_timeout_secs: u64,
    pub receipt_poll_interval_ms: u64,
    pub receipt_poll_attempts: u32,
    /// Where `paydao-deploy` writes, and the dashboard falls back to reading,
    /// the deployment record.
    pub deployment_info_path: PathBuf,
    pub log_level: String,
}

impl Default for PayDaoConfig {
    fn default() -> Self {
        Self {
            network: "sepolia".into(),
            rpc_url: None,
            contract_address: None,
            sender_address: None,
            http_timeout_secs: 30,
            receipt_poll_interval_ms: 2_000,
            receipt_poll_attempts: 60,
            deployment_info_path: PathBuf::from("deployment-info.json"),
            log_level: "info".into(),
        }
    }
}

impl PayDaoConfig {
    /// Returns the base config directory: `~/.paydao/` (or `$PAYDAO_HOME`).
    pub fn base_dir() -> Result<PathBuf> {
        if let Some(custom) = std::env::var_os(HOME_ENV) {
            return Ok(PathBuf::from(custom));
        }
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".paydao"))
    }

    /// Returns the config file path: `~/.paydao/config.json`
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Returns the logs directory: `~/.paydao/logs/`
    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("logs"))
    }

    /// Ensures all required directories exist.
    pub fn ensure_dirs() -> Result<()> {
        for dir in [Self::base_dir()?, Self::logs_dir()?] {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            }
        }
        Ok(())
    }

    /// Loads config from the default location, creating it if missing, then
    /// applies environment overrides.
    pub fn load() -> Result<Self> {
        Self::ensure_dirs()?;
        let path = Self::config_path()?;
        let mut config = Self::load_from_path(&path)?;
        config.apply_contract_override(std::env::var(CONTRACT_ADDRESS_ENV).ok());
        Ok(config)
    }

    /// Load config from a specific file path. A missing file is created with
    /// defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Self = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// A non-empty override replaces the configured contract address.
    pub fn apply_contract_override(&mut self, value: Option<String>) {
        if let Some(address) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            info!(%address, "contract address overridden from environment");
            self.contract_address = Some(address);
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigManager
// ---------------------------------------------------------------------------

/// Thread-safe config holder with a file watcher for hot reload.
pub struct ConfigManager {
    config: Arc<RwLock<PayDaoConfig>>,
    path: PathBuf,
    _watcher: Option<RecommendedWatcher>,
}

impl ConfigManager {
    /// Opens the default `~/.paydao/config.json`.
    pub fn new() -> Result<Self> {
        PayDaoConfig::ensure_dirs()?;
        let path = PayDaoConfig::config_path()?;
        let env_override = std::env::var(CONTRACT_ADDRESS_ENV).ok();
        Self::open(path, env_override)
    }

    /// Opens the config at `path`. A watcher failure only disables hot reload.
    pub fn open(path: PathBuf, contract_override: Option<String>) -> Result<Self> {
        let mut config = PayDaoConfig::load_from_path(&path)?;
        config.apply_contract_override(contract_override.clone());
        let config = Arc::new(RwLock::new(config));

        let watcher = match Self::setup_watcher(Arc::clone(&config), path.clone(), contract_override)
        {
            Ok(w) => Some(w),
            Err(e) => {
                warn!("Config watcher unavailable ({e}); hot reload disabled");
                None
            }
        };

        Ok(Self {
            config,
            path,
            _watcher: watcher,
        })
    }

    /// Get a clone of the current config.
    pub fn get(&self) -> PayDaoConfig {
        self.config.read().clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn setup_watcher(
        config: Arc<RwLock<PayDaoConfig>>,
        path: PathBuf,
        contract_override: Option<String>,
    ) -> Result<RecommendedWatcher> {
        let watch_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_name = path.file_name().map(|n| n.to_os_string());

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
            let Ok(event) = res else { return };
            let touches_config = event
                .paths
                .iter()
                .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
            if !touches_config {
                return;
            }
            match PayDaoConfig::load_from_path(&path) {
                Ok(mut reloaded) => {
                    reloaded.apply_contract_override(contract_override.clone());
                    *config.write() = reloaded;
                    info!("Config hot-reloaded");
                }
                Err(e) => warn!("Failed to hot-reload config: {e}"),
            }
        })?;

        watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;
        Ok(watcher)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = PayDaoConfig::default();
        assert_eq!(config.network, "sepolia");
        assert!(config.contract_address.is_none());
        assert_eq!(config.http_timeout_secs, 30);
        assert_eq!(config.receipt_poll_attempts, 60);
        assert_eq!(
            config.deployment_info_path,
            PathBuf::from("deployment-info.json")
        );
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.json");

        let config = PayDaoConfig::load_from_path(&path).unwrap();
        assert_eq!(config, PayDaoConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn save_and_reload_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");

        let mut config = PayDaoConfig::default();
        config.network = "localhost".into();
        config.contract_address = Some("0x5FbDB2315678afecb367f032d93F642f64180aa3".into());
        config.save_to_path(&path).unwrap();

        let loaded = PayDaoConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{"network": "mainnet"}"#).unwrap();

        let loaded = PayDaoConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.network, "mainnet");
        assert_eq!(loaded.receipt_poll_interval_ms, 2_000);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = PayDaoConfig::load_from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn contract_override_replaces_address() {
        let mut config = PayDaoConfig::default();
        config.contract_address = Some("0xold".into());

        config.apply_contract_override(Some("  0xnew ".into()));
        assert_eq!(config.contract_address.as_deref(), Some("0xnew"));

        config.apply_contract_override(Some("   ".into()));
        assert_eq!(config.contract_address.as_deref(), Some("0xnew"));

        config.apply_contract_override(None);
        assert_eq!(config.contract_address.as_deref(), Some("0xnew"));
    }

    #[test]
    fn manager_reads_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        let config = PayDaoConfig {
            sender_address: Some("0xabc".into()),
            ..PayDaoConfig::default()
        };
        config.save_to_path(&path).unwrap();

        let manager = ConfigManager::open(path.clone(), None).unwrap();
        assert_eq!(manager.get().sender_address.as_deref(), Some("0xabc"));
        assert_eq!(manager.path(), path.as_path());
    }

    #[test]
    fn manager_applies_override() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");

        let manager = ConfigManager::open(path, Some("0xfrom-env".into())).unwrap();
        assert_eq!(manager.get().contract_address.as_deref(), Some("0xfrom-env"));
    }
}
