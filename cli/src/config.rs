use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{warn, Level};

use crate::theme::ThemeColors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceMode {
    #[default]
    Auto,
    Dark,
    Light,
}

impl AppearanceMode {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dark" => AppearanceMode::Dark,
            "light" => AppearanceMode::Light,
            _ => AppearanceMode::Auto,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppearanceMode::Auto => "Auto",
            AppearanceMode::Dark => "Dark",
            AppearanceMode::Light => "Light",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            AppearanceMode::Auto => AppearanceMode::Dark,
            AppearanceMode::Dark => AppearanceMode::Light,
            AppearanceMode::Light => AppearanceMode::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "off" | "none" => LogLevel::Off,
            "error" => LogLevel::Error,
            "warn" | "warning" => LogLevel::Warn,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    /// `None` means logging is disabled entirely.
    pub fn as_tracing_level(&self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Health export document read on every sync.
    pub export_path: PathBuf,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            export_path: data_dir().join("health-export.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub log_level: LogLevel,
    pub appearance: AppearanceMode,
    pub refresh_ms: u64,
    pub backend: BackendConfig,
    pub provider: ProviderConfig,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            appearance: AppearanceMode::Auto,
            refresh_ms: 250,
            backend: BackendConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("vitals")
}

pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("vitals")
}

pub fn runtime_dir() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("vitals")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn ensure_dirs() -> std::io::Result<()> {
    fs::create_dir_all(config_dir())?;
    fs::create_dir_all(data_dir())?;
    Ok(())
}

impl UserConfig {
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse TOML, falling back to defaults when it is invalid.
    pub fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_else(|e| {
            warn!(error = %e, "Invalid config, using defaults");
            Self::default()
        })
    }

    pub fn save(&self) -> std::io::Result<()> {
        let _ = ensure_dirs();
        let path = config_path();
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        fs::write(path, content)
    }

    pub fn merge_with_args(
        &mut self,
        appearance: Option<&str>,
        backend_url: Option<&str>,
        export: Option<PathBuf>,
    ) {
        if let Some(a) = appearance {
            self.appearance = AppearanceMode::from_str(a);
        }
        if let Some(url) = backend_url {
            self.backend.base_url = url.to_string();
        }
        if let Some(path) = export {
            self.provider.export_path = path;
        }
    }
}

/// User config plus the terminal's detected background.
pub struct RuntimeConfig {
    pub user_config: UserConfig,
    pub system_is_dark: bool,
}

impl RuntimeConfig {
    pub fn new(user_config: UserConfig) -> Self {
        Self {
            user_config,
            system_is_dark: detect_terminal_dark_mode(),
        }
    }

    pub fn is_dark_mode(&self) -> bool {
        match self.user_config.appearance {
            AppearanceMode::Auto => self.system_is_dark,
            AppearanceMode::Dark => true,
            AppearanceMode::Light => false,
        }
    }

    pub fn theme(&self) -> ThemeColors {
        ThemeColors::for_mode(self.is_dark_mode())
    }

    pub fn cycle_appearance(&mut self) {
        self.user_config.appearance = self.user_config.appearance.next();
        if let Err(e) = self.user_config.save() {
            warn!(error = %e, "Failed to persist appearance");
        }
    }

    pub fn appearance_label(&self) -> &'static str {
        self.user_config.appearance.label()
    }
}

fn detect_terminal_dark_mode() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .map(|value| background_is_dark(&value))
        .unwrap_or(true)
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); ANSI backgrounds 0-6 and 8 are dark.
fn background_is_dark(colorfgbg: &str) -> bool {
    match colorfgbg.rsplit(';').next().map(str::parse::<u8>) {
        Some(Ok(bg)) => bg <= 6 || bg == 8,
        _ => true,
    }
}
