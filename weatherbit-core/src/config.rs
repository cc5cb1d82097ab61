use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf, time::Duration};

pub const DEFAULT_REFERENCE_TIMEZONE: &str = "Asia/Seoul";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Response language for weather descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    En,
    Ar,
    Az,
    Be,
    Bg,
    Bs,
    Ca,
    Cz,
    Da,
    De,
    Fi,
    Fr,
    El,
    Es,
    Et,
    Ja,
    Hr,
    Hu,
    Id,
    It,
    Is,
    Iw,
    Kw,
    Lt,
    Nb,
    Nl,
    Pl,
    Pt,
    Ro,
    Ru,
    Sk,
    Sl,
    Sr,
    Sv,
    Tr,
    Uk,
    Zh,
    ZhTw,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
            Language::Az => "az",
            Language::Be => "be",
            Language::Bg => "bg",
            Language::Bs => "bs",
            Language::Ca => "ca",
            Language::Cz => "cz",
            Language::Da => "da",
            Language::De => "de",
            Language::Fi => "fi",
            Language::Fr => "fr",
            Language::El => "el",
            Language::Es => "es",
            Language::Et => "et",
            Language::Ja => "ja",
            Language::Hr => "hr",
            Language::Hu => "hu",
            Language::Id => "id",
            Language::It => "it",
            Language::Is => "is",
            Language::Iw => "iw",
            Language::Kw => "kw",
            Language::Lt => "lt",
            Language::Nb => "nb",
            Language::Nl => "nl",
            Language::Pl => "pl",
            Language::Pt => "pt",
            Language::Ro => "ro",
            Language::Ru => "ru",
            Language::Sk => "sk",
            Language::Sl => "sl",
            Language::Sr => "sr",
            Language::Sv => "sv",
            Language::Tr => "tr",
            Language::Uk => "uk",
            Language::Zh => "zh",
            Language::ZhTw => "zh-tw",
        }
    }

    pub const fn all() -> &'static [Language] {
        &[
            Language::En,
            Language::Ar,
            Language::Az,
            Language::Be,
            Language::Bg,
            Language::Bs,
            Language::Ca,
            Language::Cz,
            Language::Da,
            Language::De,
            Language::Fi,
            Language::Fr,
            Language::El,
            Language::Es,
            Language::Et,
            Language::Ja,
            Language::Hr,
            Language::Hu,
            Language::Id,
            Language::It,
            Language::Is,
            Language::Iw,
            Language::Kw,
            Language::Lt,
            Language::Nb,
            Language::Nl,
            Language::Pl,
            Language::Pt,
            Language::Ro,
            Language::Ru,
            Language::Sk,
            Language::Sl,
            Language::Sr,
            Language::Sv,
            Language::Tr,
            Language::Uk,
            Language::Zh,
            Language::ZhTw,
        ]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Language {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        Language::all()
            .iter()
            .copied()
            .find(|l| l.as_str() == lower)
            .ok_or_else(|| anyhow!("Unknown language '{value}'."))
    }
}

impl TryFrom<String> for Language {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Language::try_from(value.as_str())
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.as_str().to_string()
    }
}

/// Unit system for every numeric field of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    #[default]
    Metric,
    Scientific,
    Imperial,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Metric => "M",
            Unit::Scientific => "S",
            Unit::Imperial => "I",
        }
    }

    pub const fn all() -> &'static [Unit] {
        &[Unit::Metric, Unit::Scientific, Unit::Imperial]
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Unit::Metric => "°C",
            Unit::Scientific => "K",
            Unit::Imperial => "°F",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Unit::Metric => "metric",
            Unit::Scientific => "scientific",
            Unit::Imperial => "imperial",
        };
        f.write_str(name)
    }
}

impl TryFrom<&str> for Unit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "m" | "metric" => Ok(Unit::Metric),
            "s" | "scientific" => Ok(Unit::Scientific),
            "i" | "imperial" => Ok(Unit::Imperial),
            _ => Err(anyhow!("Unknown unit '{value}'. Supported units: M, S, I.")),
        }
    }
}

impl TryFrom<String> for Unit {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Unit::try_from(value.as_str())
    }
}

impl From<Unit> for String {
    fn from(value: Unit) -> Self {
        value.as_str().to_string()
    }
}

/// Everything a provider needs, passed explicitly at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub use_https: bool,
    pub lang: Language,
    pub unit: Unit,
    /// Timezone "now" is evaluated in when deciding day or night.
    pub reference_timezone: Tz,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            use_https: false,
            lang: Language::default(),
            unit: Unit::default(),
            reference_timezone: chrono_tz::Asia::Seoul,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn schema(&self) -> &'static str {
        if self.use_https { "https" } else { "http" }
    }
}

/// Configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
/// use_https = true
/// lang = "de"
/// unit = "M"
/// reference_timezone = "Asia/Seoul"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub use_https: bool,
    pub lang: Language,
    pub unit: Unit,
    pub reference_timezone: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            use_https: false,
            lang: Language::default(),
            unit: Unit::default(),
            reference_timezone: DEFAULT_REFERENCE_TIMEZONE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Turn the stored settings into a provider configuration.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let api_key = self.api_key.as_deref().filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `weatherbit configure` and enter your Weatherbit API key."
            )
        })?;

        let reference_timezone: Tz = self
            .reference_timezone
            .parse()
            .map_err(|_| anyhow!("Unknown timezone '{}'", self.reference_timezone))?;

        Ok(ClientConfig {
            api_key: api_key.to_string(),
            use_https: self.use_https,
            lang: self.lang,
            unit: self.unit,
            reference_timezone,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.client_config().is_ok()
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "weatherbit", "weatherbit-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
