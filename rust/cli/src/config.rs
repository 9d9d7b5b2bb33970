use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub db_path: String,
    pub small_blind: u64,
    pub big_blind: u64,
    pub advance_delay_ms: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub db_path: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub advance_delay_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            db_path: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            advance_delay_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "chiptally.db".into(),
            small_blind: 5,
            big_blind: 10,
            advance_delay_ms: 600,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[allow(dead_code)]
pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolves the configuration: defaults, then the TOML file named by
/// `CHIPTALLY_CONFIG`, then individual environment variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("CHIPTALLY_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.db_path {
            cfg.db_path = v;
            sources.db_path = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.advance_delay_ms {
            cfg.advance_delay_ms = v;
            sources.advance_delay_ms = ValueSource::File;
        }
    }

    if let Ok(db) = std::env::var("CHIPTALLY_DB")
        && !db.is_empty()
    {
        cfg.db_path = db;
        sources.db_path = ValueSource::Env;
    }
    if let Ok(sb) = std::env::var("CHIPTALLY_SB")
        && !sb.is_empty()
    {
        cfg.small_blind = sb
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid small blind".into()))?;
        sources.small_blind = ValueSource::Env;
    }
    if let Ok(bb) = std::env::var("CHIPTALLY_BB")
        && !bb.is_empty()
    {
        cfg.big_blind = bb
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid big blind".into()))?;
        sources.big_blind = ValueSource::Env;
    }
    if let Ok(ms) = std::env::var("CHIPTALLY_ADVANCE_MS")
        && !ms.is_empty()
    {
        cfg.advance_delay_ms = ms
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid advance delay".into()))?;
        sources.advance_delay_ms = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    db_path: Option<String>,
    #[serde(default)]
    small_blind: Option<u64>,
    #[serde(default)]
    big_blind: Option<u64>,
    #[serde(default)]
    advance_delay_ms: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.small_blind == 0 || cfg.big_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: blinds must be >=1".into(),
        ));
    }
    if cfg.small_blind > cfg.big_blind {
        return Err(ConfigError::Invalid(
            "Invalid configuration: small blind must not exceed big blind".into(),
        ));
    }
    if cfg.db_path.is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: db_path must not be empty".into(),
        ));
    }
    Ok(())
}
