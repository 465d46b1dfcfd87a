//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "rivista";
const DEFAULT_PAGE_SIZE: usize = 6;
const DEFAULT_POPULAR_LIMIT: usize = 5;
const DEFAULT_ARCHIVE_LIMIT: usize = 10;
const DEFAULT_RECENT_LIMIT: usize = 5;
const DEFAULT_RELATED_LIMIT: usize = 3;

/// Command-line arguments for the Rivista binary.
#[derive(Debug, Parser)]
#[command(name = "rivista", version, about = "Rivista blog reader")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "RIVISTA_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct Overrides {
    /// Override the post store base URL.
    #[arg(long = "store-url", env = "RIVISTA_STORE_URL", value_name = "URL")]
    pub store_url: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the listing page size.
    #[arg(long = "page-size", value_name = "COUNT")]
    pub page_size: Option<usize>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render the filtered, paginated listing.
    Feed(FeedArgs),
    /// Render the homepage surfaces.
    Home,
    /// Read one article, counting the view.
    Article(ArticleArgs),
    /// Editorial operations against the store.
    Admin(AdminArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct FeedArgs {
    /// Case-insensitive text filter over title, content and category.
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Exact category filter.
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Month filter as `YYYY-MM`; exclusive with search and category.
    #[arg(long, value_name = "PERIOD", conflicts_with_all = ["search", "category"])]
    pub archive: Option<String>,

    /// Page to display.
    #[arg(long, default_value_t = 1, value_name = "N")]
    pub page: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ArticleArgs {
    /// Post identifier.
    #[arg(value_name = "ID")]
    pub id: u64,
}

#[derive(Debug, Args, Clone)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum AdminCommand {
    /// List every stored post.
    List,
    /// Show corpus-wide counters.
    Stats,
    /// Publish a new post.
    Create(CreateArgs),
    /// Modify an existing post.
    Update(UpdateArgs),
    /// Remove a post.
    Delete(DeleteArgs),
}

#[derive(Debug, Args, Clone)]
pub struct CreateArgs {
    #[arg(long, value_name = "TEXT")]
    pub title: String,

    #[arg(long, value_name = "NAME")]
    pub category: String,

    #[arg(long, value_name = "TEXT")]
    pub content: String,

    #[arg(long, value_name = "TEXT")]
    pub excerpt: Option<String>,

    #[arg(long = "image-url", value_name = "URL")]
    pub image_url: Option<String>,

    /// Flag the post for the popularity ranking.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub popular: bool,
}

#[derive(Debug, Args, Clone)]
pub struct UpdateArgs {
    /// Post identifier.
    #[arg(value_name = "ID")]
    pub id: u64,

    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub content: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub excerpt: Option<String>,

    #[arg(long = "image-url", value_name = "URL")]
    pub image_url: Option<String>,

    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub popular: Option<bool>,
}

#[derive(Debug, Args, Clone)]
pub struct DeleteArgs {
    /// Post identifier.
    #[arg(value_name = "ID")]
    pub id: u64,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store: StoreSettings,
    pub logging: LoggingSettings,
    pub feed: FeedLimits,
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub base_url: Url,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone, Copy)]
pub struct FeedLimits {
    pub page_size: usize,
    pub popular_limit: usize,
    pub archive_limit: usize,
    pub recent_limit: usize,
    pub related_limit: usize,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("RIVISTA").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

    Settings::from_raw(raw)
}

pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    store: RawStoreSettings,
    logging: RawLoggingSettings,
    feed: RawFeedSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(url) = overrides.store_url.as_ref() {
            self.store.base_url = Some(url.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(size) = overrides.page_size {
            self.feed.page_size = Some(size);
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawStoreSettings {
    base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawFeedSettings {
    page_size: Option<usize>,
    popular_limit: Option<usize>,
    archive_limit: Option<usize>,
    recent_limit: Option<usize>,
    related_limit: Option<usize>,
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            store,
            logging,
            feed,
        } = raw;

        let store = build_store_settings(store)?;
        let logging = build_logging_settings(logging)?;
        let feed = build_feed_limits(feed)?;

        Ok(Self {
            store,
            logging,
            feed,
        })
    }
}

fn build_store_settings(store: RawStoreSettings) -> Result<StoreSettings, LoadError> {
    let raw_url = store.base_url.ok_or_else(|| {
        LoadError::invalid(
            "store.base_url",
            "value is required (set store.base_url or RIVISTA_STORE_URL)",
        )
    })?;

    let base_url = Url::parse(raw_url.trim())
        .map_err(|err| LoadError::invalid("store.base_url", format!("failed to parse: {err}")))?;

    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "store.base_url",
            format!("unsupported scheme `{}`", base_url.scheme()),
        ));
    }

    Ok(StoreSettings { base_url })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_feed_limits(feed: RawFeedSettings) -> Result<FeedLimits, LoadError> {
    let page_size = feed.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 {
        return Err(LoadError::invalid(
            "feed.page_size",
            "must be greater than zero",
        ));
    }

    Ok(FeedLimits {
        page_size,
        popular_limit: feed.popular_limit.unwrap_or(DEFAULT_POPULAR_LIMIT),
        archive_limit: feed.archive_limit.unwrap_or(DEFAULT_ARCHIVE_LIMIT),
        recent_limit: feed.recent_limit.unwrap_or(DEFAULT_RECENT_LIMIT),
        related_limit: feed.related_limit.unwrap_or(DEFAULT_RELATED_LIMIT),
    })
}
