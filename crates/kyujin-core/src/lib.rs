//! Domain types and configuration for the job-posting extraction engine.
//!
//! Holds the canonical [`Record`], the per-site [`SiteConfig`] rules and
//! their loaders, the URL → site resolver, and environment-driven
//! [`AppConfig`].

pub mod app_config;
pub mod config;
pub mod error;
pub mod record;
pub mod site_config;
pub mod sites;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use record::{Field, Record, UnknownFieldError};
pub use site_config::{
    list_site_configs, load_site_config, load_site_config_or_default, parse_site_config,
    ExtractorKind, ExtractorSpec, LabelRowRule, SiteConfig, SiteConfigEntry,
};
pub use sites::{resolve_site, resolve_site_with, SiteDomain, DEFAULT_SITE_ID, KNOWN_SITES};
