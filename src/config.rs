use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::navigation::{Destination, HANDOFF_GRACE, NAVIGATION_DELAY};
use crate::repository::{DEFAULT_IDLE_TTL, DEFAULT_MAX_DRAFTS};

const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DOMAIN: &str = "localhost";
const DEFAULT_PRODUCTS_URL: &str = "/products";
const DEFAULT_DASHBOARD_URL: &str = "/dashboard";

/// Where the page navigates to and how long it waits first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationConfig {
    /// Product listing page, shown after publishing.
    pub products_url: String,
    /// Supplier dashboard, shown after saving a draft or going back.
    pub dashboard_url: String,
    /// Delay between a submission and the navigation that follows it.
    pub delay: Duration,
    /// How long a submitted draft waits for the browser to follow its
    /// navigation before it is discarded.
    pub handoff_grace: Duration,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            products_url: DEFAULT_PRODUCTS_URL.to_string(),
            dashboard_url: DEFAULT_DASHBOARD_URL.to_string(),
            delay: NAVIGATION_DELAY,
            handoff_grace: HANDOFF_GRACE,
        }
    }
}

impl NavigationConfig {
    pub fn url(&self, destination: Destination) -> &str {
        match destination {
            Destination::ProductListing => &self.products_url,
            Destination::Dashboard => &self.dashboard_url,
        }
    }
}

/// Server settings read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub domain: String,
    /// Secret used to sign session and flash cookies; random when unset.
    pub secret: Option<String>,
    pub navigation: NavigationConfig,
    /// Drafts untouched for longer than this are evicted.
    pub draft_idle_ttl: Duration,
    /// Maximum number of drafts held in memory at once.
    pub max_drafts: usize,
}

impl ServerConfig {
    /// Load the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load the configuration through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);
        let delay = parse_millis_or(&lookup, "NAVIGATION_DELAY_MS", NAVIGATION_DELAY);
        let handoff_grace = parse_millis_or(&lookup, "NAVIGATION_GRACE_MS", HANDOFF_GRACE);
        let draft_idle_ttl = Duration::from_secs(parse_or(
            &lookup,
            "DRAFT_IDLE_TTL_SECS",
            DEFAULT_IDLE_TTL.as_secs(),
        ));
        let max_drafts = parse_or(&lookup, "MAX_OPEN_DRAFTS", DEFAULT_MAX_DRAFTS);

        Self {
            address: lookup("ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            port,
            domain: lookup("DOMAIN").unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            secret: lookup("SECRET_KEY").filter(|secret| !secret.is_empty()),
            navigation: NavigationConfig {
                products_url: lookup("PRODUCTS_URL")
                    .unwrap_or_else(|| DEFAULT_PRODUCTS_URL.to_string()),
                dashboard_url: lookup("DASHBOARD_URL")
                    .unwrap_or_else(|| DEFAULT_DASHBOARD_URL.to_string()),
                delay,
                handoff_grace,
            },
            draft_idle_ttl,
            max_drafts,
        }
    }
}

/// Parse the variable `name`, warning and using `default` when it is invalid.
fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + fmt::Display,
{
    match lookup(name) {
        Some(value) => value.parse().unwrap_or_else(|_| {
            log::warn!("Invalid {name} `{value}`, using {default}");
            default
        }),
        None => default,
    }
}

fn parse_millis_or<F>(lookup: &F, name: &str, default: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    let millis = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    Duration::from_millis(parse_or(lookup, name, millis))
}
