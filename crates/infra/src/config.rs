//! Configuration loading and representation.
//!
//! Values come from `STAFFHUB_*` environment variables with dev defaults.

use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use staffhub_auth::{ClinicLocation, Role};
use staffhub_directory::VisibilityPolicy;

const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    /// Upper bound for every remote store call.
    pub request_timeout: Duration,
    pub policy: VisibilityPolicy,
    /// Optional JSON seed imported into the in-memory store at startup.
    pub seed_file: Option<PathBuf>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            request_timeout: Duration::from_millis(5_000),
            policy: VisibilityPolicy::default(),
            seed_file: None,
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let jwt_secret = match lookup("STAFFHUB_JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("STAFFHUB_JWT_SECRET not set; using insecure dev default");
                defaults.jwt_secret
            }
        };

        let bind_addr = match lookup("STAFFHUB_BIND_ADDR") {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("STAFFHUB_BIND_ADDR is not a socket address: {addr}"))?,
            None => defaults.bind_addr,
        };

        let request_timeout = match lookup("STAFFHUB_REQUEST_TIMEOUT_MS") {
            Some(ms) => Duration::from_millis(
                ms.parse()
                    .with_context(|| format!("STAFFHUB_REQUEST_TIMEOUT_MS is not a number: {ms}"))?,
            ),
            None => defaults.request_timeout,
        };

        let mut policy = defaults.policy;
        if let Some(marker) = lookup("STAFFHUB_ALL_LOCATIONS").filter(|m| !m.trim().is_empty()) {
            policy.all_locations = ClinicLocation::new(marker.trim().to_string());
        }
        if let Some(list) = lookup("STAFFHUB_LOCATION_SCOPED_ROLES") {
            policy.location_scoped_roles = parse_roles(&list)?;
        }

        let seed_file = lookup("STAFFHUB_SEED_FILE")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            jwt_secret,
            bind_addr,
            request_timeout,
            policy,
            seed_file,
        })
    }
}

fn parse_roles(list: &str) -> anyhow::Result<BTreeSet<Role>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Role>().context("STAFFHUB_LOCATION_SCOPED_ROLES"))
        .collect()
}
