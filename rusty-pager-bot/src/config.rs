use std::time::Duration;

use anyhow::{Context as _, bail};
use rusty_pager::{EndPolicy, PaginationConfig};

pub const IDLE_TIMEOUT_VAR: &str = "PAGER_IDLE_TIMEOUT_MS";
pub const MAX_ACTIVATIONS_VAR: &str = "PAGER_MAX_ACTIVATIONS";
pub const END_POLICY_VAR: &str = "PAGER_END_POLICY";
pub const OWNER_INDEPENDENT_VAR: &str = "PAGER_OWNER_INDEPENDENT";

/// Read pagination tunables from the process environment.
pub fn pagination_from_env() -> anyhow::Result<PaginationConfig> {
    pagination_from(|name| std::env::var(name).ok())
}

/// Build a [`PaginationConfig`] from a variable lookup.
///
/// Unset or blank variables keep their defaults; anything unparsable fails.
pub fn pagination_from<F>(lookup: F) -> anyhow::Result<PaginationConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| {
        lookup(name)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
    };
    let mut config = PaginationConfig::default();

    if let Some(raw) = read(IDLE_TIMEOUT_VAR) {
        let millis = raw
            .parse::<u64>()
            .with_context(|| format!("{IDLE_TIMEOUT_VAR} must be milliseconds, got `{raw}`"))?;
        config.idle_timeout = Duration::from_millis(millis);
    }

    if let Some(raw) = read(MAX_ACTIVATIONS_VAR) {
        let max = raw
            .parse::<usize>()
            .with_context(|| format!("{MAX_ACTIVATIONS_VAR} must be a count, got `{raw}`"))?;
        config.max_activations = (max > 0).then_some(max);
    }

    if let Some(raw) = read(END_POLICY_VAR) {
        config.end_policy = raw
            .parse::<EndPolicy>()
            .with_context(|| format!("invalid {END_POLICY_VAR}"))?;
    }

    if let Some(raw) = read(OWNER_INDEPENDENT_VAR) {
        config.owner_independent = match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => bail!("{OWNER_INDEPENDENT_VAR} must be a boolean, got `{raw}`"),
        };
    }

    config
        .validate()
        .with_context(|| format!("invalid {IDLE_TIMEOUT_VAR}"))?;

    Ok(config)
}
