use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{FlashError, Result};
use crate::policy::InjectionPolicy;

pub const CONTAINER_ID_ENV: &str = "OOBFLASH_CONTAINER_ID";
pub const SWAP_ENV: &str = "OOBFLASH_SWAP";
pub const DISMISS_MS_ENV: &str = "OOBFLASH_DISMISS_MS";
pub const TRANSITION_MS_ENV: &str = "OOBFLASH_TRANSITION_MS";
pub const EXTRA_OVERRIDE_HEADERS_ENV: &str = "OOBFLASH_EXTRA_OVERRIDE_HEADERS";
pub const MAX_BODY_BYTES_ENV: &str = "OOBFLASH_MAX_BODY_BYTES";

pub const DEFAULT_CONTAINER_ID: &str = "notifications";
pub const DEFAULT_DISMISS_MS: u64 = 2_000;
pub const DEFAULT_TRANSITION_MS: u64 = 300;
pub const DEFAULT_MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// `hx-swap-oob` value placed on the out-of-band container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwapStrategy {
    /// Replace the existing container wholesale.
    True,
    #[default]
    BeforeEnd,
    AfterBegin,
    InnerHtml,
    OuterHtml,
}

impl SwapStrategy {
    #[must_use]
    pub const fn as_attr(self) -> &'static str {
        match self {
            Self::True => "true",
            Self::BeforeEnd => "beforeend",
            Self::AfterBegin => "afterbegin",
            Self::InnerHtml => "innerHTML",
            Self::OuterHtml => "outerHTML",
        }
    }
}

impl fmt::Display for SwapStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

impl FromStr for SwapStrategy {
    type Err = FlashError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Self::True),
            "beforeend" => Ok(Self::BeforeEnd),
            "afterbegin" => Ok(Self::AfterBegin),
            "innerhtml" => Ok(Self::InnerHtml),
            "outerhtml" => Ok(Self::OuterHtml),
            other => Err(FlashError::Config(format!("unsupported swap strategy: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashConfig {
    pub container_id: String,
    pub swap: SwapStrategy,
    pub dismiss_after: Duration,
    pub transition: Duration,
    pub extra_override_headers: Vec<String>,
    pub max_body_bytes: usize,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            swap: SwapStrategy::default(),
            dismiss_after: Duration::from_millis(DEFAULT_DISMISS_MS),
            transition: Duration::from_millis(DEFAULT_TRANSITION_MS),
            extra_override_headers: Vec::new(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl FlashConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable lookup. Unparseable numbers fall back
    /// to defaults; an unknown swap strategy or a bad container id is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let read_u64 = |name: &str| read(name).and_then(|raw| raw.parse::<u64>().ok());

        let swap = match read(SWAP_ENV) {
            Some(raw) => raw.parse()?,
            None => SwapStrategy::default(),
        };
        let config = Self {
            container_id: read(CONTAINER_ID_ENV).unwrap_or_else(|| DEFAULT_CONTAINER_ID.to_string()),
            swap,
            dismiss_after: Duration::from_millis(
                read_u64(DISMISS_MS_ENV)
                    .filter(|ms| *ms >= 1)
                    .unwrap_or(DEFAULT_DISMISS_MS),
            ),
            transition: Duration::from_millis(
                read_u64(TRANSITION_MS_ENV).unwrap_or(DEFAULT_TRANSITION_MS),
            ),
            extra_override_headers: read(EXTRA_OVERRIDE_HEADERS_ENV)
                .map(|raw| parse_header_list(&raw))
                .unwrap_or_default(),
            max_body_bytes: read(MAX_BODY_BYTES_ENV)
                .and_then(|raw| raw.parse::<usize>().ok())
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_element_id(&self.container_id) {
            return Err(FlashError::Config(format!(
                "container id must be a non-empty HTML id without whitespace or quotes: {:?}",
                self.container_id
            )));
        }
        if self.dismiss_after.is_zero() {
            return Err(FlashError::Config(
                "dismiss delay must be at least 1ms".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn policy(&self) -> InjectionPolicy {
        InjectionPolicy::with_extra_override_headers(&self.extra_override_headers)
    }
}

fn parse_header_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

fn is_valid_element_id(id: &str) -> bool {
    !id.is_empty()
        && !id
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>' | '&'))
}
