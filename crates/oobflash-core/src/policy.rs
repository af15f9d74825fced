use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{RequestContext, normalize_header_name};

/// Full page reload.
pub const HX_REFRESH: &str = "hx-refresh";
/// Client-driven redirect.
pub const HX_REDIRECT: &str = "hx-redirect";
/// Client-side relocation without a full reload.
pub const HX_LOCATION: &str = "hx-location";

pub const DEFAULT_OVERRIDE_HEADERS: [&str; 3] = [HX_REFRESH, HX_REDIRECT, HX_LOCATION];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "header", rename_all = "snake_case")]
pub enum InjectionOutcome {
    Injected,
    FullNavigation,
    NavigationOverride(String),
    NothingPending,
}

impl InjectionOutcome {
    #[must_use]
    pub fn is_injected(&self) -> bool {
        matches!(self, Self::Injected)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Injected => "injected",
            Self::FullNavigation => "full_navigation",
            Self::NavigationOverride(_) => "navigation_override",
            Self::NothingPending => "nothing_pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionPolicy {
    override_headers: BTreeSet<String>,
}

impl Default for InjectionPolicy {
    fn default() -> Self {
        Self {
            override_headers: DEFAULT_OVERRIDE_HEADERS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }
}

impl InjectionPolicy {
    /// Policy recognizing the default override family plus `extra` header names.
    #[must_use]
    pub fn with_extra_override_headers<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut policy = Self::default();
        policy.override_headers.extend(
            extra
                .into_iter()
                .map(|name| normalize_header_name(name.as_ref()))
                .filter(|name| !name.is_empty()),
        );
        policy
    }

    pub fn override_headers(&self) -> impl Iterator<Item = &str> {
        self.override_headers.iter().map(String::as_str)
    }

    /// Rules short-circuit in order: full navigation, navigation override,
    /// nothing pending. Notification content is never consulted.
    #[must_use]
    pub fn evaluate(&self, ctx: &RequestContext, has_pending: bool) -> InjectionOutcome {
        if !ctx.is_partial_update {
            return InjectionOutcome::FullNavigation;
        }
        if let Some(header) = self
            .override_headers
            .iter()
            .find(|name| ctx.response_headers.contains(*name))
        {
            return InjectionOutcome::NavigationOverride(header.clone());
        }
        if !has_pending {
            return InjectionOutcome::NothingPending;
        }
        InjectionOutcome::Injected
    }

    #[must_use]
    pub fn decide(&self, ctx: &RequestContext, has_pending: bool) -> bool {
        self.evaluate(ctx, has_pending).is_injected()
    }
}

/// Decision under the default override header family.
#[must_use]
pub fn decide(ctx: &RequestContext, has_pending: bool) -> bool {
    InjectionPolicy::default().decide(ctx, has_pending)
}
