//! # Static Path Resolution
//!
//! Declares, ahead of request time, which product pages are pre-rendered at
//! build time and what happens for identifiers outside that list. The plan is
//! loaded from `config/prerender.toml`; a missing config means nothing is
//! pre-rendered and unknown ids are generated on demand.

use serde::{Deserialize, Serialize};

/// What to do for a product id that was not pre-rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Unlisted ids are a hard not-found
    NeverGenerate,
    /// Generate on first request; the requester is answered immediately with
    /// a loading placeholder
    GenerateWithoutWaiting,
    /// Generate on first request; the requester waits for the finished page
    #[default]
    GenerateBlocking,
}

/// Which product pages to pre-render, and the policy for the rest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticPathPlan {
    /// Product ids generated at build time
    #[serde(default)]
    pub prerender: Vec<String>,

    /// Policy for ids outside `prerender`
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

impl StaticPathPlan {
    /// Plan with nothing pre-rendered and blocking on-demand generation
    pub fn on_demand() -> Self {
        Self::default()
    }

    /// Load a plan from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
