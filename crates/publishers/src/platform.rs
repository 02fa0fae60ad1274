//! Supported publishing destinations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A third-party destination a video can be published to.
///
/// The enum is closed on purpose: requests naming anything else are parsed
/// into [`PlatformTarget::Unsupported`] instead of silently falling through.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    Youtube,
    Tiktok,
    Instagram,
}

impl PlatformId {
    /// All supported platforms in fixed priority order. Discovery endpoints
    /// and the credential store iterate in this order so listings stay
    /// deterministic.
    pub const ALL: [PlatformId; 3] = [Self::Youtube, Self::Tiktok, Self::Instagram];

    /// Branded display name for user-facing messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Youtube => "YouTube",
            Self::Tiktok => "TikTok",
            Self::Instagram => "Instagram",
        }
    }

    /// Prefix used for environment-style configuration keys,
    /// e.g. `YOUTUBE_CLIENT_ID`.
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Self::Youtube => "YOUTUBE",
            Self::Tiktok => "TIKTOK",
            Self::Instagram => "INSTAGRAM",
        }
    }
}

/// A requested platform as named by the caller.
///
/// Callers pass free-form strings; anything outside [`PlatformId`] becomes an
/// explicit `Unsupported` target that the orchestrator reports back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformTarget {
    Known(PlatformId),
    Unsupported(String),
}

impl PlatformTarget {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<PlatformId>() {
            Ok(id) => Self::Known(id),
            Err(_) => Self::Unsupported(raw.to_string()),
        }
    }

    /// The identifier to report in a [`crate::PublishResult`] for this target.
    pub fn id_string(&self) -> String {
        match self {
            Self::Known(id) => id.to_string(),
            Self::Unsupported(raw) => raw.clone(),
        }
    }
}
