//! Signal and group identifiers
//!
//! A signal is one trackable consent dimension (e.g. analytics storage
//! access). The set is fixed; wire names are the snake_case forms used by
//! tag-management consent APIs.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One trackable consent dimension.
///
/// Declaration order is registry order: necessary signals first, then
/// tracking signals. Ordered collections keyed by `SignalId` iterate in
/// this order, which keeps the serialized record canonical.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalId {
    SecurityStorage,
    FunctionalityStorage,
    PersonalizationStorage,
    AdStorage,
    AnalyticsStorage,
    AdPersonalization,
    AdUserData,
}

impl SignalId {
    /// Every known signal, in registry order.
    pub const ALL: [SignalId; 7] = [
        SignalId::SecurityStorage,
        SignalId::FunctionalityStorage,
        SignalId::PersonalizationStorage,
        SignalId::AdStorage,
        SignalId::AnalyticsStorage,
        SignalId::AdPersonalization,
        SignalId::AdUserData,
    ];

    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalId::SecurityStorage => "security_storage",
            SignalId::FunctionalityStorage => "functionality_storage",
            SignalId::PersonalizationStorage => "personalization_storage",
            SignalId::AdStorage => "ad_storage",
            SignalId::AnalyticsStorage => "analytics_storage",
            SignalId::AdPersonalization => "ad_personalization",
            SignalId::AdUserData => "ad_user_data",
        }
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SignalId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignalId::ALL
            .iter()
            .find(|id| id.as_str() == s)
            .copied()
            .ok_or_else(|| Error::unknown_signal(s))
    }
}

/// Classification of a signal: non-revocable or user-controlled.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Necessary,
    Tracking,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Necessary => write!(f, "necessary"),
            Group::Tracking => write!(f, "tracking"),
        }
    }
}
