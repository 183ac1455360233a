//! Tag Category Registry — maps signals to groups and display metadata.
//!
//! Pure and stateless. Group membership is defined by the two source
//! lists below; if a signal ever appears in both, necessary wins — a
//! signal is never downgraded to revocable.

use crate::signal::{Group, SignalId};

/// Signals the site cannot function without. Never user-revocable.
pub const NECESSARY_SIGNALS: &[SignalId] = &[
    SignalId::SecurityStorage,
    SignalId::FunctionalityStorage,
    SignalId::PersonalizationStorage,
];

/// Signals under user control, default-denied until explicitly granted.
pub const TRACKING_SIGNALS: &[SignalId] = &[
    SignalId::AdStorage,
    SignalId::AnalyticsStorage,
    SignalId::AdPersonalization,
    SignalId::AdUserData,
];

/// Display metadata for one signal.
#[derive(Clone, Copy, Debug)]
pub struct SignalDetails {
    pub label: &'static str,
    pub description: &'static str,
}

/// The group a signal belongs to. Necessary membership is checked first,
/// so a double-listed signal resolves to `Group::Necessary`.
pub fn group_of(id: SignalId) -> Group {
    if NECESSARY_SIGNALS.contains(&id) {
        Group::Necessary
    } else {
        Group::Tracking
    }
}

/// The ordered signals in a group.
pub fn signals_in(group: Group) -> &'static [SignalId] {
    match group {
        Group::Necessary => NECESSARY_SIGNALS,
        Group::Tracking => TRACKING_SIGNALS,
    }
}

/// Display metadata for a signal.
pub fn details(id: SignalId) -> &'static SignalDetails {
    match id {
        SignalId::SecurityStorage => &SignalDetails {
            label: "Security Related Cookies",
            description: "Cookies necessary for securely authenticating users.",
        },
        SignalId::FunctionalityStorage => &SignalDetails {
            label: "Functionality Related Cookies",
            description: "Cookies for measuring and improving site performance.",
        },
        SignalId::PersonalizationStorage => &SignalDetails {
            label: "Personalization Related Cookies",
            description: "Cookies for enhanced functionality and personalization.",
        },
        SignalId::AdStorage => &SignalDetails {
            label: "Personalized Marketing Related Cookies",
            description: "Cookies for targeted content delivery based on interests.",
        },
        SignalId::AnalyticsStorage => &SignalDetails {
            label: "Analytics Related Cookies",
            description: "Cookies for measuring and improving site performance.",
        },
        SignalId::AdPersonalization => &SignalDetails {
            label: "Personalization Related Cookies",
            description: "Cookies for enhanced functionality and personalization.",
        },
        SignalId::AdUserData => &SignalDetails {
            label: "User Data Related Cookies",
            description: "Cookies for targeted content delivery based on interests.",
        },
    }
}

/// Short copy shown next to the group toggle.
pub fn group_description(group: Group) -> &'static str {
    match group {
        Group::Necessary => "These cookies are essential for the website to function",
        Group::Tracking => "These cookies help us to improve your experience on our website",
    }
}
