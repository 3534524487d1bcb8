//! Intent classification using keyword tables.
//!
//! Deterministic substring matching over cleaned text. Categories are scanned
//! in declaration order and the first one with any keyword hit wins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Security topic a user message is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Phishing, scams, fraudulent email
    Phishing,
    /// Passwords, logins, credentials
    Password,
    /// Viruses, ransomware, trojans, worms
    Malware,
    /// Firewalls, Wi-Fi, routers, DDoS
    Network,
    /// Fallback, never matched by keywords
    General,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Category {
    /// Keyword-matched categories, in match priority order.
    pub const ROUTED: [Category; 4] = [
        Category::Phishing,
        Category::Password,
        Category::Malware,
        Category::Network,
    ];

    /// Every category, fallback last.
    #[allow(dead_code)]
    pub const ALL: [Category; 5] = [
        Category::Phishing,
        Category::Password,
        Category::Malware,
        Category::Network,
        Category::General,
    ];

    /// Returns the lowercase label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Category::Phishing => "phishing",
            Category::Password => "password",
            Category::Malware => "malware",
            Category::Network => "network",
            Category::General => "general",
        }
    }

    /// Keywords that select this category. Empty for `General`.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Phishing => PHISHING_KEYWORDS,
            Category::Password => PASSWORD_KEYWORDS,
            Category::Malware => MALWARE_KEYWORDS,
            Category::Network => NETWORK_KEYWORDS,
            Category::General => &[],
        }
    }
}

const PHISHING_KEYWORDS: &[&str] = &["phish", "scam", "fake email", "fraud"];
const PASSWORD_KEYWORDS: &[&str] = &["password", "login", "credentials", "passphrase"];
const MALWARE_KEYWORDS: &[&str] = &["virus", "malware", "ransomware", "trojan", "worm"];
const NETWORK_KEYWORDS: &[&str] = &["network", "firewall", "wifi", "router", "ddos"];

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentResult {
    /// Detected category
    pub category: Category,
    /// Keyword that decided the category, `None` on fallback
    pub matched_keyword: Option<&'static str>,
}

impl IntentResult {
    fn fallback() -> Self {
        Self {
            category: Category::General,
            matched_keyword: None,
        }
    }

    /// True if no keyword matched
    #[allow(dead_code)]
    pub fn is_fallback(&self) -> bool {
        self.matched_keyword.is_none()
    }
}

/// Classify cleaned text, reporting the keyword that matched.
///
/// Matching is plain substring containment, so a keyword inside a larger word
/// ("passwordless") still counts.
pub fn classify_detailed(cleaned: &str) -> IntentResult {
    for category in Category::ROUTED {
        if let Some(keyword) = category
            .keywords()
            .iter()
            .copied()
            .find(|keyword| cleaned.contains(keyword))
        {
            return IntentResult {
                category,
                matched_keyword: Some(keyword),
            };
        }
    }

    IntentResult::fallback()
}

/// Classify cleaned text into a category, `General` when nothing matches.
#[allow(dead_code)]
pub fn classify(cleaned: &str) -> Category {
    classify_detailed(cleaned).category
}
