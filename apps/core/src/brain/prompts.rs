//! System prompts per category.

use super::intent::Category;

/// Returns the system prompt attached to messages of `category`.
pub fn prompt_for(category: Category) -> &'static str {
    match category {
        Category::Phishing => "You are a cybersecurity expert specialized in phishing attacks.",
        Category::Password => {
            "You are a cybersecurity assistant skilled at password security and authentication."
        }
        Category::Malware => {
            "You are a malware analyst helping users understand and prevent virus threats."
        }
        Category::Network => {
            "You are a network security expert helping with firewall and Wi-Fi safety."
        }
        Category::General => "You are a general cybersecurity assistant.",
    }
}
