/// Extension features the assistant may recommend.
pub const FEATURE_NAMES: [&str; 7] = [
    "Focus Mode",
    "Motion Blocker",
    "Contrast Control",
    "Larger Click Targets",
    "Text Simplification",
    "Read Aloud",
    "Button Targeting",
];

/// Feature names mentioned in `reply`, case-insensitively, in catalogue order.
pub fn extract(reply: &str) -> Vec<String> {
    let haystack = reply.to_lowercase();
    FEATURE_NAMES
        .iter()
        .filter(|name| haystack.contains(&name.to_lowercase()))
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively() {
        let found = extract("Try FOCUS MODE, or maybe the read aloud option.");
        assert_eq!(found, vec!["Focus Mode", "Read Aloud"]);
    }

    #[test]
    fn no_mentions_yields_empty() {
        assert!(extract("Sure, happy to help.").is_empty());
    }
}
