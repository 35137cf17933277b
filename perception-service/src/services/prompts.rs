//! Prompt text and fallback replies for the AI endpoints.

pub const ASSISTANT_SYSTEM_PROMPT: &str = "You are Perception, an accessibility assistant built into a browser extension. \
Help users browse the web more comfortably. When it helps, recommend the extension's features: \
Focus Mode, Motion Blocker, Contrast Control, Larger Click Targets, Text Simplification, \
Read Aloud and Button Targeting. Keep answers short and practical.";

pub const ALT_TEXT_SYSTEM_PROMPT: &str = "You are an expert at creating descriptive alt text for images to help visually impaired users. \
Provide clear, concise descriptions that convey the essential information and context of the image.";

pub const ALT_TEXT_USER_PROMPT: &str = "Please provide descriptive alt text for this image.";

pub const ALT_TEXT_MAX_TOKENS: u32 = 300;
pub const ALT_TEXT_FALLBACK: &str = "Image description unavailable";

pub const CHAT_FALLBACK: &str = "I apologize, but I couldn't generate a response.";

pub const SIMPLIFY_TEMPERATURE: f32 = 0.3;
pub const SIMPLIFY_MAX_TOKENS: u32 = 1000;

pub fn simplify_system_prompt(grade_band: &str) -> String {
    format!(
        "You are an expert at rewriting text to be more accessible. Rewrite the provided text to match a {} reading level. \
Use simple vocabulary, short sentences, and clear explanations. Maintain the core meaning and important information.",
        grade_band
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplify_prompt_names_grade_band() {
        let prompt = simplify_system_prompt("6th-8th grade");
        assert!(prompt.contains("match a 6th-8th grade reading level"));
    }
}
