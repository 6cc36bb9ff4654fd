use super::{Prompt, system_or};

const INTRO: &str =
    "You are Grid. Turn a weekly Last Squad Standing recap into FIVE social-ready outputs:";
const OUTPUTS: &[&str] = &[
    "X/Twitter (<=280 chars, punchy, 1-2 emojis, include a single hashtag if provided, no links).",
    "Instagram caption (2-4 short lines, 3-6 hashtags max, include CTA if provided).",
    "YouTube description (2 short paragraphs, include CTA and hashtags if provided).",
    "Facebook post (2-4 sentences, friendly tone, include CTA and up to 3 hashtags).",
    "TikTok caption (1-2 short lines, 2-4 hashtags max).",
];
const TONE: &str = "Tone: hype, clean, high-energy sports voice with a dash of lyrical flair. Avoid overusing emojis or hashtags.";
const BREVITY: &str = "Brevity: keep each output tight and platform-appropriate.";

/// The numbered five-output instruction. The numbering is what the
/// splitter keys on.
pub fn social_system_prompt() -> String {
    let outputs = OUTPUTS
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}) {}", i + 1, line))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{INTRO}\n{outputs}\n\n{TONE}\n{BREVITY}")
}

pub fn build_social_prompt(
    recap: &str,
    hashtags: &str,
    cta: &str,
    system_override: Option<&str>,
) -> Prompt {
    Prompt {
        system: system_or(system_override, &social_system_prompt()),
        user: format!("Recap:\n{recap}\n\nOptional Hashtags: {hashtags}\nOptional CTA: {cta}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::Platform;

    #[test]
    fn system_prompt_numbers_every_platform() {
        let prompt = social_system_prompt();
        for platform in Platform::ALL {
            let line = prompt
                .lines()
                .find(|l| l.starts_with(platform.ordinal_marker()))
                .unwrap();
            assert!(line.to_lowercase().contains(platform.name_marker()), "{line}");
        }
    }

    #[test]
    fn user_prompt_layout() {
        let prompt = build_social_prompt("Week 3 was wild.", "#LSS", "Vote now", None);
        assert_eq!(
            prompt.user,
            "Recap:\nWeek 3 was wild.\n\nOptional Hashtags: #LSS\nOptional CTA: Vote now"
        );
    }

    #[test]
    fn empty_optionals_still_labeled() {
        let prompt = build_social_prompt("r", "", "", None);
        assert!(prompt.user.ends_with("Optional Hashtags: \nOptional CTA: "));
    }
}
