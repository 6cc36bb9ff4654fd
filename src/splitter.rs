//! Splits one five-part social completion into per-platform posts.
//!
//! The model is asked to number its outputs `1)` to `5)`. Sections are found
//! by that number, or by platform name when the number is missing, and
//! always end at the next numbered line.

use crate::consts::{ELLIPSIS, X_POST_BUDGET, X_POST_MIN_KEPT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    X,
    Instagram,
    YouTube,
    Facebook,
    TikTok,
}

impl Platform {
    /// In the order the prompt asks for them.
    pub const ALL: [Platform; 5] = [
        Platform::X,
        Platform::Instagram,
        Platform::YouTube,
        Platform::Facebook,
        Platform::TikTok,
    ];

    pub fn ordinal(self) -> usize {
        match self {
            Platform::X => 1,
            Platform::Instagram => 2,
            Platform::YouTube => 3,
            Platform::Facebook => 4,
            Platform::TikTok => 5,
        }
    }

    pub fn ordinal_marker(self) -> &'static str {
        ORDINAL_MARKERS[self.ordinal() - 1]
    }

    /// Lowercase line prefix used when the model dropped the numbering.
    pub fn name_marker(self) -> &'static str {
        match self {
            Platform::X => "x/twitter",
            Platform::Instagram => "instagram",
            Platform::YouTube => "youtube",
            Platform::Facebook => "facebook",
            Platform::TikTok => "tiktok",
        }
    }
}

const ORDINAL_MARKERS: [&str; 5] = ["1)", "2)", "3)", "4)", "5)"];

/// The five bodies. A section that was not found is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SocialSections {
    pub x_post: String,
    pub ig_caption: String,
    pub yt_description: String,
    pub facebook: String,
    pub tiktok: String,
}

impl SocialSections {
    pub fn get(&self, platform: Platform) -> &str {
        match platform {
            Platform::X => &self.x_post,
            Platform::Instagram => &self.ig_caption,
            Platform::YouTube => &self.yt_description,
            Platform::Facebook => &self.facebook,
            Platform::TikTok => &self.tiktok,
        }
    }

    fn set(&mut self, platform: Platform, body: String) {
        let slot = match platform {
            Platform::X => &mut self.x_post,
            Platform::Instagram => &mut self.ig_caption,
            Platform::YouTube => &mut self.yt_description,
            Platform::Facebook => &mut self.facebook,
            Platform::TikTok => &mut self.tiktok,
        };
        *slot = body;
    }
}

/// Parse a completion into its five sections.
pub fn split_sections(text: &str) -> SocialSections {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut sections = SocialSections::default();
    for platform in Platform::ALL {
        sections.set(platform, pick(&lines, platform));
    }
    sections
}

fn pick(lines: &[&str], platform: Platform) -> String {
    // A numbered line is a header; the body starts below it.
    let numbered = find(lines, platform.ordinal_marker())
        .map(|i| body(lines, i + 1))
        .unwrap_or_default();
    if !numbered.is_empty() {
        return numbered;
    }
    // A line found by platform name is already content.
    find(lines, platform.name_marker())
        .map(|i| body(lines, i))
        .unwrap_or_default()
}

fn find(lines: &[&str], marker: &str) -> Option<usize> {
    lines
        .iter()
        .position(|line| line.to_lowercase().starts_with(marker))
}

fn body(lines: &[&str], from: usize) -> String {
    lines
        .get(from..)
        .unwrap_or_default()
        .iter()
        .take_while(|line| !is_ordinal_line(line))
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn is_ordinal_line(line: &str) -> bool {
    ORDINAL_MARKERS.iter().any(|m| line.starts_with(m))
}

/// Fit a post into the X character budget.
///
/// Text within budget comes back unchanged. Longer text is cut to one short
/// of the budget, pulled back to the last space if that keeps more than
/// [`X_POST_MIN_KEPT`] characters, and finished with an ellipsis.
pub fn truncate_for_x(text: &str) -> String {
    if text.chars().count() <= X_POST_BUDGET {
        return text.to_string();
    }

    let head: String = text.chars().take(X_POST_BUDGET - 1).collect();
    let mut slice = head.trim();
    if let Some(space) = slice.rfind(' ')
        && slice[..space].chars().count() > X_POST_MIN_KEPT
    {
        slice = slice[..space].trim();
    }
    format!("{slice}{ELLIPSIS}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NUMBERED: &str = "Here you go!\n\
        1) X/Twitter\n\
        Week 3 chaos 🔥 #LSS\n\
        2) Instagram caption\n\
        Week 3 was wild.\n\
        Who's still standing?\n\
        #LSS #Survivor\n\
        3) YouTube description\n\
        Para one.\n\
        \n\
        Para two. Vote now.\n\
        4) Facebook post\n\
        Friendly words. Vote now. #LSS\n\
        5) TikTok caption\n\
        Chaos reigns #LSS #fyp";

    #[test]
    fn numbered_sections_split_cleanly() {
        let s = split_sections(NUMBERED);
        assert_eq!(s.x_post, "Week 3 chaos 🔥 #LSS");
        assert_eq!(s.ig_caption, "Week 3 was wild.\nWho's still standing?\n#LSS #Survivor");
        assert_eq!(s.yt_description, "Para one.\n\nPara two. Vote now.");
        assert_eq!(s.facebook, "Friendly words. Vote now. #LSS");
        assert_eq!(s.tiktok, "Chaos reigns #LSS #fyp");
    }

    #[test]
    fn lines_are_trimmed() {
        let s = split_sections("1) X\n   hello   \n2) IG\n\tcap\t");
        assert_eq!(s.x_post, "hello");
        assert_eq!(s.ig_caption, "cap");
    }

    #[test]
    fn crlf_line_endings() {
        let s = split_sections("1) X\r\nhello\r\n2) IG\r\ncap\r\n");
        assert_eq!(s.x_post, "hello");
        assert_eq!(s.ig_caption, "cap");
    }

    #[test]
    fn name_fallback_stops_at_next_number() {
        let s = split_sections(
            "1) A\nfoo\n2) B\nbar\nInstagram caption here\n4) D\nbaz\n5) E\nqux",
        );
        assert_eq!(s.x_post, "foo");
        assert_eq!(s.yt_description, "");
        assert_eq!(s.facebook, "baz");
        assert_eq!(s.tiktok, "qux");
        // Section 3 is missing, so nothing names "youtube"; "instagram" is
        // section 2's name but section 2 was found by number.
        assert_eq!(s.ig_caption, "bar\nInstagram caption here");
    }

    #[test]
    fn missing_number_falls_back_to_name() {
        let s = split_sections(
            "1) A\nfoo\n2) B\nbar\nYouTube caption here\n4) D\nbaz\n5) E\nqux",
        );
        assert_eq!(s.yt_description, "YouTube caption here");
        assert!(!s.yt_description.contains("bar"));
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let s = split_sections("TIKTOK: dance #fyp\n1) X\npost");
        assert_eq!(s.tiktok, "TIKTOK: dance #fyp");
        assert_eq!(s.x_post, "post");
    }

    #[test]
    fn empty_numbered_section_falls_back_to_name() {
        let s = split_sections("1) X\n2) IG\ncap\nx/twitter: hot take");
        assert_eq!(s.x_post, "x/twitter: hot take");
        assert_eq!(s.ig_caption, "cap\nx/twitter: hot take");
    }

    #[test]
    fn ordinal_must_start_the_line() {
        let s = split_sections("see part 1) below\nstuff\n2) IG\ncap");
        assert_eq!(s.x_post, "");
        assert_eq!(s.ig_caption, "cap");
    }

    #[test]
    fn without_numbers_sections_run_to_end() {
        let s = split_sections("Instagram: cap\nFacebook: post");
        assert_eq!(s.ig_caption, "Instagram: cap\nFacebook: post");
        assert_eq!(s.facebook, "Facebook: post");
        assert_eq!(s.x_post, "");
    }

    #[test]
    fn empty_input_gives_empty_sections() {
        assert_eq!(split_sections(""), SocialSections::default());
    }

    #[test]
    fn first_marker_wins() {
        let s = split_sections("1) X\nfirst\n1) X again\nsecond");
        assert_eq!(s.x_post, "first");
    }

    #[test]
    fn get_matches_fields() {
        let s = split_sections(NUMBERED);
        for platform in Platform::ALL {
            assert!(!s.get(platform).is_empty(), "{platform:?} empty");
        }
        assert_eq!(s.get(Platform::TikTok), s.tiktok);
    }

    #[test]
    fn markers_line_up_with_ordinals() {
        for (i, platform) in Platform::ALL.iter().enumerate() {
            assert_eq!(platform.ordinal(), i + 1);
            assert_eq!(platform.ordinal_marker(), format!("{})", i + 1));
        }
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_for_x("short post"), "short post");
        assert_eq!(truncate_for_x(""), "");
        let exact = "a".repeat(X_POST_BUDGET);
        assert_eq!(truncate_for_x(&exact), exact);
    }

    #[test]
    fn hard_cut_without_late_space() {
        let text = "a".repeat(300);
        let out = truncate_for_x(&text);
        assert_eq!(out, format!("{}…", "a".repeat(279)));
        assert_eq!(out.chars().count(), 280);
    }

    #[test]
    fn early_space_does_not_count() {
        let text = format!("{} {}", "a".repeat(150), "b".repeat(149));
        assert_eq!(text.chars().count(), 300);
        let out = truncate_for_x(&text);
        assert_eq!(out.chars().count(), 280);
        assert!(out.ends_with("b…"));
    }

    #[test]
    fn space_exactly_at_threshold_does_not_count() {
        let text = format!("{} {}", "a".repeat(200), "b".repeat(99));
        let out = truncate_for_x(&text);
        assert_eq!(out.chars().count(), 280);
    }

    #[test]
    fn backtracks_to_late_space() {
        let text = format!("{} {}", "a".repeat(250), "b".repeat(49));
        assert_eq!(text.chars().count(), 300);
        assert_eq!(truncate_for_x(&text), format!("{}…", "a".repeat(250)));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "é".repeat(300);
        let out = truncate_for_x(&text);
        assert_eq!(out.chars().count(), 280);
    }

    proptest! {
        #[test]
        fn truncate_is_idempotent(s in "\\PC{0,400}") {
            let once = truncate_for_x(&s);
            prop_assert_eq!(truncate_for_x(&once), once);
        }

        #[test]
        fn truncate_respects_budget(s in "[a-z ]{0,600}") {
            prop_assert!(truncate_for_x(&s).chars().count() <= X_POST_BUDGET);
        }

        #[test]
        fn numbered_bodies_round_trip(bodies in proptest::collection::vec("[a-z][a-z ]{0,20}[a-z]", 5)) {
            let text = bodies
                .iter()
                .enumerate()
                .map(|(i, b)| format!("{}) header\n{}", i + 1, b))
                .collect::<Vec<_>>()
                .join("\n");
            let s = split_sections(&text);
            for (platform, expected) in Platform::ALL.iter().zip(&bodies) {
                prop_assert_eq!(s.get(*platform), expected.as_str());
            }
        }
    }
}
