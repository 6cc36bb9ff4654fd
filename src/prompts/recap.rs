use super::{Prompt, system_or};

pub const RECAP_SYSTEM_PROMPT: &str = "You are Grid, writing weekly recaps for Last Squad Standing.
Tone: lyrical, hype, sports-announcer energy with clever wordplay.
Format: exactly 2 short paragraphs (5-7 sentences total).
Include: week number, the biggest upset (by name), the number eliminated, the number still alive, and one tease for next week.
Keep it clean and punchy. Avoid repetitive stats and avoid team over-hype; focus on story and drama.
Sign off with '— Grid' only if asked.";

/// Inputs for one weekly recap. Missing values render as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecapInputs {
    pub week: String,
    pub summary: String,
    pub biggest_upset: String,
    pub eliminated: String,
    pub alive: String,
    pub notes: String,
}

pub fn build_recap_prompt(inputs: &RecapInputs, system_override: Option<&str>) -> Prompt {
    let user = format!(
        "Create a Last Squad Standing recap.\n\
         Week: {}\n\
         Standings Summary: {}\n\
         Biggest Upset: {}\n\
         Eliminated: {}\n\
         Still Alive: {}\n\
         Notes: {}",
        inputs.week,
        inputs.summary,
        inputs.biggest_upset,
        inputs.eliminated,
        inputs.alive,
        inputs.notes
    );

    Prompt {
        system: system_or(system_override, RECAP_SYSTEM_PROMPT),
        user: user.trim().to_string(),
    }
}
