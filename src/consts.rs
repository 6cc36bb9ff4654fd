//! Project-wide constants.

/// Default OpenAI model when neither the environment nor the request names one.
pub const DEFAULT_MODEL: &str = "gpt-5";

/// Default listen address for the HTTP server.
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

pub const OPENAI_API_BASE: &str = "https://api.openai.com";
pub const NOTION_API_BASE: &str = "https://api.notion.com";
pub const NOTION_VERSION: &str = "2022-06-28";

/// Notion rejects rich-text runs longer than this.
pub const NOTION_RUN_LIMIT: usize = 2000;

/// Single-choice field flipped once a handler has written its output.
pub const STATUS_FIELD: &str = "Status";
pub const STATUS_DONE: &str = "Replied";

/// Character budget for the X/Twitter post.
pub const X_POST_BUDGET: usize = 280;

/// A space further in than this is a good enough place to cut an X post.
pub const X_POST_MIN_KEPT: usize = 200;

pub const ELLIPSIS: char = '…';

/// Record field names, as they appear on the Notion pages.
pub mod fields {
    pub const USER_QUESTION: &str = "User Question";
    pub const GRID_REPLY: &str = "Grid Reply";

    pub const WEEK: &str = "Week";
    pub const STANDINGS_SUMMARY: &str = "Standings Summary";
    pub const BIGGEST_UPSET: &str = "Biggest Upset";
    pub const ELIMINATED: &str = "Eliminated";
    pub const STILL_ALIVE: &str = "Still Alive";
    pub const NOTES: &str = "Notes";
    pub const RECAP: &str = "Recap";

    pub const HASHTAGS: &str = "Hashtags";
    pub const CTA: &str = "CTA";
    pub const X_POST: &str = "X Post";
    pub const IG_CAPTION: &str = "IG Caption";
    pub const YT_DESCRIPTION: &str = "YT Description";
    pub const FACEBOOK_POST: &str = "Facebook Post";
    pub const TIKTOK_CAPTION: &str = "TikTok Caption";
}
