//! Emoji + message helpers for consistent console copy.

pub mod emoji {
    pub const WIZARD: &str = "🧙";
    pub const CONDITION: &str = "📜";
    pub const STEP: &str = "🧩";
    pub const ERROR: &str = "❌";
    pub const CANCEL: &str = "🛑";
    pub const PARTY: &str = "🎉";
    pub const SUCCESS: &str = "✅";
}

pub fn with(emoji: &str, message: &str) -> String {
    format!("{} {}", emoji, message)
}
