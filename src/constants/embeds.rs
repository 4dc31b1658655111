use serenity::all::{Colour, CreateEmbed};

// ============================================================================
// Color Palette
// ============================================================================

/// Setup menus and help - Blurple
pub const PRIMARY_COLOR: Colour = Colour::from_rgb(88, 101, 242);

/// Channel created, action applied - Green
pub const SUCCESS_COLOR: Colour = Colour::from_rgb(87, 242, 135);

/// Failed command - Red
pub const ERROR_COLOR: Colour = Colour::from_rgb(237, 66, 69);

/// Bans and deletions - Amber
pub const WARNING_COLOR: Colour = Colour::from_rgb(254, 231, 92);

/// Listings - Slate
pub const INFO_COLOR: Colour = Colour::from_rgb(100, 116, 139);

/// Bullet point character
pub const BULLET: &str = "•";

// ============================================================================
// Embed Builders
// ============================================================================

pub fn standard_embed() -> CreateEmbed {
    CreateEmbed::new().color(PRIMARY_COLOR)
}

pub fn success_embed() -> CreateEmbed {
    CreateEmbed::new().color(SUCCESS_COLOR)
}

pub fn error_embed() -> CreateEmbed {
    CreateEmbed::new().color(ERROR_COLOR)
}

pub fn warning_embed() -> CreateEmbed {
    CreateEmbed::new().color(WARNING_COLOR)
}

pub fn info_embed() -> CreateEmbed {
    CreateEmbed::new().color(INFO_COLOR)
}

/// Error embed carrying the user-facing text of a failed command
pub fn failure(message: impl Into<String>) -> CreateEmbed {
    error_embed().title("❌ Error").description(message.into())
}

// ============================================================================
// Text Helpers
// ============================================================================

/// Format a list of items with bullet points
pub fn bullet_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("{} {}", BULLET, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Powers listed in every "channel created" reply
pub const OWNER_POWERS: &[&str] = &[
    "Manage channel settings",
    "Move and disconnect members",
    "Mute and deafen members",
    "Priority speaker",
];
