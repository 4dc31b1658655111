/// Platforms offered by the interactive setup menu
pub const PLATFORMS: &[&str] = &["PC", "Mobile", "Console", "Switch", "PlayStation", "Xbox"];

/// Category that groups the gaming channels of one platform
pub fn category_name(platform: &str) -> String {
    format!("🎮 {} Gaming", platform)
}

/// Check whether a value submitted through the select menu is a known platform
pub fn is_known(platform: &str) -> bool {
    PLATFORMS.contains(&platform)
}
