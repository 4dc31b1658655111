//! Name and limit derivation for new temporary channels.

pub const MIN_USER_LIMIT: u32 = 2;
pub const MAX_USER_LIMIT: u32 = 99;
pub const DEFAULT_USER_LIMIT: u32 = 10;

/// Limits applied to user-supplied name fragments
#[derive(Debug, Clone)]
pub struct NamingRules {
    pub max_length: usize,
    pub default_label: String,
}

impl NamingRules {
    /// Strip characters other than word characters, whitespace and hyphens,
    /// trim, truncate, and fall back to the default label when nothing is left.
    ///
    /// Word characters are alphanumerics plus `_`. Combining marks are not
    /// alphanumeric and get dropped, so decomposed accents lose their mark.
    pub fn sanitize(&self, input: &str) -> String {
        let cleaned: String = input
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
            .collect();

        let truncated: String = cleaned.trim().chars().take(self.max_length).collect();

        if truncated.is_empty() {
            self.default_label.clone()
        } else {
            truncated
        }
    }
}

/// Parse the "max users" field: empty or non-numeric input falls back to the
/// default, numbers outside the allowed range are clamped
pub fn parse_user_limit(raw: Option<&str>) -> u32 {
    let trimmed = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return DEFAULT_USER_LIMIT,
    };

    match trimmed.parse::<i64>() {
        Ok(n) => n.clamp(MIN_USER_LIMIT as i64, MAX_USER_LIMIT as i64) as u32,
        Err(_) => DEFAULT_USER_LIMIT,
    }
}

/// `#{room} - {game}'s {owner}`
pub fn gaming_channel_name(room_number: u64, game: &str, owner_display_name: &str) -> String {
    format!("#{} - {}'s {}", room_number, game, owner_display_name)
}

/// Default name for `/create-voice` without an explicit name
pub fn simple_channel_name(owner_display_name: &str) -> String {
    format!("{}'s Channel", owner_display_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(max_length: usize) -> NamingRules {
        NamingRules {
            max_length,
            default_label: "Temporary Channel".to_string(),
        }
    }

    #[test]
    fn test_sanitize_strips_invalid_characters() {
        let r = rules(50);
        assert_eq!(r.sanitize("Dota2!!"), "Dota2");
        assert_eq!(r.sanitize("  Mobile Legends: Bang <Bang>  "), "Mobile Legends Bang Bang");
        assert_eq!(r.sanitize("league_of-legends"), "league_of-legends");
        assert_eq!(r.sanitize("Pokémon"), "Pokémon");
    }

    #[test]
    fn test_sanitize_output_is_clean_and_bounded() {
        let r = rules(8);
        let long = "x".repeat(40);
        for input in ["<script>alert(1)</script>", "a.b,c;d'e\"f", "🎮🎮 valorant 🎮", long.as_str()] {
            let out = r.sanitize(input);
            assert!(out.chars().count() <= 8 || out == r.default_label, "{out}");
            if out != r.default_label {
                assert!(out
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c.is_whitespace()));
            }
        }
    }

    #[test]
    fn test_sanitize_drops_combining_marks() {
        let r = rules(50);
        // U+0301 COMBINING ACUTE ACCENT after a plain "e"
        assert_eq!(r.sanitize("Poke\u{301}mon"), "Pokemon");
        assert_eq!(r.sanitize("Pok\u{e9}mon"), "Pokémon");
    }

    #[test]
    fn test_sanitize_defaults_when_empty() {
        let r = rules(50);
        assert_eq!(r.sanitize(""), "Temporary Channel");
        assert_eq!(r.sanitize("   "), "Temporary Channel");
        assert_eq!(r.sanitize("!!!???"), "Temporary Channel");
    }

    #[test]
    fn test_sanitize_truncates_by_characters() {
        let r = rules(3);
        assert_eq!(r.sanitize("ééééé"), "ééé");
    }

    #[test]
    fn test_user_limit() {
        assert_eq!(parse_user_limit(None), 10);
        assert_eq!(parse_user_limit(Some("")), 10);
        assert_eq!(parse_user_limit(Some("  ")), 10);
        assert_eq!(parse_user_limit(Some("abc")), 10);
        assert_eq!(parse_user_limit(Some("5")), 5);
        assert_eq!(parse_user_limit(Some(" 7 ")), 7);
        assert_eq!(parse_user_limit(Some("1")), 2);
        assert_eq!(parse_user_limit(Some("-4")), 2);
        assert_eq!(parse_user_limit(Some("150")), 99);
        assert_eq!(parse_user_limit(Some("99")), 99);
        assert_eq!(parse_user_limit(Some("2")), 2);
    }

    #[test]
    fn test_channel_names() {
        assert_eq!(gaming_channel_name(3, "Dota2", "alice"), "#3 - Dota2's alice");
        assert_eq!(simple_channel_name("bob"), "bob's Channel");
    }
}
