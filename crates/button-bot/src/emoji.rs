//! Button emoji parsing.

use discord_client::ComponentEmoji;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// `<:name:id>`, `<a:name:id>` or bare `name:id`.
static CUSTOM_EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<?(?:(?P<animated>a)?:)?(?P<name>[A-Za-z0-9_]+):(?P<id>[0-9]{13,20})>?$")
        .expect("custom emoji pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonEmoji {
    /// Guild emoji referenced by id.
    Custom {
        name: String,
        id: String,
        animated: bool,
    },
    /// Anything else, used verbatim.
    Unicode(String),
}

impl ButtonEmoji {
    /// Parse an emoji argument. Custom emoji markup is tried first and any
    /// other non-empty value is kept as a literal emoji.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let emoji = match CUSTOM_EMOJI.captures(raw) {
            Some(caps) => ButtonEmoji::Custom {
                name: caps["name"].to_string(),
                id: caps["id"].to_string(),
                animated: caps.name("animated").is_some(),
            },
            None => ButtonEmoji::Unicode(raw.to_string()),
        };

        Some(emoji)
    }

    pub fn to_component(&self) -> ComponentEmoji {
        match self {
            ButtonEmoji::Custom { name, id, animated } => ComponentEmoji {
                id: Some(id.clone()),
                name: Some(name.clone()),
                animated: *animated,
            },
            ButtonEmoji::Unicode(value) => ComponentEmoji {
                id: None,
                name: Some(value.clone()),
                animated: false,
            },
        }
    }
}

impl fmt::Display for ButtonEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonEmoji::Custom {
                name,
                id,
                animated: true,
            } => write!(f, "<a:{}:{}>", name, id),
            ButtonEmoji::Custom { name, id, .. } => write!(f, "<:{}:{}>", name, id),
            ButtonEmoji::Unicode(value) => f.write_str(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_custom_emoji() {
        let emoji = ButtonEmoji::parse("<:pepe:123456789012345678>").unwrap();
        assert_eq!(
            emoji,
            ButtonEmoji::Custom {
                name: "pepe".into(),
                id: "123456789012345678".into(),
                animated: false,
            }
        );
        assert_eq!(emoji.to_string(), "<:pepe:123456789012345678>");
    }

    #[test]
    fn test_parse_animated_emoji() {
        let emoji = ButtonEmoji::parse("<a:dance:123456789012345678>").unwrap();
        assert!(matches!(emoji, ButtonEmoji::Custom { animated: true, .. }));
        assert_eq!(emoji.to_string(), "<a:dance:123456789012345678>");

        let component = emoji.to_component();
        assert!(component.animated);
        assert_eq!(component.id.as_deref(), Some("123456789012345678"));
    }

    #[test]
    fn test_parse_unicode_fallback() {
        let emoji = ButtonEmoji::parse(" 🔥 ").unwrap();
        assert_eq!(emoji, ButtonEmoji::Unicode("🔥".into()));
        assert_eq!(emoji.to_component().name.as_deref(), Some("🔥"));
        assert!(emoji.to_component().id.is_none());
    }

    #[test]
    fn test_malformed_custom_emoji_falls_back() {
        // Id too short to be a snowflake.
        let emoji = ButtonEmoji::parse("<:pepe:12>").unwrap();
        assert_eq!(emoji, ButtonEmoji::Unicode("<:pepe:12>".into()));
    }

    #[test]
    fn test_empty_emoji_is_none() {
        assert!(ButtonEmoji::parse("").is_none());
        assert!(ButtonEmoji::parse("   ").is_none());
    }
}
