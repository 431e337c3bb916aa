//! Freeform `--flag value` option strings.
//!
//! The input is cut at every `--`. Each piece that starts with a known flag
//! name becomes a [`Flag`]; the rest of the piece, trimmed, is its value.
//! A value therefore runs up to the next `--` anywhere in the string.
//! Extra leading dashes (`---ephemeral`) are tolerated. Unknown pieces are
//! ignored and the first occurrence of a flag wins.

use crate::emoji::ButtonEmoji;
use crate::error::CommandError;
use button_store::ButtonResponse;

const FLAG_PREFIX: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flag {
    Text(String),
    EmbedJson(String),
    Ephemeral,
    Emoji(String),
    Label(String),
    Style(String),
}

impl Flag {
    fn parse(segment: &str) -> Option<Self> {
        let value = |name: &str| segment.strip_prefix(name).map(|v| v.trim().to_string());

        if let Some(v) = value("text") {
            Some(Flag::Text(v))
        } else if let Some(v) = value("embedjson") {
            Some(Flag::EmbedJson(v))
        } else if segment.starts_with("ephemeral") {
            Some(Flag::Ephemeral)
        } else if let Some(v) = value("emoji") {
            Some(Flag::Emoji(v))
        } else if let Some(v) = value("label") {
            Some(Flag::Label(v))
        } else {
            value("style").map(Flag::Style)
        }
    }
}

/// Flags found in an option string, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    flags: Vec<Flag>,
}

impl FlagSet {
    pub fn parse(input: &str) -> Self {
        let flags = input
            .split(FLAG_PREFIX)
            .skip(1)
            .map(|segment| segment.trim_start_matches('-'))
            .filter_map(Flag::parse)
            .collect();

        Self { flags }
    }

    fn first<'a, T>(&'a self, pick: impl Fn(&'a Flag) -> Option<T>) -> Option<T> {
        self.flags.iter().find_map(pick)
    }

    pub fn text(&self) -> Option<&str> {
        self.first(|f| match f {
            Flag::Text(v) => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn embed_json(&self) -> Option<&str> {
        self.first(|f| match f {
            Flag::EmbedJson(v) => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn ephemeral(&self) -> bool {
        self.flags.contains(&Flag::Ephemeral)
    }

    pub fn emoji(&self) -> Option<&str> {
        self.first(|f| match f {
            Flag::Emoji(v) => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn label(&self) -> Option<&str> {
        self.first(|f| match f {
            Flag::Label(v) => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn style(&self) -> Option<&str> {
        self.first(|f| match f {
            Flag::Style(v) => Some(v.as_str()),
            _ => None,
        })
    }
}

/// Button options taken from an `addbutton` option string.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonOptions {
    pub emoji: Option<ButtonEmoji>,
    pub ephemeral: bool,
    pub response: ButtonResponse,
}

impl ButtonOptions {
    /// `--text` takes precedence over `--embedjson`; one of them is required.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let flags = FlagSet::parse(input);
        let emoji = flags.emoji().and_then(ButtonEmoji::parse);

        let response = if let Some(text) = flags.text() {
            ButtonResponse::Text(text.to_string())
        } else if let Some(raw) = flags.embed_json() {
            let document = serde_json::from_str(raw)
                .map_err(|e| CommandError::ContentFormat(e.to_string()))?;
            ButtonResponse::Embed(document)
        } else {
            return Err(CommandError::UserInput(
                "You must use either --text or --embedjson".into(),
            ));
        };

        Ok(Self {
            emoji,
            ephemeral: flags.ephemeral(),
            response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_with_ephemeral() {
        let options = ButtonOptions::parse("--text hello --ephemeral").unwrap();

        assert_eq!(options.response, ButtonResponse::Text("hello".into()));
        assert!(options.ephemeral);
        assert!(options.emoji.is_none());
    }

    #[test]
    fn test_flags_in_any_order() {
        let options = ButtonOptions::parse("--ephemeral --emoji 🔥 --text  Read the rules  ").unwrap();

        assert_eq!(options.response, ButtonResponse::Text("Read the rules".into()));
        assert!(options.ephemeral);
        assert_eq!(options.emoji, Some(ButtonEmoji::Unicode("🔥".into())));
    }

    #[test]
    fn test_embed_json() {
        let options =
            ButtonOptions::parse(r#"--embedjson {"title": "Welcome", "color": 65280}"#).unwrap();

        assert_eq!(
            options.response,
            ButtonResponse::Embed(serde_json::json!({"title": "Welcome", "color": 65280}))
        );
        assert!(!options.ephemeral);
    }

    #[test]
    fn test_bad_embed_json_is_content_format_error() {
        let result = ButtonOptions::parse("--embedjson {bad json}");
        assert!(matches!(result, Err(CommandError::ContentFormat(_))));
    }

    #[test]
    fn test_missing_response_flag_is_user_input_error() {
        let result = ButtonOptions::parse("--ephemeral --emoji 🔥");
        assert_eq!(
            result,
            Err(CommandError::UserInput(
                "You must use either --text or --embedjson".into()
            ))
        );

        assert!(matches!(
            ButtonOptions::parse(""),
            Err(CommandError::UserInput(_))
        ));
    }

    #[test]
    fn test_text_wins_over_embed() {
        let options = ButtonOptions::parse(r#"--embedjson {"title": "x"} --text plain"#).unwrap();
        assert_eq!(options.response, ButtonResponse::Text("plain".into()));
    }

    #[test]
    fn test_value_stops_at_next_double_dash() {
        let options = ButtonOptions::parse("--text before--after").unwrap();
        assert_eq!(options.response, ButtonResponse::Text("before".into()));
    }

    #[test]
    fn test_ephemeral_inside_text_still_counts() {
        let options = ButtonOptions::parse("--text use --ephemeral sparingly").unwrap();
        assert_eq!(options.response, ButtonResponse::Text("use".into()));
        assert!(options.ephemeral);
    }

    #[test]
    fn test_extra_leading_dashes() {
        let options = ButtonOptions::parse("--text hi ---ephemeral").unwrap();
        assert_eq!(options.response, ButtonResponse::Text("hi".into()));
        assert!(options.ephemeral);

        let flags = FlagSet::parse("-----emoji 🔥 --text a");
        assert_eq!(flags.emoji(), Some("🔥"));
        assert_eq!(flags.text(), Some("a"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let flags = FlagSet::parse("--text one --text two");
        assert_eq!(flags.text(), Some("one"));
    }

    #[test]
    fn test_leading_text_and_unknown_flags_ignored() {
        let flags = FlagSet::parse("noise --unknown x --label Hi --style danger");
        assert_eq!(flags.label(), Some("Hi"));
        assert_eq!(flags.style(), Some("danger"));
        assert!(flags.text().is_none());
        assert!(!flags.ephemeral());
    }

    #[test]
    fn test_custom_emoji_flag() {
        let options =
            ButtonOptions::parse("--text hi --emoji <:pepe:123456789012345678>").unwrap();
        assert!(matches!(options.emoji, Some(ButtonEmoji::Custom { .. })));
    }

    #[test]
    fn test_empty_emoji_value_means_none() {
        let options = ButtonOptions::parse("--text hi --emoji").unwrap();
        assert!(options.emoji.is_none());
    }

    #[test]
    fn test_empty_text_value_is_allowed() {
        let options = ButtonOptions::parse("--text --ephemeral").unwrap();
        assert_eq!(options.response, ButtonResponse::Text(String::new()));
    }
}
