use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// The kind of a tree node, with the text captured from its source line.
///
/// Closed set; candidate kinds are tried against each normalized line in the
/// order Title, Item, Checkbox, Content, Raw, and the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    /// Synthetic root of every tree; never produced from an input line.
    Root,
    /// A heading line (`## Shopping`); weight is the length of the `#` run.
    Title { level: usize, title: String },
    /// A bullet or numbered list line, optionally carrying a backtick label.
    Item { label: Option<String>, item: String },
    /// A marker-prefixed `[ ]` / `[x]` line subordinate to an item.
    Checkbox { checked: bool, checkbox: String },
    /// A marker-prefixed free-text continuation line.
    Content { line: String },
    /// Catch-all for lines no other kind claims.
    Raw { content: String },
}

const ITEM_WEIGHT: u32 = 10;
const CHECKBOX_WEIGHT: u32 = 20;
const CONTENT_WEIGHT: u32 = 20;

impl NodeKind {
    /// Relative nesting-precedence key used by tree insertion.
    ///
    /// Not a depth counter: equal weights become siblings, larger weights
    /// nest deeper. Raw is unbounded so it can never displace existing
    /// structure.
    pub fn weight(&self) -> u32 {
        match self {
            NodeKind::Root => 0,
            NodeKind::Title { level, .. } => *level as u32,
            NodeKind::Item { .. } => ITEM_WEIGHT,
            NodeKind::Checkbox { .. } => CHECKBOX_WEIGHT,
            NodeKind::Content { .. } => CONTENT_WEIGHT,
            NodeKind::Raw { .. } => u32::MAX,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::Title { .. } => "Title",
            NodeKind::Item { .. } => "Item",
            NodeKind::Checkbox { .. } => "Checkbox",
            NodeKind::Content { .. } => "Content",
            NodeKind::Raw { .. } => "Raw",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Root => write!(f, "Root"),
            NodeKind::Title { level, title } => {
                write!(f, "Title level={level} title={title:?}")
            }
            NodeKind::Item { label: Some(label), item } => {
                write!(f, "Item label={label:?} item={item:?}")
            }
            NodeKind::Item { label: None, item } => write!(f, "Item item={item:?}"),
            NodeKind::Checkbox { checked, checkbox } => {
                write!(f, "Checkbox checked={checked} checkbox={checkbox:?}")
            }
            NodeKind::Content { line } => write!(f, "Content line={line:?}"),
            NodeKind::Raw { content } => write!(f, "Raw content={content:?}"),
        }
    }
}

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?P<level>#+) (?P<title>.*)").expect("Invalid title regex"))
}

fn item_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:[*-]|[0-9]\.) (?:`(?P<label>.*)` )?(?P<item>.*)")
            .expect("Invalid item regex")
    })
}

fn checkbox_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\.+ *\[(?P<checked>[ x])\] *(?P<checkbox>.*)")
            .expect("Invalid checkbox regex")
    })
}

fn content_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\.+(?P<line>.*)").expect("Invalid content regex"))
}

/// Classifies a normalized line into the first matching [`NodeKind`].
///
/// Title and Item are anchored at column zero; Checkbox and Content require
/// the sentinel-marker prefix left by normalization. Raw always matches, so
/// every line yields a node.
pub fn classify(line: &str) -> NodeKind {
    if let Some(caps) = title_regex().captures(line) {
        return NodeKind::Title {
            level: caps["level"].len(),
            title: caps["title"].to_string(),
        };
    }
    if let Some(caps) = item_regex().captures(line) {
        return NodeKind::Item {
            label: caps.name("label").map(|m| m.as_str().to_string()),
            item: caps["item"].to_string(),
        };
    }
    if let Some(caps) = checkbox_regex().captures(line) {
        return NodeKind::Checkbox {
            checked: &caps["checked"] == "x",
            checkbox: caps["checkbox"].to_string(),
        };
    }
    if let Some(caps) = content_regex().captures(line) {
        return NodeKind::Content {
            line: caps["line"].to_string(),
        };
    }
    NodeKind::Raw {
        content: line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn title_captures_level_and_text() {
        let kind = classify("## Shopping list");
        assert_eq!(
            kind,
            NodeKind::Title {
                level: 2,
                title: "Shopping list".to_string()
            }
        );
        assert_eq!(kind.weight(), 2);
    }

    #[rstest]
    #[case::dash("- Buy milk")]
    #[case::asterisk("* Buy milk")]
    #[case::numbered("1. Buy milk")]
    fn item_markers(#[case] line: &str) {
        assert_eq!(
            classify(line),
            NodeKind::Item {
                label: None,
                item: "Buy milk".to_string()
            }
        );
    }

    #[test]
    fn item_with_backtick_label() {
        assert_eq!(
            classify("- `urgent` Buy milk"),
            NodeKind::Item {
                label: Some("urgent".to_string()),
                item: "Buy milk".to_string()
            }
        );
    }

    #[rstest]
    #[case::unchecked("..[ ] call dentist", false, "call dentist")]
    #[case::checked("..[x] call dentist", true, "call dentist")]
    #[case::extra_spaces("....  [x]  call dentist", true, "call dentist")]
    fn checkbox_states(#[case] line: &str, #[case] checked: bool, #[case] text: &str) {
        assert_eq!(
            classify(line),
            NodeKind::Checkbox {
                checked,
                checkbox: text.to_string()
            }
        );
    }

    #[test]
    fn marker_prefixed_text_is_content() {
        assert_eq!(
            classify("..some detail"),
            NodeKind::Content {
                line: "some detail".to_string()
            }
        );
    }

    #[test]
    fn checkbox_wins_over_content() {
        // Both regexes match a marker-prefixed checkbox line; order decides.
        assert!(matches!(
            classify("..[ ] ambiguous"),
            NodeKind::Checkbox { .. }
        ));
    }

    #[test]
    fn unclaimed_line_falls_through_to_raw() {
        assert_eq!(
            classify("plain paragraph text"),
            NodeKind::Raw {
                content: "plain paragraph text".to_string()
            }
        );
    }

    #[test]
    fn item_weight_sits_between_titles_and_checkboxes() {
        let title = classify("# t");
        let item = classify("- i");
        let checkbox = classify("..[ ] c");
        assert!(title.weight() < item.weight());
        assert!(item.weight() < checkbox.weight());
    }
}
