//! Core value types shared by the grid model, exchange formats and front-ends

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a rank definition
///
/// Imported files may carry either numbers or strings. The two kinds never
/// compare equal, so `3` and `"3"` are distinct ranks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RankId {
    Num(i64),
    Text(String),
}

impl RankId {
    /// Numeric value, if this id is numeric
    pub fn as_num(&self) -> Option<i64> {
        match self {
            RankId::Num(n) => Some(*n),
            RankId::Text(_) => None,
        }
    }
}

impl From<i64> for RankId {
    fn from(value: i64) -> Self {
        RankId::Num(value)
    }
}

impl From<&str> for RankId {
    fn from(value: &str) -> Self {
        RankId::Text(value.to_string())
    }
}

impl fmt::Display for RankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankId::Num(n) => write!(f, "{n}"),
            RankId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A user-defined favorability rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    pub id: RankId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "colorClass", default)]
    pub color_tag: String,
    #[serde(rename = "selectedColorClass", default)]
    pub selected_color_tag: String,
}

/// Rank definition without an id (editor input)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankDraft {
    pub name: String,
    pub description: String,
    pub color_tag: String,
    pub selected_color_tag: String,
}

impl RankDraft {
    pub fn into_rank(self, id: RankId) -> Rank {
        Rank {
            id,
            name: self.name,
            description: self.description,
            color_tag: self.color_tag,
            selected_color_tag: self.selected_color_tag,
        }
    }
}

impl From<&Rank> for RankDraft {
    fn from(rank: &Rank) -> Self {
        Self {
            name: rank.name.clone(),
            description: rank.description.clone(),
            color_tag: rank.color_tag.clone(),
            selected_color_tag: rank.selected_color_tag.clone(),
        }
    }
}

/// Roster entry; identified by its position in the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub image: String,
}

impl Character {
    pub fn new(name: &str, image: &str) -> Self {
        Self {
            name: name.to_string(),
            image: image.to_string(),
        }
    }
}

/// Which lane's matchup chart is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Solo,
    Dual,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Solo, Mode::Dual];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Solo => "Solo Lane",
            Mode::Dual => "Dual Lane",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Solo => write!(f, "solo"),
            Mode::Dual => write!(f, "dual"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_id_numeric_and_text_are_distinct() {
        assert_ne!(RankId::from(3), RankId::from("3"));
        assert_eq!(RankId::from(3), RankId::Num(3));
    }

    #[test]
    fn test_rank_id_deserializes_untagged() {
        let ids: Vec<RankId> = serde_json::from_str(r#"[1, "1712345678901"]"#).unwrap();
        assert_eq!(ids, vec![RankId::Num(1), RankId::Text("1712345678901".to_string())]);
    }

    #[test]
    fn test_rank_id_rejects_fractional_numbers() {
        assert!(serde_json::from_str::<RankId>("1.5").is_err());
        assert!(serde_json::from_str::<RankId>("18446744073709551615").is_err());
    }

    #[test]
    fn test_rank_serializes_with_color_class_keys() {
        let rank = Rank {
            id: RankId::Num(1),
            name: "Even".to_string(),
            description: "Skill matchup".to_string(),
            color_tag: "bg-yellow-500".to_string(),
            selected_color_tag: "bg-yellow-500/30".to_string(),
        };
        let value = serde_json::to_value(&rank).unwrap();
        assert_eq!(value["colorClass"], "bg-yellow-500");
        assert_eq!(value["selectedColorClass"], "bg-yellow-500/30");
        assert_eq!(value["id"], 1);
    }

    #[test]
    fn test_rank_missing_optional_fields_default_empty() {
        let rank: Rank = serde_json::from_str(r#"{"id": "a", "name": "Odd"}"#).unwrap();
        assert_eq!(rank.description, "");
        assert_eq!(rank.color_tag, "");
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Solo.to_string(), "solo");
        assert_eq!(Mode::Dual.label(), "Dual Lane");
    }
}
