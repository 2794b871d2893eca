//! Advice categories offered on the welcome screen

use serde::{Deserialize, Serialize};

/// Topic the user picked before entering chat
///
/// Only travels as outbound metadata; local logic never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dating,
    Breakup,
    Romance,
    Communication,
    /// Chat entered through "Start chatting" without picking a card
    #[default]
    None,
}

impl Category {
    /// Categories shown as cards, in display order
    pub const CARDS: [Category; 4] = [
        Category::Dating,
        Category::Breakup,
        Category::Romance,
        Category::Communication,
    ];

    /// Wire identifier, matching the serde representation
    pub fn id(&self) -> &'static str {
        match self {
            Category::Dating => "dating",
            Category::Breakup => "breakup",
            Category::Romance => "romance",
            Category::Communication => "communication",
            Category::None => "none",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Dating => "Dating",
            Category::Breakup => "Breakup Healing",
            Category::Romance => "Love and Romance",
            Category::Communication => "Communication",
            Category::None => "Ask anything",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Dating => "Navigate the dating world with confidence",
            Category::Breakup => "Heal gently, grow stronger within",
            Category::Romance => "Deepen love, elevate romance",
            Category::Communication => "Express yourself and understand better",
            Category::None => "Your AI confidante is here 24/7",
        }
    }

    /// Parse a wire identifier (case-insensitive)
    pub fn parse_id(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dating" => Some(Category::Dating),
            "breakup" => Some(Category::Breakup),
            "romance" => Some(Category::Romance),
            "communication" => Some(Category::Communication),
            "none" | "" => Some(Category::None),
            _ => None,
        }
    }
}
