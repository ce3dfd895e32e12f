use std::fmt;

use serde::{Deserialize, Serialize};

/// The three kinds of exercise a lesson can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameVariant {
    FillBlank,
    Matching,
    MultipleChoice,
}

impl GameVariant {
    pub const ALL: [GameVariant; 3] = [
        GameVariant::FillBlank,
        GameVariant::Matching,
        GameVariant::MultipleChoice,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GameVariant::FillBlank => "fill_blank",
            GameVariant::Matching => "matching",
            GameVariant::MultipleChoice => "multiple_choice",
        }
    }
}

impl fmt::Display for GameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_display() {
        for v in GameVariant::ALL {
            let json = serde_json::to_string(&v).unwrap();
            assert_eq!(json, format!("\"{v}\""));
            let back: GameVariant = serde_json::from_str(&json).unwrap();
            assert_eq!(back, v);
        }
    }
}
