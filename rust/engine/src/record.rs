use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::Action;
use crate::state::Street;

/// One recorded action.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub street: Street,
    pub seat: usize,
    pub action: Action,
}

/// A complete hand: table setup, action log and declared outcome.
///
/// The machine archives every finished hand in this form, and
/// [`ReplayValidator`](crate::replay::ReplayValidator) replays it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Format: YYYYMMDD-NNNNNN
    pub hand_id: String,
    pub dealer: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Stack of every seat before blinds; 0 marks an eliminated seat.
    pub starting_stacks: Vec<u32>,
    /// Deck order used for the hand, when known.
    #[serde(default)]
    pub deck: Option<Vec<Card>>,
    pub actions: Vec<ActionRecord>,
    /// Total pot before it was awarded.
    pub final_pot: u32,
    pub final_stacks: Vec<u32>,
    /// RFC3339
    #[serde(default)]
    pub recorded_at: Option<String>,
}

impl HandRecord {
    /// Parses one record per non-blank line.
    pub fn parse_jsonl(s: &str) -> Result<Vec<HandRecord>, serde_json::Error> {
        s.lines()
            .filter(|l| !l.trim().is_empty())
            .map(serde_json::from_str)
            .collect()
    }

    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u64) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}
