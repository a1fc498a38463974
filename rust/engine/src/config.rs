use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 9;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("player count {0} outside {min}..={max}", min = MIN_PLAYERS, max = MAX_PLAYERS)]
    PlayerCount(usize),
    #[error("small blind {small} must be positive and below big blind {big}")]
    Blinds { small: u32, big: u32 },
    #[error("starting stack must be positive")]
    StartingStack,
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Table parameters, validated once at construction and immutable afterwards.
///
/// Invalid values are rejected, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    num_players: usize,
    small_blind: u32,
    big_blind: u32,
    starting_stack: u32,
}

#[derive(Deserialize)]
struct RawGameConfig {
    num_players: usize,
    small_blind: u32,
    big_blind: u32,
    starting_stack: u32,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        GameConfig::new(
            raw.num_players,
            raw.small_blind,
            raw.big_blind,
            raw.starting_stack,
        )
    }
}

impl GameConfig {
    pub fn new(
        num_players: usize,
        small_blind: u32,
        big_blind: u32,
        starting_stack: u32,
    ) -> Result<Self, ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(ConfigError::PlayerCount(num_players));
        }
        if small_blind == 0 || small_blind >= big_blind {
            return Err(ConfigError::Blinds {
                small: small_blind,
                big: big_blind,
            });
        }
        if starting_stack == 0 {
            return Err(ConfigError::StartingStack);
        }
        Ok(Self {
            num_players,
            small_blind,
            big_blind,
            starting_stack,
        })
    }

    pub fn heads_up(small_blind: u32, big_blind: u32, starting_stack: u32) -> Result<Self, ConfigError> {
        Self::new(2, small_blind, big_blind, starting_stack)
    }

    /// Parses a TOML table with the four config keys, e.g.
    ///
    /// ```toml
    /// num_players = 6
    /// small_blind = 50
    /// big_blind = 100
    /// starting_stack = 10000
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.message().to_string()))
    }

    pub fn num_players(&self) -> usize {
        self.num_players
    }
    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }
    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }
    pub fn starting_stack(&self) -> u32 {
        self.starting_stack
    }
}
