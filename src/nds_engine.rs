// Engine construction contract and the bundled minefield engine
// A launched configuration is validated here and turned into a mine layout

use chrono::Local;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::nds_error::EngineError;

/// Largest field the bundled engine will lay out
pub const MAX_CELLS: u64 = 1 << 24;

/// Adjacency rule deciding which cells count as neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeighborhoodType {
    Square,
    Orthogonal,
    Diagonal,
    Triagonal,
    Quadragonal,
    Vertices,
    Knight,
    Ultraknight,
}

impl NeighborhoodType {
    pub const ALL: [NeighborhoodType; 8] = [
        NeighborhoodType::Square,
        NeighborhoodType::Orthogonal,
        NeighborhoodType::Diagonal,
        NeighborhoodType::Triagonal,
        NeighborhoodType::Quadragonal,
        NeighborhoodType::Vertices,
        NeighborhoodType::Knight,
        NeighborhoodType::Ultraknight,
    ];

    /// Engine-native token, stable across versions
    pub fn token(&self) -> &'static str {
        match self {
            NeighborhoodType::Square => "SQUARE",
            NeighborhoodType::Orthogonal => "ORTHOGONAL",
            NeighborhoodType::Diagonal => "DIAGONAL",
            NeighborhoodType::Triagonal => "TRIAGONAL",
            NeighborhoodType::Quadragonal => "QUADRAGONAL",
            NeighborhoodType::Vertices => "VERTICES",
            NeighborhoodType::Knight => "KNIGHT",
            NeighborhoodType::Ultraknight => "ULTRAKNIGHT",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.token() == token)
    }
}

/// Boundary behavior of the neighborhood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeighborhoodWrap {
    No,
    Torus,
    ReflectCell,
    ReflectEdge,
}

impl NeighborhoodWrap {
    pub const ALL: [NeighborhoodWrap; 4] = [
        NeighborhoodWrap::No,
        NeighborhoodWrap::Torus,
        NeighborhoodWrap::ReflectCell,
        NeighborhoodWrap::ReflectEdge,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            NeighborhoodWrap::No => "NO",
            NeighborhoodWrap::Torus => "TORUS",
            NeighborhoodWrap::ReflectCell => "REFLECT_CELL",
            NeighborhoodWrap::ReflectEdge => "REFLECT_EDGE",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.token() == token)
    }
}

// Both enums travel as their token string, not as a variant index
macro_rules! token_serde {
    ($ty:ident, $what:literal) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.token())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<$ty, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $ty::from_token(&s)
                    .ok_or_else(|| serde::de::Error::custom(concat!("unknown ", $what)))
            }
        }
    };
}

token_serde!(NeighborhoodType, "neighborhood type");
token_serde!(NeighborhoodWrap, "neighborhood wrap");

/// Everything the engine needs to build a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfiguration {
    pub field_size: Vec<u64>,
    pub mine_count: u64,
    pub neighborhood_type: NeighborhoodType,
    pub radius: u32,
    pub neighborhood_wrap: NeighborhoodWrap,
}

impl GameConfiguration {
    pub fn volume(&self) -> u64 {
        self.field_size
            .iter()
            .fold(1u64, |acc, &e| acc.saturating_mul(e))
    }
}

/// Construction contract of a game engine
pub trait GameEngine {
    type Instance;

    fn construct(&self, config: GameConfiguration) -> Result<Self::Instance, EngineError>;
}

/// A constructed game: configuration plus the mine layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInstance {
    pub config: GameConfiguration,
    pub mines: Vec<usize>, // flat cell indices, ascending
    pub launched_at: String,
}

/// Validates a configuration and scatters mines uniformly
#[derive(Debug, Clone, Default)]
pub struct MinefieldEngine {
    seed: Option<u64>,
}

impl MinefieldEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic layouts
    #[cfg(test)]
    pub fn with_seed(seed: u64) -> Self {
        MinefieldEngine { seed: Some(seed) }
    }

    fn validate(config: &GameConfiguration) -> Result<u64, EngineError> {
        if config.field_size.is_empty() {
            return Err(EngineError::EmptyField);
        }
        if let Some(axis) = config.field_size.iter().position(|&e| e == 0) {
            return Err(EngineError::ZeroExtent { axis });
        }
        if config.radius == 0 {
            return Err(EngineError::ZeroRadius);
        }
        let volume = config.volume();
        if volume > MAX_CELLS {
            return Err(EngineError::FieldTooLarge {
                volume,
                limit: MAX_CELLS,
            });
        }
        // at least one safe cell must remain
        if config.mine_count >= volume {
            return Err(EngineError::TooManyMines {
                mines: config.mine_count,
                volume,
            });
        }
        Ok(volume)
    }
}

impl GameEngine for MinefieldEngine {
    type Instance = GameInstance;

    fn construct(&self, config: GameConfiguration) -> Result<GameInstance, EngineError> {
        let volume = Self::validate(&config)? as usize;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut mines = index::sample(&mut rng, volume, config.mine_count as usize).into_vec();
        mines.sort_unstable();
        Ok(GameInstance {
            config,
            mines,
            launched_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }
}
