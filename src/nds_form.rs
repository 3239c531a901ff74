// Launcher form: owns every setting and assembles the game configuration on launch

use crate::nds_dims::DimensionVector;
use crate::nds_engine::{GameConfiguration, GameEngine, NeighborhoodType, NeighborhoodWrap};
use crate::nds_error::FormError;
use crate::nds_mines::MineCountBinding;

/// Neighborhood selector labels in display order
pub const NEIGHBORHOOD_TYPE_NAMES: [(&str, NeighborhoodType); 8] = [
    ("square", NeighborhoodType::Square),
    ("orthogonal", NeighborhoodType::Orthogonal),
    ("diagonal", NeighborhoodType::Diagonal),
    ("triagonal", NeighborhoodType::Triagonal),
    ("quadragonal", NeighborhoodType::Quadragonal),
    ("vertices", NeighborhoodType::Vertices),
    ("knight", NeighborhoodType::Knight),
    ("ultraknight", NeighborhoodType::Ultraknight),
];

/// Wrap selector labels in display order
pub const NEIGHBORHOOD_WRAP_NAMES: [(&str, NeighborhoodWrap); 4] = [
    ("no", NeighborhoodWrap::No),
    ("torus", NeighborhoodWrap::Torus),
    ("reflect on cell", NeighborhoodWrap::ReflectCell),
    ("reflect on edge", NeighborhoodWrap::ReflectEdge),
];

pub fn map_neighborhood_type(label: &str) -> Result<NeighborhoodType, FormError> {
    NEIGHBORHOOD_TYPE_NAMES
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, t)| *t)
        .ok_or_else(|| FormError::UnknownLabel {
            kind: "neighborhood",
            label: label.to_string(),
        })
}

pub fn map_neighborhood_wrap(label: &str) -> Result<NeighborhoodWrap, FormError> {
    NEIGHBORHOOD_WRAP_NAMES
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, w)| *w)
        .ok_or_else(|| FormError::UnknownLabel {
            kind: "wrapping",
            label: label.to_string(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Launched, // terminal
}

/// The whole launcher state.
/// Edits are ignored once a game has been launched from this form.
#[derive(Debug, Clone)]
pub struct ConfigurationForm {
    dims: DimensionVector,
    mines: MineCountBinding,
    neighborhood: String,
    radius: String,
    wrap: String,
    state: FormState,
    notifications: Vec<String>,
}

impl Default for ConfigurationForm {
    fn default() -> Self {
        ConfigurationForm {
            dims: DimensionVector::new(),
            mines: MineCountBinding::new(),
            neighborhood: NEIGHBORHOOD_TYPE_NAMES[0].0.to_string(),
            radius: "1".to_string(),
            wrap: NEIGHBORHOOD_WRAP_NAMES[0].0.to_string(),
            state: FormState::Editing,
            notifications: Vec::new(),
        }
    }
}

impl ConfigurationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_launched(&self) -> bool {
        self.state == FormState::Launched
    }

    pub fn dims(&self) -> &DimensionVector {
        &self.dims
    }

    pub fn mines(&self) -> &MineCountBinding {
        &self.mines
    }

    pub fn neighborhood(&self) -> &str {
        &self.neighborhood
    }

    pub fn wrap(&self) -> &str {
        &self.wrap
    }

    pub fn radius(&self) -> &str {
        &self.radius
    }

    pub fn set_dimensionality(&mut self, n: usize) {
        if self.is_launched() {
            return;
        }
        self.dims.set_target_length(n, &mut self.mines);
    }

    pub fn set_extent(&mut self, index: usize, raw: &str) -> Result<(), FormError> {
        if self.is_launched() {
            return Ok(());
        }
        self.dims.set_extent(index, raw, &mut self.mines)
    }

    pub fn set_extent_value(&mut self, index: usize, value: u64) -> Result<(), FormError> {
        if self.is_launched() {
            return Ok(());
        }
        self.dims.set_extent_value(index, value, &mut self.mines)
    }

    pub fn set_mines_from_field(&mut self, value: u64) {
        if !self.is_launched() {
            self.mines.on_field_edited(value);
        }
    }

    pub fn set_mines_from_slider(&mut self, value: u64) {
        if !self.is_launched() {
            self.mines.on_slider_edited(value);
        }
    }

    /// Typed field text, clamped by the field on commit
    pub fn commit_mines_field(&mut self, raw: &str) {
        if !self.is_launched() {
            self.mines.field_commit(raw);
        }
    }

    /// Spinner arrow on the field, clamped by the field
    pub fn step_mines_field(&mut self, delta: i64) {
        if !self.is_launched() {
            self.mines.field_step(delta);
        }
    }

    /// Keyboard step on the slider, clamped by the slider
    pub fn step_mines_slider(&mut self, delta: i64) {
        if !self.is_launched() {
            self.mines.slider_step(delta);
        }
    }

    pub fn set_neighborhood(&mut self, label: &str) {
        if !self.is_launched() {
            self.neighborhood = label.to_string();
        }
    }

    pub fn set_wrap(&mut self, label: &str) {
        if !self.is_launched() {
            self.wrap = label.to_string();
        }
    }

    pub fn set_radius(&mut self, raw: &str) {
        if !self.is_launched() {
            self.radius = raw.to_string();
        }
    }

    /// Read every control and build the configuration the engine receives
    pub fn configuration(&self) -> Result<GameConfiguration, FormError> {
        let field_size = self.dims.value();
        let mine_count = self.mines.value();
        let neighborhood_type = map_neighborhood_type(&self.neighborhood)?;
        let neighborhood_wrap = map_neighborhood_wrap(&self.wrap)?;
        let radius = self
            .radius
            .trim()
            .parse::<u32>()
            .map_err(|_| FormError::InvalidRadius(self.radius.clone()))?;
        Ok(GameConfiguration {
            field_size,
            mine_count,
            neighborhood_type,
            radius,
            neighborhood_wrap,
        })
    }

    /// Build the configuration and hand it to `engine`.
    ///
    /// Any failure is queued as a single notification and the form stays
    /// editable; success moves the form to [`FormState::Launched`].
    pub fn launch<E: GameEngine>(&mut self, engine: &E) -> Result<E::Instance, FormError> {
        let result = if self.is_launched() {
            Err(FormError::AlreadyLaunched)
        } else {
            self.configuration()
                .and_then(|config| engine.construct(config).map_err(FormError::from))
        };
        match result {
            Ok(instance) => {
                self.state = FormState::Launched;
                log::info!(
                    "game launched with {} axes, volume {}",
                    self.dims.len(),
                    self.dims.volume()
                );
                Ok(instance)
            }
            Err(e) => {
                log::error!("launch failed: {}", e);
                self.notifications.push(e.to_string());
                Err(e)
            }
        }
    }

    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }
}
