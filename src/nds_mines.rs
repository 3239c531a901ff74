// Mine count shared by the numeric field and the slider

use crate::nds_dims::VolumeObserver;

/// What one mine widget renders: current value and its declared range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MineView {
    pub value: u64,
    pub min: u64,
    pub max: u64,
}

impl MineView {
    /// Position of the value in `0.0..=1.0`, for drawing a slider track
    pub fn ratio(&self) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        let span = (self.max - self.min) as f64;
        ((self.value.clamp(self.min, self.max) - self.min) as f64 / span).clamp(0.0, 1.0)
    }
}

/// Single mine count rendered by two widgets.
///
/// The field and the slider both read `value` and `upper_bound` from here,
/// so updating the bound always reaches both at once. The binding never
/// pulls `value` back under a shrinking bound; the widgets clamp on their
/// next interaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MineCountBinding {
    value: u64,
    upper_bound: u64,
}

impl MineCountBinding {
    pub const LOWER_BOUND: u64 = 0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    /// True while a volume shrink has left the value above the bound
    pub fn exceeds_bound(&self) -> bool {
        self.value > self.upper_bound
    }

    pub fn field(&self) -> MineView {
        self.view()
    }

    pub fn slider(&self) -> MineView {
        self.view()
    }

    fn view(&self) -> MineView {
        MineView {
            value: self.value,
            min: Self::LOWER_BOUND,
            max: self.upper_bound,
        }
    }

    pub fn on_field_edited(&mut self, value: u64) {
        self.value = value;
    }

    pub fn on_slider_edited(&mut self, value: u64) {
        self.value = value;
    }

    /// Numeric field commit: unparsable text falls back to the lower bound,
    /// then the field clamps to its range like a native spinner would.
    pub fn field_commit(&mut self, raw: &str) -> u64 {
        let parsed = raw.trim().parse::<u64>().unwrap_or(Self::LOWER_BOUND);
        let clamped = parsed.clamp(Self::LOWER_BOUND, self.upper_bound);
        self.on_field_edited(clamped);
        clamped
    }

    /// Spinner arrow on the numeric field, clamped to the field range
    pub fn field_step(&mut self, delta: i64) -> u64 {
        let next = self.stepped(delta);
        self.on_field_edited(next);
        next
    }

    /// Slider keyboard step, clamped to the slider range
    pub fn slider_step(&mut self, delta: i64) -> u64 {
        let next = self.stepped(delta);
        self.on_slider_edited(next);
        next
    }

    fn stepped(&self, delta: i64) -> u64 {
        let start = self.value.min(self.upper_bound);
        let next = if delta < 0 {
            start.saturating_sub(delta.unsigned_abs())
        } else {
            start.saturating_add(delta as u64)
        };
        next.clamp(Self::LOWER_BOUND, self.upper_bound)
    }
}

impl VolumeObserver for MineCountBinding {
    fn on_volume_changed(&mut self, volume: u64) {
        self.upper_bound = volume.saturating_sub(1);
    }
}
