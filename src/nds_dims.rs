// Axis extent editor for the N-dimensional field
// Keeps the extent list in step with the chosen dimensionality and reports volume changes

use crate::nds_error::FormError;

/// Upper bound offered by the dimensionality and extent spinners
pub const MAX_SPINNER_VALUE: u64 = 9000;

/// Receives the field volume after every structural or element change
pub trait VolumeObserver {
    fn on_volume_changed(&mut self, volume: u64);
}

impl<F: FnMut(u64)> VolumeObserver for F {
    fn on_volume_changed(&mut self, volume: u64) {
        self(volume)
    }
}

/// Parse user input as a positive integer.
/// Anything unparsable or below 1 becomes exactly 1.
pub fn parse_positive(raw: &str) -> u64 {
    match raw.trim().parse::<i64>() {
        Ok(v) if v >= 1 => v as u64,
        _ => 1,
    }
}

/// Ordered list of per-axis extents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionVector {
    extents: Vec<u64>, // every entry >= 1
    target_length: usize,
}

impl Default for DimensionVector {
    fn default() -> Self {
        DimensionVector {
            extents: vec![1],
            target_length: 1,
        }
    }
}

impl DimensionVector {
    /// A single axis of extent 1
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn extent(&self, index: usize) -> Option<u64> {
        self.extents.get(index).copied()
    }

    /// Settle the list to `n` axes, one grow or shrink step at a time.
    ///
    /// Every step notifies `observer`, so a change from 1 to 4 axes fires
    /// three notifications. Calling again with the same `n` does nothing.
    pub fn set_target_length(&mut self, n: usize, observer: &mut dyn VolumeObserver) {
        self.target_length = n.max(1);
        if self.extents.len() != self.target_length {
            log::debug!(
                "settling axes {} -> {}",
                self.extents.len(),
                self.target_length
            );
        }
        while self.extents.len() != self.target_length {
            if self.extents.len() < self.target_length {
                self.grow(observer);
            } else {
                self.shrink(observer);
            }
        }
    }

    fn grow(&mut self, observer: &mut dyn VolumeObserver) {
        self.extents.push(1);
        observer.on_volume_changed(self.volume());
    }

    // axis 0 only goes once every higher axis is gone
    fn shrink(&mut self, observer: &mut dyn VolumeObserver) {
        self.extents.pop();
        observer.on_volume_changed(self.volume());
    }

    /// Store raw spinner text for one axis.
    /// Invalid or non-positive text becomes 1, anything above the spinner maximum is capped.
    pub fn set_extent(
        &mut self,
        index: usize,
        raw: &str,
        observer: &mut dyn VolumeObserver,
    ) -> Result<(), FormError> {
        let value = parse_positive(raw).min(MAX_SPINNER_VALUE);
        self.set_extent_value(index, value, observer)
    }

    /// Typed variant of [`DimensionVector::set_extent`]; 0 becomes 1
    pub fn set_extent_value(
        &mut self,
        index: usize,
        value: u64,
        observer: &mut dyn VolumeObserver,
    ) -> Result<(), FormError> {
        let len = self.extents.len();
        let slot = self
            .extents
            .get_mut(index)
            .ok_or(FormError::AxisOutOfRange { index, len })?;
        *slot = if value == 0 { 1 } else { value };
        observer.on_volume_changed(self.volume());
        Ok(())
    }

    /// Snapshot of the current extents
    pub fn value(&self) -> Vec<u64> {
        self.extents.clone()
    }

    /// Product of all extents, saturating at `u64::MAX`
    pub fn volume(&self) -> u64 {
        self.extents.iter().fold(1u64, |acc, &e| acc.saturating_mul(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ignore(_: u64) {}

    #[test]
    fn starts_with_one_unit_axis() {
        let dims = DimensionVector::new();
        assert_eq!(dims.value(), vec![1]);
        assert_eq!(dims.len(), 1);
        assert_eq!(dims.volume(), 1);
    }

    #[test]
    fn settles_to_target_length_and_repeat_is_noop() {
        let mut dims = DimensionVector::new();
        for n in [1usize, 4, 2, 9, 9, 1, 30] {
            dims.set_target_length(n, &mut ignore);
            assert_eq!(dims.value().len(), n);

            let mut repeat_calls = 0;
            let before = dims.value();
            dims.set_target_length(n, &mut |_: u64| repeat_calls += 1);
            assert_eq!(repeat_calls, 0);
            assert_eq!(dims.value(), before);
        }
    }

    #[test]
    fn zero_target_is_coerced_to_one_axis() {
        let mut dims = DimensionVector::new();
        dims.set_target_length(3, &mut ignore);
        dims.set_target_length(0, &mut ignore);
        assert_eq!(dims.value(), vec![1]);
    }

    #[test]
    fn every_step_notifies_matching_volume() {
        let mut dims = DimensionVector::new();
        dims.set_target_length(3, &mut ignore);
        dims.set_extent_value(0, 2, &mut ignore).unwrap();
        dims.set_extent_value(1, 3, &mut ignore).unwrap();
        dims.set_extent_value(2, 5, &mut ignore).unwrap();

        let mut seen = Vec::new();
        dims.set_target_length(5, &mut |v: u64| seen.push(v));
        dims.set_target_length(1, &mut |v: u64| seen.push(v));
        // two grows then four shrinks, one notification each
        assert_eq!(seen, vec![30, 30, 30, 30, 6, 2]);
    }

    #[test]
    fn volume_matches_product_after_each_step() {
        let mut dims = DimensionVector::new();
        // single-step resizes interleaved with edits
        let targets = [2usize, 3, 4, 3, 2, 3, 4, 5, 4, 3, 2, 1];
        for (step, &n) in targets.iter().enumerate() {
            let mut last = None;
            dims.set_target_length(n, &mut |v: u64| last = Some(v));
            let product: u64 = dims.value().iter().product();
            assert_eq!(last, Some(product));
            assert_eq!(dims.volume(), product);

            let axis = step % dims.len();
            dims.set_extent_value(axis, step as u64 + 2, &mut |v: u64| last = Some(v))
                .unwrap();
            let product: u64 = dims.value().iter().product();
            assert_eq!(last, Some(product));
            assert_eq!(dims.volume(), product);
        }
    }

    #[test]
    fn notified_volume_equals_product_of_state_at_that_step() {
        let mut dims = DimensionVector::new();
        dims.set_target_length(4, &mut ignore);
        for (i, e) in [2u64, 3, 4, 5].iter().enumerate() {
            dims.set_extent_value(i, *e, &mut ignore).unwrap();
        }
        let mut seen = Vec::new();
        dims.set_target_length(1, &mut |v: u64| seen.push(v));
        assert_eq!(seen, vec![2 * 3 * 4, 2 * 3, 2]);
    }

    #[test]
    fn shrinking_keeps_low_axes() {
        let mut dims = DimensionVector::new();
        dims.set_target_length(3, &mut ignore);
        dims.set_extent(0, "7", &mut ignore).unwrap();
        dims.set_extent(1, "8", &mut ignore).unwrap();
        dims.set_extent(2, "9", &mut ignore).unwrap();
        dims.set_target_length(2, &mut ignore);
        assert_eq!(dims.value(), vec![7, 8]);
        dims.set_target_length(4, &mut ignore);
        assert_eq!(dims.value(), vec![7, 8, 1, 1]);
    }

    #[test]
    fn invalid_extent_input_becomes_one() {
        let mut dims = DimensionVector::new();
        dims.set_target_length(4, &mut ignore);
        dims.set_extent(0, "abc", &mut ignore).unwrap();
        dims.set_extent(1, "-5", &mut ignore).unwrap();
        dims.set_extent(2, "0", &mut ignore).unwrap();
        dims.set_extent(3, " 12 ", &mut ignore).unwrap();
        assert_eq!(dims.value(), vec![1, 1, 1, 12]);
    }

    #[test]
    fn typed_extent_is_capped_at_spinner_max() {
        let mut dims = DimensionVector::new();
        let mut seen = Vec::new();
        dims.set_extent(0, "123456", &mut |v: u64| seen.push(v)).unwrap();
        assert_eq!(dims.value(), vec![MAX_SPINNER_VALUE]);
        assert_eq!(seen, vec![MAX_SPINNER_VALUE]);
    }

    #[test]
    fn extent_edit_notifies_once() {
        let mut dims = DimensionVector::new();
        let mut seen = Vec::new();
        dims.set_extent(0, "6", &mut |v: u64| seen.push(v)).unwrap();
        assert_eq!(seen, vec![6]);
    }

    #[test]
    fn out_of_range_axis_is_rejected() {
        let mut dims = DimensionVector::new();
        let err = dims.set_extent(3, "2", &mut ignore).unwrap_err();
        assert_eq!(err, FormError::AxisOutOfRange { index: 3, len: 1 });
    }

    #[test]
    fn value_is_a_snapshot() {
        let mut dims = DimensionVector::new();
        let snap = dims.value();
        dims.set_extent(0, "5", &mut ignore).unwrap();
        assert_eq!(snap, vec![1]);
    }

    #[test]
    fn volume_saturates() {
        let mut dims = DimensionVector::new();
        dims.set_target_length(9000, &mut ignore);
        for i in 0..8 {
            dims.set_extent_value(i, MAX_SPINNER_VALUE, &mut ignore).unwrap();
        }
        assert_eq!(dims.volume(), u64::MAX);
    }

    #[test]
    fn parse_positive_coerces() {
        assert_eq!(parse_positive("42"), 42);
        assert_eq!(parse_positive(""), 1);
        assert_eq!(parse_positive("0"), 1);
        assert_eq!(parse_positive("-1"), 1);
        assert_eq!(parse_positive("3.5"), 1);
    }
}
