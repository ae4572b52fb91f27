//! The fixed 24-position brightness ladder shared by every palette.
//!
//! Steps run from 200 (darkest) to 2500 (lightest) in increments of 100.
//! All arithmetic on steps goes through their position in the ladder so a
//! derived step always lands on a defined palette slot.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of defined steps in every palette.
pub const STEP_COUNT: usize = 24;

/// Numeric value of the darkest step.
const FIRST_STEP: u16 = 200;

/// Numeric distance between two adjacent steps.
const STEP_INCREMENT: u16 = 100;

/// One of the 24 defined brightness steps (200, 300, ... 2500).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Step(u16);

/// Error returned when a number is not one of the defined steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepError(pub u16);

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is not a palette step (expected 200, 300, ... 2500)",
            self.0
        )
    }
}

impl std::error::Error for StepError {}

impl Step {
    /// Darkest step (200).
    pub const DARKEST: Self = Self(FIRST_STEP);
    /// Lightest step (2500).
    pub const LIGHTEST: Self = Self(FIRST_STEP + STEP_INCREMENT * (STEP_COUNT as u16 - 1));

    /// Validates a raw step value.
    ///
    /// ```
    /// use rangde::models::Step;
    ///
    /// assert_eq!(Step::new(1400).unwrap().value(), 1400);
    /// assert!(Step::new(1450).is_err());
    /// assert!(Step::new(100).is_err());
    /// ```
    pub fn new(value: u16) -> Result<Self, StepError> {
        if value < FIRST_STEP
            || value > Self::LIGHTEST.0
            || (value - FIRST_STEP) % STEP_INCREMENT != 0
        {
            return Err(StepError(value));
        }
        Ok(Self(value))
    }

    /// Returns the step at a ladder position (0 = 200, 23 = 2500).
    #[must_use]
    pub fn from_position(position: usize) -> Option<Self> {
        (position < STEP_COUNT).then(|| Self(FIRST_STEP + STEP_INCREMENT * position as u16))
    }

    /// Numeric value of the step (e.g. 1400).
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Position of the step in the ladder (0-23).
    #[must_use]
    pub const fn position(self) -> usize {
        ((self.0 - FIRST_STEP) / STEP_INCREMENT) as usize
    }

    /// Moves `delta` positions along the ladder, or `None` past either end.
    ///
    /// ```
    /// use rangde::models::Step;
    ///
    /// let step = Step::new(2400).unwrap();
    /// assert_eq!(step.offset(1), Some(Step::LIGHTEST));
    /// assert_eq!(step.offset(2), None);
    /// assert_eq!(step.offset(-2).unwrap().value(), 2200);
    /// ```
    #[must_use]
    pub fn offset(self, delta: isize) -> Option<Self> {
        let target = self.position() as isize + delta;
        if target < 0 {
            return None;
        }
        Self::from_position(target as usize)
    }

    /// Moves `delta` positions, stopping at 200 or 2500.
    #[must_use]
    pub fn offset_clamped(self, delta: isize) -> Self {
        let target = (self.position() as isize + delta).clamp(0, STEP_COUNT as isize - 1);
        Self(FIRST_STEP + STEP_INCREMENT * target as u16)
    }

    /// Number of positions between two steps.
    #[must_use]
    pub const fn distance(self, other: Self) -> usize {
        self.position().abs_diff(other.position())
    }

    /// Iterates all 24 steps from darkest to lightest.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..STEP_COUNT).map(|position| Self(FIRST_STEP + STEP_INCREMENT * position as u16))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Step {
    type Error = StepError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for Step {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.0)
    }
}

impl<'de> Deserialize<'de> for Step {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u16::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
