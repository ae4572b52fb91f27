//! Mode vocabularies of the Colour Mode, Interaction, Background and Fill layers.
//!
//! Each enum knows how it moves along the step ladder or the emphasis scale,
//! so generators never compute targets from strings.

use super::Step;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest Root offset generated by the Colour Mode layer (`Root +6`).
pub const ROOT_OFFSET_MAX: u8 = 6;

macro_rules! named_modes {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// All modes in collection order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Mode name as it appears in the collection.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| anyhow::anyhow!(
                        "Unknown {} mode '{s}'", stringify!($ty)
                    ))
            }
        }
    };
}

/// Light or dark theme variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColourMode {
    /// Roots at step 2500, offsets go darker
    Light,
    /// Roots at step 200, offsets go lighter
    Dark,
}

named_modes!(ColourMode {
    Light => "Light",
    Dark => "Dark",
});

impl ColourMode {
    /// The step a `Root` label points at in this mode.
    #[must_use]
    pub const fn base_step(self) -> Step {
        match self {
            Self::Light => Step::LIGHTEST,
            Self::Dark => Step::DARKEST,
        }
    }

    /// Positions moved per unit of Root offset.
    #[must_use]
    pub const fn direction(self) -> isize {
        match self {
            Self::Light => -1,
            Self::Dark => 1,
        }
    }

    /// Step a `Root +offset` label resolves to.
    ///
    /// ```
    /// use rangde::models::{ColourMode, Step};
    ///
    /// assert_eq!(ColourMode::Light.root_step(0), Some(Step::LIGHTEST));
    /// assert_eq!(ColourMode::Light.root_step(2).unwrap().value(), 2300);
    /// assert_eq!(ColourMode::Dark.root_step(6).unwrap().value(), 800);
    /// ```
    #[must_use]
    pub fn root_step(self, offset: u8) -> Option<Step> {
        self.base_step()
            .offset(isize::from(offset) * self.direction())
    }
}

/// Label of a Root offset: `Root`, `Root +1`, ... `Root +6`.
#[must_use]
pub fn root_label(offset: u8) -> String {
    if offset == 0 {
        "Root".to_string()
    } else {
        format!("Root +{offset}")
    }
}

/// Interaction state of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionState {
    /// Resting state
    Idle,
    /// Pointer over the component
    Hover,
    /// Component being pressed
    Pressed,
    /// Keyboard focus
    Focus,
}

named_modes!(InteractionState {
    Idle => "Idle",
    Hover => "Hover",
    Pressed => "Pressed",
    Focus => "Focus",
});

impl InteractionState {
    /// Extra Root offset this state adds to an emphasis.
    #[must_use]
    pub const fn delta(self) -> u8 {
        match self {
            Self::Idle | Self::Focus => 0,
            Self::Hover => 1,
            Self::Pressed => 2,
        }
    }
}

/// Fill emphasis, from no fill to a strong fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FillEmphasis {
    /// Transparent fill
    Ghost,
    /// Barely visible fill
    Minimal,
    /// Soft fill
    Subtle,
    /// Strong fill
    Bold,
}

named_modes!(FillEmphasis {
    Ghost => "Ghost",
    Minimal => "Minimal",
    Subtle => "Subtle",
    Bold => "Bold",
});

impl FillEmphasis {
    /// Root offset of this emphasis in its idle state.
    #[must_use]
    pub const fn base_offset(self) -> u8 {
        match self {
            Self::Ghost => 0,
            Self::Minimal => 1,
            Self::Subtle => 2,
            Self::Bold => 4,
        }
    }

    /// Root offset of this emphasis in `state`; never above [`ROOT_OFFSET_MAX`].
    #[must_use]
    pub const fn root_offset(self, state: InteractionState) -> u8 {
        let offset = self.base_offset() + state.delta();
        if offset > ROOT_OFFSET_MAX {
            ROOT_OFFSET_MAX
        } else {
            offset
        }
    }

    /// Emphasis `levels` steps stronger, stopping at `Bold`.
    #[must_use]
    pub fn raised(self, levels: usize) -> Self {
        let idx = Self::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Self::ALL[(idx + levels).min(Self::ALL.len() - 1)]
    }
}

/// Nesting depth of the background a component sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackgroundLevel {
    /// Page background
    Level0,
    /// Card on the page
    Level1,
    /// Element inside a card
    Level2,
}

named_modes!(BackgroundLevel {
    Level0 => "Level 0",
    Level1 => "Level 1",
    Level2 => "Level 2",
});

impl BackgroundLevel {
    /// Emphasis levels added on this background.
    #[must_use]
    pub const fn raise(self) -> usize {
        match self {
            Self::Level0 => 0,
            Self::Level1 => 1,
            Self::Level2 => 2,
        }
    }
}
