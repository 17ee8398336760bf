//! Pet lifecycle states.
//!
//! The stored shape is two booleans (`is_sleeping`, `is_alive`); this
//! enum is the view the rest of the crate reasons about.
//!
//! ```text
//!  AWAKE ──[sleep()]──▶ ASLEEP
//!    ▲                     │
//!    └──[sleep() / energy saturates]──┘
//!
//!  AWAKE | ASLEEP ──[hunger or happiness hits 0]──▶ DEAD
//! ```
//!
//! `Dead` is terminal: no operation leaves it.

/// Every state a pet can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PetState {
    Awake,
    Asleep,
    Dead,
}

impl PetState {
    /// Derive the state from the persisted flags. A dead pet is `Dead`
    /// regardless of its sleep flag.
    pub fn from_flags(is_sleeping: bool, is_alive: bool) -> Self {
        match (is_alive, is_sleeping) {
            (false, _) => Self::Dead,
            (true, true) => Self::Asleep,
            (true, false) => Self::Awake,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Awake => "Awake",
            Self::Asleep => "Asleep",
            Self::Dead => "Dead",
        }
    }

    /// Status line shown to the player.
    pub fn label(self) -> &'static str {
        match self {
            Self::Awake => "Awake",
            Self::Asleep => "Sleeping...",
            Self::Dead => "Your pet has passed away...",
        }
    }

    /// Whether feed and play are accepted in this state.
    pub fn accepts_care(self) -> bool {
        self == Self::Awake
    }

    /// Whether `to` is reachable from `self` in one step.
    pub fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Awake, Self::Asleep)
                | (Self::Asleep, Self::Awake)
                | (Self::Awake | Self::Asleep, Self::Dead)
        )
    }
}

impl core::fmt::Display for PetState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A state change observed during one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: PetState,
    pub to: PetState,
}

impl Transition {
    /// `Some` only when the state actually moved.
    pub fn between(from: PetState, to: PetState) -> Option<Self> {
        if from == to {
            return None;
        }
        debug_assert!(from.can_transition_to(to), "illegal transition {from} -> {to}");
        Some(Self { from, to })
    }
}
