use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::constants::game;

/// The two rule sets the game ships with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, ValueEnum)]
pub enum Variant {
    /// Tap to flap, bombs explode, a crash freezes the world until the next click.
    #[default]
    Classic,
    /// Hold to rise, items may overlap, a crash restarts immediately.
    Hover,
}

impl Variant {
    pub fn summary(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic: tap to flap, bombs explode",
            Variant::Hover => "Hover: hold to rise, instant restart",
        }
    }
}

/// Per-variant switches consulted by the session every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub variant: Variant,
    pub flap_velocity: f32,
    /// One impulse per press. Otherwise the impulse repeats while held.
    pub edge_triggered_flap: bool,
    pub animated_bombs: bool,
    pub avoid_spawn_conflicts: bool,
    pub ceiling_is_fatal: bool,
    /// Crash leaves a frozen game-over frame instead of resetting on the spot.
    pub freeze_on_crash: bool,
    /// Gap pass needs the bird to be fully inside the pair first.
    pub latched_gap_pass: bool,
}

impl From<Variant> for Rules {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Rules {
                variant,
                flap_velocity: game::CLASSIC_FLAP_VELOCITY,
                edge_triggered_flap: true,
                animated_bombs: true,
                avoid_spawn_conflicts: true,
                ceiling_is_fatal: false,
                freeze_on_crash: true,
                latched_gap_pass: true,
            },
            Variant::Hover => Rules {
                variant,
                flap_velocity: game::HOVER_FLAP_VELOCITY,
                edge_triggered_flap: false,
                animated_bombs: false,
                avoid_spawn_conflicts: false,
                ceiling_is_fatal: true,
                freeze_on_crash: false,
                latched_gap_pass: false,
            },
        }
    }
}

impl Rules {
    /// Whether pipes, items and the ground move this tick.
    pub fn scrolling(&self, flying: bool, game_over: bool) -> bool {
        if self.freeze_on_crash {
            flying && !game_over
        } else {
            true
        }
    }
}
