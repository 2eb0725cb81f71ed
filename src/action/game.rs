use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum GameAction {
    /// Bound as a hold: press, autorepeat and release all reach the pointer.
    Flap,
    Leave,
}
