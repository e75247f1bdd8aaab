mod components;
mod difficulty;
mod input;
mod powerup;
mod session;
mod spawner;

pub mod sys;

pub use components::*;
pub use difficulty::*;
pub use input::*;
pub use powerup::*;
pub use session::*;
pub use spawner::*;

pub const WINDOW_WIDTH: u32 = 1024;
pub const WINDOW_HEIGHT: u32 = 768;

/// The rng every random roll of a session goes through.
pub type GameRng = rand_pcg::Pcg32;
