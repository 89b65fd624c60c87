//! Skyward - a terminal Flappy Bird clone.
//!
//! Exposes the game session core, the capability interface and the arcade
//! world for testing and external use.

pub mod assets;
pub mod build_info;
pub mod constants;
pub mod input;
pub mod session;
pub mod stage;
pub mod ui;
pub mod world;

pub use assets::PipePalette;
pub use constants::TICK_INTERVAL_MS;
pub use session::{GameSession, Phase};
pub use stage::{EntityId, EntityKind, Stage, StageEvent};
pub use world::World;
