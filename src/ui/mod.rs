pub mod scene;

use crate::session::GameSession;
use crate::world::World;
use ratatui::Frame;

/// Top-level draw: the whole terminal is the game scene.
pub fn draw_ui(frame: &mut Frame, world: &World, session: &GameSession) {
    let size = frame.size();
    scene::render_game(frame, size, world, session);
}
