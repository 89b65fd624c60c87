//! Capability interface between the game session and the host engine.
//!
//! The session never touches rendering or physics directly: it creates and
//! manipulates entities through this trait and reacts to the events a
//! physics step reports. `World` is the in-process implementation.

use crate::assets::{AnimationId, TextureId};

/// Opaque handle to a stage entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

/// Collision/overlap group an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Ground,
    Pipe,
    GapSensor,
    /// Purely visual entity: backgrounds, banners, scoreboard digits.
    Decor,
}

/// Events reported synchronously by a physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    /// The player hit the ground or a pipe.
    PlayerHit,
    /// The player overlapped a gap sensor.
    GapCrossed(EntityId),
}

/// Host-engine surface consumed by the session.
///
/// Operations on destroyed or unknown handles are no-ops; out-of-range
/// queries return `None` or a neutral value. The session treats those as
/// defensive no-ops rather than errors.
pub trait Stage {
    /// Create a static image entity. No gravity, no animation.
    fn create_image(&mut self, kind: EntityKind, texture: TextureId, x: f32, y: f32) -> EntityId;
    /// Create an animated physics sprite. Gravity-enabled until disabled.
    fn create_sprite(&mut self, kind: EntityKind, texture: TextureId, x: f32, y: f32) -> EntityId;

    fn set_texture(&mut self, id: EntityId, texture: TextureId);
    fn set_visible(&mut self, id: EntityId, visible: bool);
    fn set_depth(&mut self, id: EntityId, depth: i32);
    fn destroy(&mut self, id: EntityId);

    fn play_animation(&mut self, id: EntityId, animation: AnimationId, looped: bool);

    fn set_velocity(&mut self, id: EntityId, vx: f32, vy: f32);
    fn set_velocity_x(&mut self, id: EntityId, vx: f32);
    fn set_velocity_y(&mut self, id: EntityId, vy: f32);
    fn set_gravity_enabled(&mut self, id: EntityId, enabled: bool);
    /// Override the collision box (defaults to the texture size).
    fn set_hitbox(&mut self, id: EntityId, width: f32, height: f32);

    fn set_angle(&mut self, id: EntityId, degrees: f32);
    fn angle(&self, id: EntityId) -> f32;
    fn position(&self, id: EntityId) -> Option<(f32, f32)>;

    fn pause_physics(&mut self);
    fn resume_physics(&mut self);
    fn physics_paused(&self) -> bool;

    /// Advance the simulation one fixed step and report collision/overlap
    /// events. A no-op returning no events while physics is paused.
    fn step(&mut self, dt: f32) -> Vec<StageEvent>;
}
