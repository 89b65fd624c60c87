//! In-process arcade physics and scene store implementing [`Stage`].
//!
//! Entities live in a flat table keyed by monotonically increasing ids.
//! Each fixed step integrates gravity and velocity, clamps world-bound
//! entities to the viewport, then reports player collision and overlap
//! events for the session to handle.

use crate::assets::{AnimationId, TextureId};
use crate::constants::{GRAVITY_Y, VIEW_HEIGHT};
use crate::stage::{EntityId, EntityKind, Stage, StageEvent};

/// A single scene entity with its physical and visual state.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub texture: TextureId,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Collision box extents (defaults to the texture size).
    pub width: f32,
    pub height: f32,
    pub angle: f32,
    pub depth: i32,
    pub visible: bool,
    pub gravity_enabled: bool,
    /// Player and ground stop at the viewport edges instead of leaving it.
    pub world_bounded: bool,
    pub animation: Option<(AnimationId, bool)>,
}

pub struct World {
    entities: Vec<Entity>,
    next_id: u64,
    paused: bool,
    frame: u64,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 0,
            paused: false,
            frame: 0,
        }
    }

    fn spawn(&mut self, kind: EntityKind, texture: TextureId, x: f32, y: f32, gravity: bool) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let (width, height) = texture.size();
        self.entities.push(Entity {
            id,
            kind,
            texture,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width,
            height,
            angle: 0.0,
            depth: 0,
            visible: true,
            gravity_enabled: gravity,
            world_bounded: matches!(kind, EntityKind::Player | EntityKind::Ground),
            animation: None,
        });
        id
    }

    fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Entities in draw order: ascending depth, insertion order within a depth.
    pub fn entities_by_depth(&self) -> Vec<&Entity> {
        let mut all: Vec<&Entity> = self.entities.iter().collect();
        all.sort_by_key(|e| e.depth);
        all
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    pub fn texture(&self, id: EntityId) -> Option<TextureId> {
        self.get(id).map(|e| e.texture)
    }

    pub fn velocity(&self, id: EntityId) -> Option<(f32, f32)> {
        self.get(id).map(|e| (e.vx, e.vy))
    }

    pub fn animation(&self, id: EntityId) -> Option<(AnimationId, bool)> {
        self.get(id).and_then(|e| e.animation)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Teleport an entity. Host-side placement; the session only ever moves
    /// entities through velocities.
    pub fn set_position(&mut self, id: EntityId, x: f32, y: f32) {
        if let Some(e) = self.get_mut(id) {
            e.x = x;
            e.y = y;
        }
    }

    fn collect_events(&self) -> Vec<StageEvent> {
        let Some(player) = self.entities.iter().find(|e| e.kind == EntityKind::Player) else {
            return Vec::new();
        };

        let mut events = Vec::new();
        let mut hit = false;
        for other in &self.entities {
            match other.kind {
                EntityKind::Ground | EntityKind::Pipe => {
                    if !hit && aabb_overlap(player, other) {
                        events.push(StageEvent::PlayerHit);
                        hit = true;
                    }
                }
                EntityKind::GapSensor => {
                    if aabb_overlap(player, other) {
                        events.push(StageEvent::GapCrossed(other.id));
                    }
                }
                _ => {}
            }
        }
        events
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn aabb_overlap(a: &Entity, b: &Entity) -> bool {
    (a.x - b.x).abs() * 2.0 < a.width + b.width && (a.y - b.y).abs() * 2.0 < a.height + b.height
}

impl Stage for World {
    fn create_image(&mut self, kind: EntityKind, texture: TextureId, x: f32, y: f32) -> EntityId {
        self.spawn(kind, texture, x, y, false)
    }

    fn create_sprite(&mut self, kind: EntityKind, texture: TextureId, x: f32, y: f32) -> EntityId {
        self.spawn(kind, texture, x, y, true)
    }

    fn set_texture(&mut self, id: EntityId, texture: TextureId) {
        if let Some(e) = self.get_mut(id) {
            e.texture = texture;
        }
    }

    fn set_visible(&mut self, id: EntityId, visible: bool) {
        if let Some(e) = self.get_mut(id) {
            e.visible = visible;
        }
    }

    fn set_depth(&mut self, id: EntityId, depth: i32) {
        if let Some(e) = self.get_mut(id) {
            e.depth = depth;
        }
    }

    fn destroy(&mut self, id: EntityId) {
        self.entities.retain(|e| e.id != id);
    }

    fn play_animation(&mut self, id: EntityId, animation: AnimationId, looped: bool) {
        if let Some(e) = self.get_mut(id) {
            e.animation = Some((animation, looped));
        }
    }

    fn set_velocity(&mut self, id: EntityId, vx: f32, vy: f32) {
        if let Some(e) = self.get_mut(id) {
            e.vx = vx;
            e.vy = vy;
        }
    }

    fn set_velocity_x(&mut self, id: EntityId, vx: f32) {
        if let Some(e) = self.get_mut(id) {
            e.vx = vx;
        }
    }

    fn set_velocity_y(&mut self, id: EntityId, vy: f32) {
        if let Some(e) = self.get_mut(id) {
            e.vy = vy;
        }
    }

    fn set_gravity_enabled(&mut self, id: EntityId, enabled: bool) {
        if let Some(e) = self.get_mut(id) {
            e.gravity_enabled = enabled;
        }
    }

    fn set_hitbox(&mut self, id: EntityId, width: f32, height: f32) {
        if let Some(e) = self.get_mut(id) {
            e.width = width;
            e.height = height;
        }
    }

    fn set_angle(&mut self, id: EntityId, degrees: f32) {
        if let Some(e) = self.get_mut(id) {
            e.angle = degrees;
        }
    }

    fn angle(&self, id: EntityId) -> f32 {
        self.get(id).map(|e| e.angle).unwrap_or(0.0)
    }

    fn position(&self, id: EntityId) -> Option<(f32, f32)> {
        self.get(id).map(|e| (e.x, e.y))
    }

    fn pause_physics(&mut self) {
        self.paused = true;
    }

    fn resume_physics(&mut self) {
        self.paused = false;
    }

    fn physics_paused(&self) -> bool {
        self.paused
    }

    fn step(&mut self, dt: f32) -> Vec<StageEvent> {
        if self.paused {
            return Vec::new();
        }
        self.frame += 1;

        for e in &mut self.entities {
            if e.gravity_enabled {
                e.vy += GRAVITY_Y * dt;
            }
            e.x += e.vx * dt;
            e.y += e.vy * dt;

            if e.world_bounded {
                let top = e.height / 2.0;
                let bottom = VIEW_HEIGHT - e.height / 2.0;
                if e.y < top {
                    e.y = top;
                    e.vy = 0.0;
                } else if e.y > bottom {
                    e.y = bottom;
                    e.vy = 0.0;
                }
            }
        }

        self.collect_events()
    }
}
