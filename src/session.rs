//! The game session state machine.
//!
//! Owns all mutable gameplay state (phase, score, spawn timer, entity
//! handles) and every rule that mutates it: flap, per-tick update, obstacle
//! spawning, scoring, collision handling and restart. The session talks to
//! the host engine only through the [`Stage`] capability trait.

use crate::assets::{AnimationId, PipePalette, TextureId};
use crate::constants::*;
use crate::stage::{EntityId, EntityKind, Stage, StageEvent};
use rand::Rng;

/// Coarse lifecycle state of a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first flap; physics live but nothing moves yet.
    Idle,
    Playing,
    /// Physics paused, restart offered.
    GameOver,
}

pub struct GameSession {
    pub phase: Phase,
    pub score: u32,
    pub palette: PipePalette,
    /// While > 0, the previous flap's upward velocity keeps overriding the
    /// downward drift rule.
    frames_move_up: u32,
    spawn_timer: u32,

    player: EntityId,
    background: EntityId,
    ground: EntityId,
    message: EntityId,
    game_over_banner: EntityId,
    restart_button: EntityId,

    pipes: Vec<EntityId>,
    gaps: Vec<EntityId>,
    scoreboard: Vec<EntityId>,
}

impl GameSession {
    /// Build the fixed scene and prepare the first session.
    pub fn new<S: Stage>(stage: &mut S) -> Self {
        let background =
            stage.create_image(EntityKind::Decor, TextureId::Background(0), SCENE_CENTER_X, VIEW_HEIGHT / 2.0);

        let ground = stage.create_sprite(EntityKind::Ground, TextureId::Ground, GROUND_X, GROUND_Y);
        stage.set_depth(ground, 10);

        let message =
            stage.create_image(EntityKind::Decor, TextureId::MessageInitial, SCENE_CENTER_X, MESSAGE_Y);
        stage.set_depth(message, 30);
        stage.set_visible(message, false);

        let game_over_banner = stage.create_image(
            EntityKind::Decor,
            TextureId::GameOverBanner,
            SCENE_CENTER_X,
            GAME_OVER_BANNER_Y,
        );
        stage.set_depth(game_over_banner, 20);
        stage.set_visible(game_over_banner, false);

        let restart_button = stage.create_image(
            EntityKind::Decor,
            TextureId::RestartButton,
            SCENE_CENTER_X,
            RESTART_BUTTON_Y,
        );
        stage.set_depth(restart_button, 20);
        stage.set_visible(restart_button, false);

        let mut session = Self {
            phase: Phase::Idle,
            score: 0,
            palette: PipePalette::Green,
            frames_move_up: 0,
            spawn_timer: 0,
            player: EntityId(u64::MAX),
            background,
            ground,
            message,
            game_over_banner,
            restart_button,
            pipes: Vec::new(),
            gaps: Vec::new(),
            scoreboard: Vec::new(),
        };
        session.prepare(stage);
        session
    }

    /// Reset session state and recreate the player. Runs at construction and
    /// on every restart; re-establishes all session invariants.
    fn prepare<S: Stage>(&mut self, stage: &mut S) {
        self.phase = Phase::Idle;
        self.score = 0;
        self.palette = PipePalette::Green;
        self.frames_move_up = 0;
        self.spawn_timer = 0;

        stage.set_visible(self.message, true);
        stage.set_texture(self.background, TextureId::Background(0));

        let player =
            stage.create_sprite(EntityKind::Player, TextureId::Bird, PLAYER_SPAWN_X, PLAYER_SPAWN_Y);
        stage.set_hitbox(player, PLAYER_HITBOX_WIDTH, PLAYER_HITBOX_HEIGHT);
        stage.set_gravity_enabled(player, false);
        stage.play_animation(player, AnimationId::BirdClapWings, true);
        self.player = player;

        stage.play_animation(self.ground, AnimationId::GroundMoving, true);
    }

    /// Player-triggered upward impulse. Starts the session from `Idle`;
    /// ignored entirely in `GameOver`.
    pub fn flap<S: Stage, R: Rng>(&mut self, stage: &mut S, rng: &mut R) {
        match self.phase {
            Phase::GameOver => return,
            Phase::Idle => self.start_game(stage, rng),
            Phase::Playing => {}
        }

        stage.set_velocity_y(self.player, FLAP_VELOCITY_Y);
        stage.set_angle(self.player, FLAP_TILT_DEG);
        self.frames_move_up = FLAP_GRACE_TICKS;
    }

    /// First flap: mark the session started, hide the start prompt, seed the
    /// scoreboard and spawn the first obstacle pair immediately.
    fn start_game<S: Stage, R: Rng>(&mut self, stage: &mut S, rng: &mut R) {
        self.phase = Phase::Playing;
        stage.set_visible(self.message, false);

        let zero =
            stage.create_image(EntityKind::Decor, TextureId::Digit(0), SCENE_CENTER_X, SCOREBOARD_Y);
        stage.set_depth(zero, 20);
        self.scoreboard.push(zero);

        self.make_pipes(stage, rng);
    }

    /// Per-tick update. A complete no-op unless `Playing`.
    pub fn tick<S: Stage, R: Rng>(&mut self, stage: &mut S, rng: &mut R) {
        if self.phase != Phase::Playing {
            return;
        }

        // Vertical motion: flap grace overrides drift, then nose-down drift.
        if self.frames_move_up > 0 {
            self.frames_move_up -= 1;
        } else {
            stage.set_velocity_y(self.player, DRIFT_VELOCITY_Y);
            let angle = stage.angle(self.player);
            if angle < MAX_TILT_DEG {
                stage.set_angle(self.player, angle + TILT_STEP_DEG);
            }
        }

        // Scroll obstacles; destroy the ones past the left boundary.
        Self::scroll_and_reap(stage, &mut self.pipes);
        Self::scroll_and_reap(stage, &mut self.gaps);

        self.spawn_timer += 1;
        if self.spawn_timer == SPAWN_INTERVAL_TICKS {
            self.make_pipes(stage, rng);
            self.spawn_timer = 0;
        }

        // Integrate physics and handle the events it reports, in order.
        for event in stage.step(TICK_SECONDS) {
            match event {
                StageEvent::PlayerHit => self.hit_player(stage),
                StageEvent::GapCrossed(gap) => self.update_score(stage, gap),
            }
        }
    }

    /// Apply the scroll velocity to one handle group, reaping off-screen
    /// entries and handles the stage no longer knows.
    fn scroll_and_reap<S: Stage>(stage: &mut S, group: &mut Vec<EntityId>) {
        let mut dead = Vec::new();
        for &id in group.iter() {
            match stage.position(id) {
                Some((x, _)) if x < PIPE_DESPAWN_X => {
                    stage.destroy(id);
                    dead.push(id);
                }
                Some(_) => stage.set_velocity_x(id, SCROLL_VELOCITY_X),
                None => dead.push(id),
            }
        }
        group.retain(|id| !dead.contains(id));
    }

    /// Spawn rule: one obstacle pair plus its gap sensor at the right edge,
    /// with the gap offset chosen uniformly at random. No-op unless `Playing`.
    fn make_pipes<S: Stage, R: Rng>(&mut self, stage: &mut S, rng: &mut R) {
        if self.phase != Phase::Playing {
            return;
        }

        let pipe_top_y = rng.gen_range(-PIPE_TOP_OFFSET_RANGE..=PIPE_TOP_OFFSET_RANGE) as f32;

        let gap = stage.create_image(
            EntityKind::GapSensor,
            TextureId::GapMarker,
            PIPE_SPAWN_X,
            pipe_top_y + GAP_SENSOR_OFFSET_Y,
        );
        stage.set_gravity_enabled(gap, false);
        stage.set_visible(gap, false);
        self.gaps.push(gap);

        let top = stage.create_image(
            EntityKind::Pipe,
            TextureId::PipeTop(self.palette),
            PIPE_SPAWN_X,
            pipe_top_y,
        );
        stage.set_gravity_enabled(top, false);
        self.pipes.push(top);

        let bottom = stage.create_image(
            EntityKind::Pipe,
            TextureId::PipeBottom(self.palette),
            PIPE_SPAWN_X,
            pipe_top_y + PIPE_VERTICAL_GAP,
        );
        stage.set_gravity_enabled(bottom, false);
        self.pipes.push(bottom);
    }

    /// Collision handler: the player hit the ground or a pipe.
    fn hit_player<S: Stage>(&mut self, stage: &mut S) {
        if self.phase != Phase::Playing {
            return;
        }

        stage.pause_physics();
        self.phase = Phase::GameOver;

        stage.play_animation(self.player, AnimationId::BirdStop, false);
        stage.play_animation(self.ground, AnimationId::GroundStop, false);

        stage.set_visible(self.game_over_banner, true);
        stage.set_visible(self.restart_button, true);
    }

    /// Overlap handler: the player crossed a gap. Destroys the sensor,
    /// advances score and palette, refreshes the scoreboard. Never ends the
    /// game by itself.
    fn update_score<S: Stage>(&mut self, stage: &mut S, gap: EntityId) {
        if self.phase != Phase::Playing {
            return;
        }

        stage.destroy(gap);
        self.gaps.retain(|id| *id != gap);

        self.score += 1;
        let palette_index = self.score % BACKGROUND_COUNT;
        stage.set_texture(self.background, TextureId::Background(palette_index as u8));
        self.palette = if (5..=7).contains(&palette_index) {
            PipePalette::Red
        } else {
            PipePalette::Green
        };

        self.update_scoreboard(stage);
    }

    /// Redraw the score as a centered row of digit glyphs.
    fn update_scoreboard<S: Stage>(&mut self, stage: &mut S) {
        for id in self.scoreboard.drain(..) {
            stage.destroy(id);
        }

        let digits = decimal_digits(self.score);
        if digits.len() == 1 {
            let glyph = stage.create_image(
                EntityKind::Decor,
                TextureId::digit(digits[0]),
                SCENE_CENTER_X,
                SCOREBOARD_Y,
            );
            stage.set_depth(glyph, 10);
            self.scoreboard.push(glyph);
        } else {
            let mut x = SCENE_CENTER_X - (digits.len() as f32 * DIGIT_WIDTH) / 2.0;
            for d in digits {
                let glyph =
                    stage.create_image(EntityKind::Decor, TextureId::digit(d), x, SCOREBOARD_Y);
                stage.set_depth(glyph, 10);
                self.scoreboard.push(glyph);
                x += DIGIT_WIDTH;
            }
        }
    }

    /// Restart command. Only acts from `GameOver`: clears every transient
    /// entity, recreates the player and resumes physics.
    pub fn restart<S: Stage>(&mut self, stage: &mut S) {
        if self.phase != Phase::GameOver {
            return;
        }

        for id in self.pipes.drain(..) {
            stage.destroy(id);
        }
        for id in self.gaps.drain(..) {
            stage.destroy(id);
        }
        for id in self.scoreboard.drain(..) {
            stage.destroy(id);
        }
        stage.destroy(self.player);

        stage.set_visible(self.game_over_banner, false);
        stage.set_visible(self.restart_button, false);

        self.prepare(stage);
        stage.resume_physics();
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn ground(&self) -> EntityId {
        self.ground
    }

    pub fn background(&self) -> EntityId {
        self.background
    }

    pub fn pipes(&self) -> &[EntityId] {
        &self.pipes
    }

    pub fn gaps(&self) -> &[EntityId] {
        &self.gaps
    }

    pub fn scoreboard_digits(&self) -> &[EntityId] {
        &self.scoreboard
    }
}

/// Most-significant-first decimal digits of `n` (score 0 renders as "0").
fn decimal_digits(mut n: u32) -> Vec<u8> {
    if n == 0 {
        return vec![0];
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push((n % 10) as u8);
        n /= 10;
    }
    digits.reverse();
    digits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::World;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn new_session() -> (World, GameSession) {
        let mut world = World::new();
        let session = GameSession::new(&mut world);
        (world, session)
    }

    #[test]
    fn test_new_session_starts_idle() {
        let (world, session) = new_session();
        assert_eq!(session.phase, Phase::Idle);
        assert_eq!(session.score, 0);
        assert_eq!(session.palette, PipePalette::Green);
        assert!(session.pipes().is_empty());
        assert!(session.gaps().is_empty());
        assert_eq!(world.count_kind(EntityKind::Player), 1);
    }

    #[test]
    fn test_first_flap_starts_game_and_spawns_one_pair() {
        let (mut world, mut session) = new_session();
        session.flap(&mut world, &mut rng());
        assert_eq!(session.phase, Phase::Playing);
        assert_eq!(session.pipes().len(), 2);
        assert_eq!(session.gaps().len(), 1);
        assert_eq!(session.scoreboard_digits().len(), 1);
        assert_eq!(
            world.texture(session.scoreboard_digits()[0]),
            Some(TextureId::Digit(0))
        );
    }

    #[test]
    fn test_flap_sets_upward_velocity_and_tilt() {
        let (mut world, mut session) = new_session();
        session.flap(&mut world, &mut rng());
        assert_eq!(
            world.velocity(session.player()),
            Some((0.0, FLAP_VELOCITY_Y))
        );
        assert!((world.angle(session.player()) - FLAP_TILT_DEG).abs() < f32::EPSILON);
    }

    #[test]
    fn test_flap_in_game_over_is_noop() {
        let (mut world, mut session) = new_session();
        session.phase = Phase::GameOver;
        session.flap(&mut world, &mut rng());
        assert_eq!(session.phase, Phase::GameOver);
        assert!(session.pipes().is_empty());
        assert_eq!(world.velocity(session.player()), Some((0.0, 0.0)));
    }

    #[test]
    fn test_tick_is_noop_while_idle() {
        let (mut world, mut session) = new_session();
        let before = world.position(session.player());
        session.tick(&mut world, &mut rng());
        assert_eq!(world.position(session.player()), before);
        assert!(session.pipes().is_empty());
    }

    #[test]
    fn test_drift_applies_after_grace_expires() {
        let (mut world, mut session) = new_session();
        session.flap(&mut world, &mut rng());
        // Grace lasts FLAP_GRACE_TICKS ticks; velocity stays at the flap value.
        for _ in 0..FLAP_GRACE_TICKS {
            session.tick(&mut world, &mut rng());
            let (_, vy) = world.velocity(session.player()).unwrap();
            assert!((vy - FLAP_VELOCITY_Y).abs() < f32::EPSILON);
        }
        session.tick(&mut world, &mut rng());
        let (_, vy) = world.velocity(session.player()).unwrap();
        assert!((vy - DRIFT_VELOCITY_Y).abs() < f32::EPSILON);
    }

    #[test]
    fn test_tilt_caps_at_ninety_degrees() {
        let (mut world, mut session) = new_session();
        session.flap(&mut world, &mut rng());
        // Pin the player inside the first gap so the session stays alive.
        let (_, top_y) = world.position(session.pipes()[0]).unwrap();
        for _ in 0..200 {
            assert_eq!(session.phase, Phase::Playing);
            world.set_position(session.player(), PLAYER_SPAWN_X, top_y + GAP_SENSOR_OFFSET_Y);
            session.tick(&mut world, &mut rng());
        }
        assert!(world.angle(session.player()) <= MAX_TILT_DEG);
        assert!(world.angle(session.player()) > 80.0);
    }

    #[test]
    fn test_spawn_interval_produces_second_pair() {
        let (mut world, mut session) = new_session();
        let mut r = rng();
        session.flap(&mut world, &mut r);
        let (_, top_y) = world.position(session.pipes()[0]).unwrap();
        for _ in 0..SPAWN_INTERVAL_TICKS {
            world.set_position(session.player(), PLAYER_SPAWN_X, top_y + GAP_SENSOR_OFFSET_Y);
            session.tick(&mut world, &mut r);
        }
        assert_eq!(session.pipes().len(), 4);
        // The first sensor was consumed by the score overlap on the way, so
        // only the freshly spawned one remains.
        assert_eq!(session.gaps().len(), 1);
        assert_eq!(session.score, 1);
    }

    #[test]
    fn test_spawn_offset_stays_in_range() {
        let (mut world, mut session) = new_session();
        let mut r = rng();
        session.flap(&mut world, &mut r);
        for _ in 0..20 {
            session.phase = Phase::Playing;
            session.make_pipes(&mut world, &mut r);
        }
        for pair in session.pipes().chunks(2) {
            let (_, top_y) = world.position(pair[0]).unwrap();
            assert!(top_y >= -(PIPE_TOP_OFFSET_RANGE as f32));
            assert!(top_y <= PIPE_TOP_OFFSET_RANGE as f32);
            let (_, bottom_y) = world.position(pair[1]).unwrap();
            assert!((bottom_y - top_y - PIPE_VERTICAL_GAP).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_make_pipes_is_noop_outside_playing() {
        let (mut world, mut session) = new_session();
        session.make_pipes(&mut world, &mut rng());
        assert!(session.pipes().is_empty());
        assert_eq!(world.count_kind(EntityKind::Pipe), 0);
    }

    #[test]
    fn test_score_increment_and_palette_cycle() {
        let (mut world, mut session) = new_session();
        session.flap(&mut world, &mut rng());

        for expected in 1..=8u32 {
            let gap = session.gaps()[0];
            session.update_score(&mut world, gap);
            assert_eq!(session.score, expected);
            // A fresh sensor for the next pass
            let next = world.create_image(EntityKind::GapSensor, TextureId::GapMarker, 288.0, 210.0);
            session.gaps.insert(0, next);
        }
        // score 8 wraps the background back to index 0 and the palette to green
        assert_eq!(
            world.texture(session.background()),
            Some(TextureId::Background(0))
        );
        assert_eq!(session.palette, PipePalette::Green);
    }

    #[test]
    fn test_palette_turns_red_at_index_five() {
        let (mut world, mut session) = new_session();
        session.flap(&mut world, &mut rng());
        session.score = 4;
        let gap = session.gaps()[0];
        session.update_score(&mut world, gap);
        assert_eq!(session.score, 5);
        assert_eq!(session.palette, PipePalette::Red);
        assert_eq!(
            world.texture(session.background()),
            Some(TextureId::Background(5))
        );
    }

    #[test]
    fn test_scoreboard_single_digit_centered() {
        let (mut world, mut session) = new_session();
        session.flap(&mut world, &mut rng());
        session.score = 7;
        session.update_scoreboard(&mut world);
        assert_eq!(session.scoreboard_digits().len(), 1);
        let (x, y) = world.position(session.scoreboard_digits()[0]).unwrap();
        assert!((x - SCENE_CENTER_X).abs() < f32::EPSILON);
        assert!((y - SCOREBOARD_Y).abs() < f32::EPSILON);
    }

    #[test]
    fn test_scoreboard_two_digits_flank_center() {
        let (mut world, mut session) = new_session();
        session.flap(&mut world, &mut rng());
        session.score = 42;
        session.update_scoreboard(&mut world);
        let digits = session.scoreboard_digits();
        assert_eq!(digits.len(), 2);
        assert_eq!(world.texture(digits[0]), Some(TextureId::Digit(4)));
        assert_eq!(world.texture(digits[1]), Some(TextureId::Digit(2)));
        let (x0, _) = world.position(digits[0]).unwrap();
        let (x1, _) = world.position(digits[1]).unwrap();
        assert!((x0 - (SCENE_CENTER_X - DIGIT_WIDTH)).abs() < f32::EPSILON);
        assert!((x1 - SCENE_CENTER_X).abs() < f32::EPSILON);
        assert!((x1 - x0 - DIGIT_WIDTH).abs() < f32::EPSILON);
    }

    #[test]
    fn test_restart_is_noop_outside_game_over() {
        let (mut world, mut session) = new_session();
        session.flap(&mut world, &mut rng());
        let player = session.player();
        session.restart(&mut world);
        assert_eq!(session.phase, Phase::Playing);
        assert_eq!(session.player(), player);
        assert!(world.contains(player));
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal_digits(0), vec![0]);
        assert_eq!(decimal_digits(7), vec![7]);
        assert_eq!(decimal_digits(42), vec![4, 2]);
        assert_eq!(decimal_digits(105), vec![1, 0, 5]);
    }
}
