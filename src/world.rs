//! Player kinematics, collision resolution and the session state machine.
//!
//! Everything advances in one `step` per frame, in a fixed order: speed
//! resolution, horizontal velocity, jump, gravity, then horizontal and
//! vertical integration each with its own collision pass. The two passes are
//! independent — one frame can stop against a wall and land on a platform at
//! the same time. Each pass resolves against the first overlapping obstacle
//! in sequence order only.

use crate::input::InputState;
use crate::level::{Level, ObstacleKind, TARGET_LENGTH};
use crate::rng::XorShift32;

/// Side length of the player's collision box.
pub const PLAYER_SIZE: f32 = 12.0;
pub const SPAWN_X: f32 = 50.0;
pub const SPAWN_Y: f32 = 100.0;

const MOVE_SPEED: f32 = 2.5;
const SPRINT_SPEED: f32 = 4.5;
const FRICTION: f32 = 0.8;

const JUMP_VY: f32 = -8.0;
const GRAVITY: f32 = 0.5;
const MAX_FALL: f32 = 8.0;

pub const SPRINT_MAX: f32 = 100.0;
const SPRINT_DRAIN: f32 = 1.5;
const SPRINT_REGEN: f32 = 0.5;

/// Falling past this line ends the run no matter what else happened.
const KILL_Y: f32 = 300.0;

const CAMERA_LEAD: f32 = 100.0;
const CAMERA_SMOOTH: f32 = 0.12;

#[derive(Clone, Copy, PartialEq, Eq, Debug, defmt::Format)]
pub enum GameState {
    Playing,
    /// Terminal; leaves only via the reset check.
    Failed,
    /// Terminal; leaves only via the reset check.
    Succeeded,
}

#[derive(Clone, Copy, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
    /// Mid-air jump allowance: granted on leaving the ground, restored on
    /// landing, consumed by the air jump. Never more than one.
    pub jumps_left: u8,
    /// Sprint energy, clamped to `0..=SPRINT_MAX`.
    pub sprint: f32,
}

impl Player {
    fn spawn() -> Self {
        Self {
            x: SPAWN_X,
            y: SPAWN_Y,
            vx: 0.0,
            vy: 0.0,
            grounded: false,
            jumps_left: 0,
            sprint: SPRINT_MAX,
        }
    }
}

/// The whole mutable simulation: player, level, camera and session state.
/// Owned by the game task and stepped exactly once per frame.
pub struct GameWorld {
    pub player: Player,
    pub level: Level,
    /// Smoothed horizontal scroll offset; never negative.
    pub camera_x: f32,
    pub state: GameState,
    rng: XorShift32,
}

impl GameWorld {
    pub fn new(seed: u32) -> Self {
        let mut rng = XorShift32::new(seed);
        let level = Level::generate(&mut rng, TARGET_LENGTH);
        Self {
            player: Player::spawn(),
            level,
            camera_x: 0.0,
            state: GameState::Playing,
            rng,
        }
    }

    /// Advance one frame.
    ///
    /// Terminal states freeze physics entirely; only the reset trigger is
    /// still honored there.
    pub fn step(&mut self, input: &InputState) {
        match self.state {
            GameState::Playing => self.step_playing(input),
            GameState::Failed | GameState::Succeeded => {
                if input.a_pressed || input.start {
                    self.reset();
                }
            }
        }
    }

    /// Throw away the level and start over from spawn.
    fn reset(&mut self) {
        self.level = Level::generate(&mut self.rng, TARGET_LENGTH);
        self.player = Player::spawn();
        self.camera_x = 0.0;
        self.state = GameState::Playing;
    }

    fn step_playing(&mut self, input: &InputState) {
        let p = &mut self.player;

        // Sprint: drain while B is held and energy remains, regen otherwise.
        // The clamp runs on both branches.
        let speed = if input.b && p.sprint > 0.0 {
            p.sprint -= SPRINT_DRAIN;
            SPRINT_SPEED
        } else {
            p.sprint += SPRINT_REGEN;
            MOVE_SPEED
        };
        p.sprint = p.sprint.clamp(0.0, SPRINT_MAX);

        // Horizontal velocity: left beats right beats coasting.
        if input.left {
            p.vx = -speed;
        } else if input.right {
            p.vx = speed;
        } else {
            p.vx *= FRICTION;
        }

        // Jump. Ground jump grants the one air jump; the air jump consumes
        // it with the same impulse. No third jump.
        if input.a_pressed {
            if p.grounded {
                p.vy = JUMP_VY;
                p.grounded = false;
                p.jumps_left = 1;
            } else if p.jumps_left > 0 {
                p.vy = JUMP_VY;
                p.jumps_left -= 1;
            }
        }

        // Gravity applies every frame; collision re-asserts groundedness.
        p.vy = (p.vy + GRAVITY).min(MAX_FALL);

        // Horizontal integration + first-hit resolution.
        p.x += p.vx;
        let mut touched: Option<ObstacleKind> = None;
        for obs in &self.level.obstacles {
            if obs.overlaps(p.x, p.y, PLAYER_SIZE, PLAYER_SIZE) {
                if p.vx > 0.0 {
                    p.x = obs.x as f32 - PLAYER_SIZE;
                } else if p.vx < 0.0 {
                    p.x = (obs.x + obs.w) as f32;
                }
                p.vx = 0.0;
                touched = Some(obs.kind);
                break;
            }
        }
        if let Some(kind) = touched {
            self.apply_touch(kind);
        }

        // Vertical integration + first-hit resolution. Landing is the only
        // thing that sets `grounded`.
        let p = &mut self.player;
        p.y += p.vy;
        let mut touched = None;
        let mut landed = false;
        for obs in &self.level.obstacles {
            if obs.overlaps(p.x, p.y, PLAYER_SIZE, PLAYER_SIZE) {
                if p.vy > 0.0 {
                    p.y = obs.y as f32 - PLAYER_SIZE;
                    landed = true;
                    p.jumps_left = 1;
                } else if p.vy < 0.0 {
                    p.y = (obs.y + obs.h) as f32;
                }
                p.vy = 0.0;
                touched = Some(obs.kind);
                break;
            }
        }
        self.player.grounded = landed;
        if let Some(kind) = touched {
            self.apply_touch(kind);
        }

        // Falling out of the world loses, whatever the passes above decided.
        if self.player.y > KILL_Y {
            self.state = GameState::Failed;
        }

        // Camera chases a point ahead of the player; never scrolls past 0.
        let target = self.player.x - CAMERA_LEAD;
        self.camera_x += (target - self.camera_x) * CAMERA_SMOOTH;
        if self.camera_x < 0.0 {
            self.camera_x = 0.0;
        }
    }

    /// Obstacle contact side effects. Hazard is checked before goal, so a
    /// frame that touches both (across the two axis passes) ends Succeeded.
    fn apply_touch(&mut self, kind: ObstacleKind) {
        if kind == ObstacleKind::Hazard {
            self.state = GameState::Failed;
        }
        if kind == ObstacleKind::Goal {
            self.state = GameState::Succeeded;
        }
    }
}
