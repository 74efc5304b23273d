//! Procedural level: a left-to-right run of platforms, lava pits and one goal.
//!
//! Generation is a cursor walk. Each iteration rolls a weighted section type,
//! appends that section's obstacles and advances the cursor by their widths.
//! Gap and rise ranges are tuned to be clearable with the jump constants in
//! [`crate::world`]; nothing verifies reachability after the fact.

use alloc::vec::Vec;

use crate::rng::XorShift32;

/// Top of the default ground line.
pub const GROUND_Y: i32 = 180;
/// Ground platform thickness; reaches past the bottom of the screen.
pub const GROUND_H: i32 = 60;
/// Lava sits a little below the ground line so the player falls onto it.
const PIT_Y: i32 = 200;
const PIT_H: i32 = 36;
/// Starting platform; wide enough that nothing random can touch the spawn.
const START_W: i32 = 200;
/// Horizontal extent a level covers before the goal is placed.
pub const TARGET_LENGTH: i32 = 3200;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ObstacleKind {
    /// Solid and safe to stand on.
    Platform,
    /// Ends the run on contact.
    Hazard,
    /// Wins the run on contact.
    Goal,
}

/// Axis-aligned rectangle in world pixels. Immutable once generated.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    const fn platform(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h, kind: ObstacleKind::Platform }
    }

    const fn hazard(x: i32, w: i32) -> Self {
        Self { x, y: PIT_Y, w, h: PIT_H, kind: ObstacleKind::Hazard }
    }

    /// AABB overlap against a moving box (player is the only one).
    pub fn overlaps(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        x < (self.x + self.w) as f32
            && x + w > self.x as f32
            && y < (self.y + self.h) as f32
            && y + h > self.y as f32
    }
}

/// Ordered obstacle run from x=0 up to the goal. Rebuilt wholesale on reset.
pub struct Level {
    pub obstacles: Vec<Obstacle>,
}

impl Level {
    /// Generate a fresh layout covering `target_len` world pixels.
    ///
    /// The sequence always starts with the spawn platform and ends with a
    /// landing platform followed by the single goal obstacle.
    pub fn generate(rng: &mut XorShift32, target_len: i32) -> Self {
        let mut obstacles = Vec::new();
        obstacles.push(Obstacle::platform(0, GROUND_Y, START_W, GROUND_H));
        let mut cursor = START_W;

        while cursor < target_len {
            match rng.between(0, 99) {
                // Lava gap in the floor, then solid ground again.
                0..=29 => {
                    let gap = rng.between(40, 70);
                    let run = rng.between(80, 150);
                    obstacles.push(Obstacle::hazard(cursor, gap));
                    obstacles.push(Obstacle::platform(cursor + gap, GROUND_Y, run, GROUND_H));
                    cursor += gap + run;
                }
                // Raised platform with lava underneath it.
                30..=59 => {
                    let rise = rng.between(36, 56);
                    let pw = rng.between(60, 100);
                    let hw = pw + rng.between(30, 60);
                    obstacles.push(Obstacle::hazard(cursor, hw));
                    obstacles.push(Obstacle::platform(
                        cursor + (hw - pw) / 2,
                        GROUND_Y - rise,
                        pw,
                        12,
                    ));
                    cursor += hw;
                }
                // Wide lava gap; needs sprint or the double jump.
                60..=79 => {
                    let gap = rng.between(80, 120);
                    let run = rng.between(100, 160);
                    obstacles.push(Obstacle::hazard(cursor, gap));
                    obstacles.push(Obstacle::platform(cursor + gap, GROUND_Y, run, GROUND_H));
                    cursor += gap + run;
                }
                // Plain stretch of ground.
                _ => {
                    let run = rng.between(120, 220);
                    obstacles.push(Obstacle::platform(cursor, GROUND_Y, run, GROUND_H));
                    cursor += run;
                }
            }
        }

        // Landing platform, then the goal standing on it a bit ahead.
        obstacles.push(Obstacle::platform(cursor, GROUND_Y, 160, GROUND_H));
        obstacles.push(Obstacle {
            x: cursor + 60,
            y: GROUND_Y - 48,
            w: 24,
            h: 48,
            kind: ObstacleKind::Goal,
        });

        Self { obstacles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{PLAYER_SIZE, SPAWN_X, SPAWN_Y};

    fn generate() -> Level {
        let mut rng = XorShift32::new(0x1234_5678);
        Level::generate(&mut rng, TARGET_LENGTH)
    }

    #[test]
    fn obstacles_are_well_formed_and_ordered() {
        let level = generate();
        let mut last_x = 0;
        for obs in &level.obstacles {
            assert!(obs.w > 0 && obs.h > 0);
            assert!(obs.x >= last_x, "sequence must advance left to right");
            last_x = obs.x;
        }
    }

    #[test]
    fn level_reaches_target_length() {
        let level = generate();
        let max_extent = level
            .obstacles
            .iter()
            .map(|o| o.x + o.w)
            .max()
            .unwrap();
        assert!(max_extent >= TARGET_LENGTH);
    }

    #[test]
    fn ends_with_goal_on_a_landing_platform() {
        let level = generate();
        let goal = level.obstacles.last().unwrap();
        assert_eq!(goal.kind, ObstacleKind::Goal);
        assert_eq!(
            level
                .obstacles
                .iter()
                .filter(|o| o.kind == ObstacleKind::Goal)
                .count(),
            1
        );

        let landing = &level.obstacles[level.obstacles.len() - 2];
        assert_eq!(landing.kind, ObstacleKind::Platform);
        // Directly beneath: goal rests on the landing platform's top edge.
        assert_eq!(goal.y + goal.h, landing.y);
        assert!(landing.x <= goal.x && goal.x + goal.w <= landing.x + landing.w);
    }

    #[test]
    fn spawn_region_is_never_overlapped() {
        // Several layouts, since geometry is randomized per run.
        let mut rng = XorShift32::new(0xDEAD_BEEF);
        for _ in 0..20 {
            let level = Level::generate(&mut rng, TARGET_LENGTH);
            for obs in &level.obstacles {
                assert!(
                    !obs.overlaps(SPAWN_X, SPAWN_Y, PLAYER_SIZE, PLAYER_SIZE),
                    "{obs:?} intrudes on the spawn region"
                );
            }
        }
    }

    #[test]
    fn overlap_test_is_exclusive_at_edges() {
        let obs = Obstacle::platform(100, 180, 50, 10);
        assert!(obs.overlaps(120.0, 175.0, 12.0, 12.0));
        // Touching edges do not count as overlap.
        assert!(!obs.overlaps(88.0, 180.0, 12.0, 12.0));
        assert!(!obs.overlaps(150.0, 180.0, 12.0, 12.0));
        assert!(!obs.overlaps(120.0, 168.0, 12.0, 12.0));
    }
}
