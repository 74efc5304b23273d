//! Camera-relative render pass onto an off-screen `Rgb565` buffer.
//!
//! One `draw_frame` per tick: full clear, culled obstacles, player, sprint
//! bar, and the status banner when the run is over. [`Frame`] wraps the raw
//! pixel buffer with clipped primitives and also implements `DrawTarget`, so
//! the banner text goes through embedded-graphics like everything else that
//! needs a font.

use core::convert::Infallible;

use embedded_graphics::{
    mono_font::{MonoTextStyle, iso_8859_1::FONT_6X10},
    pixelcolor::Rgb565,
    prelude::*,
    text::Text,
};

use crate::level::ObstacleKind;
use crate::world::{GameState, GameWorld, PLAYER_SIZE, SPRINT_MAX};

pub const W: i32 = 320;
pub const H: i32 = 240;
pub const PIXELS: usize = (W * H) as usize;

const SKY: Rgb565 = Rgb565::new(2, 5, 10);
const PLATFORM_BODY: Rgb565 = Rgb565::new(8, 20, 10);
const PLATFORM_EDGE: Rgb565 = Rgb565::new(14, 36, 16);
const LAVA_BODY: Rgb565 = Rgb565::new(24, 12, 1);
const LAVA_GLOW: Rgb565 = Rgb565::new(31, 30, 4);
const GOAL_BODY: Rgb565 = Rgb565::new(28, 52, 6);
const GOAL_EDGE: Rgb565 = Rgb565::new(31, 63, 20);
const PLAYER_COLOR: Rgb565 = Rgb565::new(6, 48, 31);

const BAR_X: i32 = 4;
const BAR_Y: i32 = 4;
const BAR_W: i32 = 64;
const BAR_H: i32 = 10;
const BAR_FRAME: Rgb565 = Rgb565::new(26, 52, 26);
const BAR_BG: Rgb565 = Rgb565::new(2, 8, 4);
const BAR_FILL: Rgb565 = Rgb565::new(6, 48, 12);

const BANNER_BG: Rgb565 = Rgb565::new(2, 4, 3);
const BANNER_BORDER: Rgb565 = Rgb565::new(20, 40, 20);

/// Off-screen frame, drawn in full every tick and then presented whole.
pub struct Frame<'a> {
    pub buf: &'a mut [Rgb565; PIXELS],
}

impl Frame<'_> {
    pub fn put(&mut self, x: i32, y: i32, color: Rgb565) {
        if x >= 0 && x < W && y >= 0 && y < H {
            self.buf[(y * W + x) as usize] = color;
        }
    }

    pub fn fill_rect(&mut self, x0: i32, y0: i32, w: i32, h: i32, color: Rgb565) {
        let x1 = x0.max(0);
        let y1 = y0.max(0);
        let x2 = (x0 + w).min(W);
        let y2 = (y0 + h).min(H);
        for y in y1..y2 {
            let off = (y * W) as usize;
            for x in x1..x2 {
                self.buf[off + x as usize] = color;
            }
        }
    }

    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, color: Rgb565) {
        if y < 0 || y >= H {
            return;
        }
        let xa = x0.max(0);
        let xb = x1.min(W);
        let off = (y * W) as usize;
        for x in xa..xb {
            self.buf[off + x as usize] = color;
        }
    }
}

impl OriginDimensions for Frame<'_> {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl DrawTarget for Frame<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.put(point.x, point.y, color);
        }
        Ok(())
    }
}

/// Draw the whole world for this tick.
pub fn draw_frame(frame: &mut Frame, world: &GameWorld) {
    frame.buf.fill(SKY);

    let cam = world.camera_x as i32;
    draw_obstacles(frame, world, cam);
    draw_player(frame, world, cam);
    draw_energy_bar(frame, world.player.sprint);
    draw_banner(frame, world.state);
}

fn draw_obstacles(frame: &mut Frame, world: &GameWorld, cam: i32) {
    for obs in &world.level.obstacles {
        let sx = obs.x - cam;
        // Off the viewport entirely; skip.
        if sx + obs.w <= 0 || sx >= W {
            continue;
        }
        match obs.kind {
            ObstacleKind::Platform => {
                frame.fill_rect(sx, obs.y, obs.w, obs.h, PLATFORM_BODY);
                frame.hline(sx, sx + obs.w, obs.y, PLATFORM_EDGE);
            }
            ObstacleKind::Hazard => {
                frame.fill_rect(sx, obs.y, obs.w, obs.h, LAVA_BODY);
                frame.hline(sx, sx + obs.w, obs.y, LAVA_GLOW);
                frame.hline(sx, sx + obs.w, obs.y + 1, LAVA_GLOW);
            }
            ObstacleKind::Goal => {
                frame.fill_rect(sx, obs.y, obs.w, obs.h, GOAL_BODY);
                frame.hline(sx, sx + obs.w, obs.y, GOAL_EDGE);
            }
        }
    }
}

fn draw_player(frame: &mut Frame, world: &GameWorld, cam: i32) {
    let size = PLAYER_SIZE as i32;
    let px = world.player.x as i32 - cam;
    let py = world.player.y as i32;
    frame.fill_rect(px, py, size, size, PLAYER_COLOR);
}

fn draw_energy_bar(frame: &mut Frame, sprint: f32) {
    // Outline, dark well, then the filled proportion.
    frame.fill_rect(BAR_X, BAR_Y, BAR_W, BAR_H, BAR_FRAME);
    frame.fill_rect(BAR_X + 1, BAR_Y + 1, BAR_W - 2, BAR_H - 2, BAR_BG);
    let fill = ((sprint / SPRINT_MAX) * (BAR_W - 2) as f32) as i32;
    frame.fill_rect(BAR_X + 1, BAR_Y + 1, fill, BAR_H - 2, BAR_FILL);
}

fn draw_banner(frame: &mut Frame, state: GameState) {
    let (message, color) = match state {
        GameState::Playing => return,
        GameState::Failed => ("GAME OVER", Rgb565::RED),
        GameState::Succeeded => ("YOU MADE IT", Rgb565::GREEN),
    };

    frame.fill_rect(W / 2 - 90, H / 2 - 28, 180, 56, BANNER_BG);
    frame.hline(W / 2 - 90, W / 2 + 90, H / 2 - 28, BANNER_BORDER);
    frame.hline(W / 2 - 90, W / 2 + 90, H / 2 + 27, BANNER_BORDER);

    let style = MonoTextStyle::new(&FONT_6X10, color);
    let hint_style = MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE);
    centered(frame, message, H / 2 - 6, style);
    centered(frame, "Press A to restart", H / 2 + 14, hint_style);
}

fn centered(frame: &mut Frame, text: &str, baseline_y: i32, style: MonoTextStyle<'_, Rgb565>) {
    let x = (W - text.len() as i32 * 6) / 2;
    Text::new(text, Point::new(x, baseline_y), style)
        .draw(frame)
        .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{Level, Obstacle};
    use crate::world::GameWorld;
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;

    fn world_with(obstacles: Vec<Obstacle>) -> GameWorld {
        let mut world = GameWorld::new(1);
        world.level = Level { obstacles };
        world
    }

    fn rendered(world: &GameWorld) -> Box<[Rgb565; PIXELS]> {
        let mut buf = Box::new([Rgb565::BLACK; PIXELS]);
        let mut frame = Frame { buf: &mut *buf };
        draw_frame(&mut frame, world);
        buf
    }

    fn px(buf: &[Rgb565; PIXELS], x: i32, y: i32) -> Rgb565 {
        buf[(y * W + x) as usize]
    }

    #[test]
    fn clear_covers_the_whole_buffer() {
        let buf = rendered(&world_with(Vec::new()));
        assert_eq!(px(&buf, 0, H - 1), SKY);
        assert_eq!(px(&buf, W - 1, 0), SKY);
        assert_eq!(px(&buf, W - 1, H - 1), SKY);
    }

    #[test]
    fn player_is_drawn_at_its_camera_relative_position() {
        // Fresh world: player at spawn, camera at zero.
        let world = world_with(Vec::new());
        let buf = rendered(&world);
        let (cx, cy) = (
            world.player.x as i32 + PLAYER_SIZE as i32 / 2,
            world.player.y as i32 + PLAYER_SIZE as i32 / 2,
        );
        assert_eq!(px(&buf, cx, cy), PLAYER_COLOR);
    }

    #[test]
    fn obstacles_are_colored_by_kind() {
        let world = world_with(vec![
            Obstacle { x: 0, y: 180, w: 100, h: 60, kind: ObstacleKind::Platform },
            Obstacle { x: 100, y: 200, w: 60, h: 36, kind: ObstacleKind::Hazard },
            Obstacle { x: 200, y: 132, w: 24, h: 48, kind: ObstacleKind::Goal },
        ]);
        let buf = rendered(&world);
        assert_eq!(px(&buf, 50, 200), PLATFORM_BODY);
        assert_eq!(px(&buf, 50, 180), PLATFORM_EDGE);
        assert_eq!(px(&buf, 130, 220), LAVA_BODY);
        assert_eq!(px(&buf, 130, 200), LAVA_GLOW);
        assert_eq!(px(&buf, 210, 150), GOAL_BODY);
    }

    #[test]
    fn offscreen_obstacles_are_culled() {
        let world = world_with(vec![Obstacle {
            x: 1000,
            y: 180,
            w: 100,
            h: 60,
            kind: ObstacleKind::Platform,
        }]);
        let buf = rendered(&world);
        assert_eq!(px(&buf, 100, 200), SKY);
    }

    #[test]
    fn scrolled_obstacle_lands_at_viewport_coordinates() {
        let mut world = world_with(vec![Obstacle {
            x: 500,
            y: 180,
            w: 100,
            h: 60,
            kind: ObstacleKind::Platform,
        }]);
        world.camera_x = 480.0;
        let buf = rendered(&world);
        assert_eq!(px(&buf, 60, 200), PLATFORM_BODY);
    }

    #[test]
    fn energy_bar_reflects_sprint_level() {
        let mut world = world_with(Vec::new());
        world.player.sprint = SPRINT_MAX;
        let buf = rendered(&world);
        assert_eq!(px(&buf, BAR_X, BAR_Y), BAR_FRAME);
        assert_eq!(px(&buf, BAR_X + 1, BAR_Y + 1), BAR_FILL);
        assert_eq!(px(&buf, BAR_X + BAR_W - 1, BAR_Y + BAR_H - 1), BAR_FRAME);

        world.player.sprint = 0.0;
        let buf = rendered(&world);
        assert_eq!(px(&buf, BAR_X + 1, BAR_Y + 1), BAR_BG);
    }

    #[test]
    fn banner_appears_only_in_terminal_states() {
        let mut world = world_with(Vec::new());
        let corner = (W / 2 - 88, H / 2 - 26);

        let buf = rendered(&world);
        assert_eq!(px(&buf, corner.0, corner.1), SKY);

        world.state = GameState::Failed;
        let buf = rendered(&world);
        assert_eq!(px(&buf, corner.0, corner.1), BANNER_BG);

        // Some red text pixel exists around the message baseline.
        let hit = (0..W).any(|x| {
            (H / 2 - 16..H / 2 + 4).any(|y| px(&buf, x, y) == Rgb565::RED)
        });
        assert!(hit);
    }
}
