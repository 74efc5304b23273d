//! Lava Dash — side-scrolling platformer for the handheld.
//!
//! Run right, clear the lava, reach the flag.
//! - Left/Right on the keypad to run
//! - A to jump; press again mid-air for the double jump
//! - B to sprint while the energy bar lasts
//! - A restarts after a win or a wipeout

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
#[allow(clippy::wildcard_imports)]
use lava_dash::*;

use lava_dash::render::{Frame, H, PIXELS, W};
use lava_dash::world::{GameState, GameWorld};

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

/// Frame cadence; best effort, not a hard deadline.
const FRAME_MS: u64 = 16;

#[embassy_executor::task]
async fn game_task(
    display: &'static mut Display<'static>,
    backlight: &'static mut Backlight,
    controls: &'static mut Controls,
) {
    info!("game task started");
    backlight.on();

    let buf = mk_static!([Rgb565; PIXELS], [Rgb565::BLACK; PIXELS]);
    let mut frame = Frame { buf };

    let seed = esp_hal::rng::Rng::new().random();
    let mut world = GameWorld::new(seed);
    info!("level ready: {} obstacles", world.level.obstacles.len());

    let tick = Duration::from_millis(FRAME_MS);
    let area = Rectangle::new(Point::zero(), Size::new(W as u32, H as u32));

    loop {
        // One frame: sample, step, draw, present, sleep.
        let input = controls.sample();

        let before = world.state;
        world.step(&input);
        if world.state != before {
            info!("{} -> {}", before, world.state);
            if world.state == GameState::Playing {
                info!("new level: {} obstacles", world.level.obstacles.len());
            }
        }

        render::draw_frame(&mut frame, &world);
        display
            .fill_contiguous(&area, frame.buf.iter().copied())
            .unwrap();

        Timer::after(tick).await;
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = lava_dash::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);
    info!("heap: {}", defmt::Display2Format(&esp_alloc::HEAP.stats()));

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let display = mk_static!(Display<'static>, resources.display.into());
    let backlight = mk_static!(Backlight, resources.backlight.into());
    let controls = mk_static!(Controls, resources.controls.into());

    spawner.must_spawn(game_task(display, backlight, controls));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
