//! # lava-dash
//!
//! Side-scrolling lava platformer for an ESP32-S3 handheld.
//!
//! The crate splits into a hardware-free simulation core and a board layer:
//! - **Core** ([`input`], [`level`], [`world`], [`render`], [`rng`]): input
//!   decoding and edge detection, procedural level generation, player
//!   physics and the session state machine, and the off-screen render pass.
//!   Builds anywhere; `cargo test --no-default-features` runs its tests on
//!   the host.
//! - **Board** (`hal` feature, on by default): 240×320 ST7789 LCD over SPI
//!   with DMA, PCF8574 I2C keypad plus three direct buttons, and the
//!   display backlight.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = lava_dash::init();
//! let resources = lava_dash::split_resources!(peripherals);
//!
//! let display: lava_dash::Display = resources.display.into();
//! let controls: lava_dash::Controls = resources.controls.into();
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod input;
pub mod level;
pub mod render;
pub mod rng;
pub mod world;

#[cfg(feature = "hal")]
mod backlight;
#[cfg(feature = "hal")]
mod controls;
#[cfg(feature = "hal")]
mod display;

#[cfg(feature = "hal")]
pub use backlight::Backlight;
#[cfg(feature = "hal")]
pub use controls::Controls;
#[cfg(feature = "hal")]
pub use display::Display;
#[cfg(feature = "hal")]
use esp_hal::{
    assign_resources,
    clock::CpuClock,
};

/// StaticCell helper — allocates a value into a `static` exactly once.
#[cfg(feature = "hal")]
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

#[cfg(feature = "hal")]
assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            dc: GPIO15,
            rst: GPIO7,
            sck: GPIO4,
            cs: GPIO6,
            miso: GPIO16,
            mosi: GPIO5,
            spi: SPI2,
            dma: DMA_CH0,
        },
        backlight: BacklightResources<'d> {
            led: GPIO19,
        },
        controls: ControlResources<'d> {
            sda: GPIO8,
            scl: GPIO9,
            i2c: I2C0,
            l: GPIO21,
            r: GPIO2,
            menu: GPIO14,
        },
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// Initialise the board and return the raw peripheral set.
///
/// Call this once at the top of your `main`, then use [`split_resources!`]
/// to break the peripherals into typed resource groups.
#[cfg(feature = "hal")]
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

#[cfg(feature = "hal")]
impl From<esp_hal::peripherals::Peripherals> for Resources<'_> {
    fn from(peripherals: esp_hal::peripherals::Peripherals) -> Self {
        split_resources!(peripherals)
    }
}
