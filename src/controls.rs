//! Hybrid input: PCF8574 I2C keypad plus three direct GPIO buttons.
//!
//! The keypad carries the D-pad and A/B on one active-low expander byte;
//! L, R and Menu are wired straight to pins. One [`Controls::sample`] per
//! frame reads both sources and runs them through the edge-detecting
//! [`InputSampler`].

use esp_hal::{
    Blocking,
    gpio::{
        Input,
        InputConfig,
        Pull,
    },
    i2c::master::{
        Config,
        I2c,
    },
};

use crate::ControlResources;
use crate::input::{
    ButtonMap,
    InputSampler,
    InputState,
};

/// Bus address of the keypad's PCF8574 expander.
const KEYPAD_ADDR: u8 = 0x20;

/// All game inputs, polled once per frame.
pub struct Controls {
    i2c: I2c<'static, Blocking>,
    l: Input<'static>,
    r: Input<'static>,
    menu: Input<'static>,
    sampler: InputSampler,
}

impl From<ControlResources<'static>> for Controls {
    fn from(res: ControlResources<'static>) -> Self {
        // The PCF8574 tops out at standard mode; the default 100 kHz fits.
        let i2c = I2c::new(res.i2c, Config::default())
            .unwrap()
            .with_sda(res.sda)
            .with_scl(res.scl);

        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            i2c,
            l: Input::new(res.l, pull_up),
            r: Input::new(res.r, pull_up),
            menu: Input::new(res.menu, pull_up),
            sampler: InputSampler::new(ButtonMap::pcf8574_default()),
        }
    }
}

impl Controls {
    /// Read both sources and decode one frame of input.
    ///
    /// A failed expander read counts as "nothing held" so a flaky bus cannot
    /// inject phantom presses.
    pub fn sample(&mut self) -> InputState {
        let mut byte = [0u8];
        let bitmask = match self.i2c.read(KEYPAD_ADDR, &mut byte) {
            Ok(()) => byte[0],
            Err(_) => 0xFF,
        };
        self.sampler
            .sample(bitmask, self.l.is_low(), self.r.is_low(), self.menu.is_low())
    }
}
