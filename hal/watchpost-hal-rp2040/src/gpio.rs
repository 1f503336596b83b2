//! GPIO adapters
//!
//! Newtypes implementing the `watchpost-hal` pin traits over embassy-rp
//! pins, built from the node configuration's [`PinConfig`].

use embassy_rp::gpio::{AnyPin, Flex, Input, Level, Output, Pull};
use embassy_rp::Peri;
use watchpost_core::config::PinConfig;
use watchpost_hal::{FlexPin, InputPin, OutputPin};

fn pull_for(cfg: &PinConfig) -> Pull {
    if cfg.pull_up {
        Pull::Up
    } else {
        Pull::None
    }
}

/// Digital input, logically inverted when configured active-low
pub struct RpInput {
    pin: Input<'static>,
    inverted: bool,
}

impl RpInput {
    pub fn new(pin: Peri<'static, AnyPin>, cfg: &PinConfig) -> Self {
        Self {
            pin: Input::new(pin, pull_for(cfg)),
            inverted: cfg.inverted,
        }
    }
}

impl InputPin for RpInput {
    fn is_high(&self) -> bool {
        self.pin.is_high() != self.inverted
    }
}

/// Push-pull output, starting at its inactive level
pub struct RpOutput {
    pin: Output<'static>,
    inverted: bool,
}

impl RpOutput {
    pub fn new(pin: Peri<'static, AnyPin>, cfg: &PinConfig) -> Self {
        let idle = if cfg.inverted { Level::High } else { Level::Low };
        Self {
            pin: Output::new(pin, idle),
            inverted: cfg.inverted,
        }
    }
}

impl OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.pin.set_level(Level::from(!self.inverted));
    }

    fn set_low(&mut self) {
        self.pin.set_level(Level::from(self.inverted));
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high() != self.inverted
    }
}

/// Bidirectional line for single-wire sensors
///
/// Starts as an input with the configured pull.
pub struct RpFlex {
    pin: Flex<'static>,
}

impl RpFlex {
    pub fn new(pin: Peri<'static, AnyPin>, cfg: &PinConfig) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_pull(pull_for(cfg));
        pin.set_as_input();
        Self { pin }
    }
}

impl InputPin for RpFlex {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl OutputPin for RpFlex {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

impl FlexPin for RpFlex {
    fn set_as_input(&mut self) {
        self.pin.set_as_input();
    }

    fn set_as_output(&mut self) {
        self.pin.set_as_output();
    }
}
