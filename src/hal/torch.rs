//! GPIO torch driver.
//!
//! A high-power white LED (or a MOSFET-switched torch module) on a
//! single output pin, exposed to the core as [`TorchControl`].

use crate::device::{TorchControl, TorchError};

/// Torch output configuration.
pub struct TorchConfig {
    /// GPIO number driving the LED / torch module.
    pub pin: i32,
    /// True when the output is lit on a high level.
    pub active_high: bool,
}

impl Default for TorchConfig {
    fn default() -> Self {
        Self {
            pin: 4,
            active_high: true,
        }
    }
}

#[cfg(not(test))]
use esp_idf_svc::hal::gpio::{AnyOutputPin, Output, PinDriver};

/// Torch on a GPIO pin.
///
/// Owns the pin driver for the lifetime of the firmware; construction
/// failure is the `ConfigurationFailed` case of the error taxonomy.
#[cfg(not(test))]
pub struct GpioTorch {
    pin: PinDriver<'static, AnyOutputPin, Output>,
    active_high: bool,
}

#[cfg(not(test))]
impl GpioTorch {
    /// Claim the configured pin and force the torch dark.
    pub fn new(config: TorchConfig) -> Result<Self, TorchError> {
        // SAFETY: the pin number comes from board configuration and is
        // claimed exactly once, here.
        let pin = unsafe { AnyOutputPin::new(config.pin) };
        let driver = PinDriver::output(pin).map_err(|_| TorchError::ConfigurationFailed)?;

        let mut torch = Self {
            pin: driver,
            active_high: config.active_high,
        };
        torch.deactivate()?;
        Ok(torch)
    }
}

#[cfg(not(test))]
impl TorchControl for GpioTorch {
    fn activate(&mut self) -> Result<(), TorchError> {
        let result = if self.active_high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| TorchError::Unavailable)
    }

    fn deactivate(&mut self) -> Result<(), TorchError> {
        let result = if self.active_high {
            self.pin.set_low()
        } else {
            self.pin.set_high()
        };
        result.map_err(|_| TorchError::Unavailable)
    }
}
