use rppal::gpio::{Gpio, InputPin, IoPin, Mode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GpioError {
    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),
}

/// Seam between the waiting window and the physical chart button.
pub trait TriggerInput {
    fn is_asserted(&self) -> bool;
}

/// Push button wired to a GPIO input, active high.
pub struct Button {
    pin: InputPin,
}

impl Button {
    pub fn claim(gpio: &Gpio, pin: u8) -> Result<Self, GpioError> {
        Ok(Button {
            pin: gpio.get(pin)?.into_input(),
        })
    }
}

impl TriggerInput for Button {
    fn is_asserted(&self) -> bool {
        self.pin.is_high()
    }
}

/// Claim the sensor data line. The DHT11 driver switches the pin between
/// output (start signal) and input (response) itself, hence an `IoPin`.
pub fn claim_sensor_pin(gpio: &Gpio, pin: u8) -> Result<IoPin, GpioError> {
    Ok(gpio.get(pin)?.into_io(Mode::Output))
}
