use std::thread;
use std::time::Duration;

use dht11::Dht11;
use rppal::gpio::IoPin;
use rppal::hal::Delay;

use crate::constants::defaults;
use crate::data_mgmt::models::Reading;

/// Seam between the sampling loop and the physical sensor.
pub trait SensorReader {
    fn read(&mut self) -> Reading;
}

/// DHT11 driver over a Raspberry Pi GPIO data line, with bounded
/// internal retries. The sensor is slow and frequently NACKs or
/// garbles a transfer, so individual failures are expected.
pub struct Dht11Sensor {
    driver: Dht11<IoPin>,
    delay: Delay,
    attempts: u32,
    retry_delay: Duration,
}

impl Dht11Sensor {
    pub fn new(pin: IoPin) -> Self {
        Dht11Sensor {
            driver: Dht11::new(pin),
            delay: Delay::new(),
            attempts: defaults::SENSOR_READ_ATTEMPTS,
            retry_delay: defaults::SENSOR_RETRY_DELAY,
        }
    }
}

impl SensorReader for Dht11Sensor {
    /// Read the sensor, retrying on failure. Returns a reading with both
    /// fields absent once all attempts are exhausted; driver errors never
    /// propagate past this call.
    fn read(&mut self) -> Reading {
        for attempt in 1..=self.attempts {
            match self.driver.perform_measurement(&mut self.delay) {
                // Measurements arrive in tenths of a unit
                Ok(m) => {
                    return Reading::new(f64::from(m.humidity) / 10.0, f64::from(m.temperature) / 10.0)
                }
                Err(err) => {
                    log::debug!(
                        "Sensor read attempt {}/{} failed: {:?}",
                        attempt,
                        self.attempts,
                        err
                    );
                    thread::sleep(self.retry_delay);
                }
            }
        }
        log::warn!("Sensor unavailable after {} attempts", self.attempts);
        Reading::empty()
    }
}
