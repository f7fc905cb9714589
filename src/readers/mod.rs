mod dht;

pub use dht::{Dht11Sensor, SensorReader};
