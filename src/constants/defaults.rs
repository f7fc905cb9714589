use std::time::Duration;

pub const LOG_LEVEL: &str = "info";

pub const API_BASE_URL: &str = "http://localhost:5000";
pub const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const WAIT_SECONDS: u64 = 1;
pub const SENSOR_PIN: u8 = 26;
pub const BUTTON_PIN: u8 = 19;
pub const NET_INTERFACE: &str = "wlan0";
pub const PLOT_OUT: &str = "last_hour.svg";

/// DHT11 needs at least one second between acquisitions.
pub const SENSOR_READ_ATTEMPTS: u32 = 5;
pub const SENSOR_RETRY_DELAY: Duration = Duration::from_secs(2);

pub const BUTTON_POLL_INTERVAL: Duration = Duration::from_millis(10);
pub const HISTORY_WINDOW: Duration = Duration::from_secs(3600);
