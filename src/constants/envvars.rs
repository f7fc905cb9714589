pub const LOG_LEVEL: &str = "LOG_LEVEL";

pub const API_BASE_URL: &str = "TEMPMON_API_BASE_URL";
pub const WAIT_SECONDS: &str = "TEMPMON_WAIT_SECONDS";
pub const SENSOR_PIN: &str = "TEMPMON_SENSOR_PIN";
pub const BUTTON_PIN: &str = "TEMPMON_BUTTON_PIN";
pub const NET_INTERFACE: &str = "TEMPMON_NET_INTERFACE";
pub const PLOT_OUT: &str = "TEMPMON_PLOT_OUT";
