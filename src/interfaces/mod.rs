pub mod gpio;
pub mod http_api;
