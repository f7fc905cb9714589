mod mac_address;
mod time;

pub use mac_address::mac_address;
pub use time::now_epoch;
