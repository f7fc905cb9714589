use std::fs;
use std::path::{Path, PathBuf};

/// Returned whenever the interface address cannot be read. The device
/// is still identifiable server-side as "unknown", and readings are
/// not dropped over it.
pub const MAC_UNKNOWN: &str = "00:00:00:00:00:00";

// Six colon-separated hex octets.
const MAC_LEN: usize = 17;

const SYSFS_NET: &str = "/sys/class/net";

/// Resolve the MAC address of the given network interface, e.g.
/// `"aa:bb:cc:dd:ee:ff"`. Falls back to [`MAC_UNKNOWN`] on any failure.
pub fn mac_address(interface: &str) -> String {
    read_mac(
        [SYSFS_NET, interface, "address"]
            .iter()
            .collect::<PathBuf>(),
    )
}

fn read_mac(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(contents) if contents.len() >= MAC_LEN && contents.is_ascii() => {
            contents[..MAC_LEN].to_string()
        }
        Ok(contents) => {
            log::warn!(
                "Unexpected contents in {}: {:?}; using sentinel MAC",
                path.display(),
                contents
            );
            MAC_UNKNOWN.to_string()
        }
        Err(err) => {
            log::warn!(
                "Could not read MAC address from {}: {}; using sentinel MAC",
                path.display(),
                err
            );
            MAC_UNKNOWN.to_string()
        }
    }
}
