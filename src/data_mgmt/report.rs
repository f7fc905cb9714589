use crate::data_mgmt::models::{Reading, StorePayload};
use crate::interfaces::http_api::ApiClient;

/// Forward one reading to the collector, best effort. Incomplete readings
/// are skipped without a request; transport failures are logged and the
/// reading is dropped (at-most-once delivery, no retry, no buffering).
pub fn report(api: &ApiClient, reading: &Reading, mac_address: &str) {
    let Some(payload) = StorePayload::from_reading(reading, mac_address) else {
        log::debug!("Incomplete reading; nothing to report");
        return;
    };

    log::info!(
        "Reporting temperature {:.1} C, humidity {:.1} % for {}",
        payload.temperature,
        payload.humidity,
        payload.mac_address
    );
    if let Err(err) = api.store(&payload) {
        log::error!("Could not store reading: {err}");
    }
}
