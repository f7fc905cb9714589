use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use rppal::gpio::Gpio;

use crate::config::Config;
use crate::constants::defaults;
use crate::data_mgmt::report::report;
use crate::helpers;
use crate::interfaces::gpio::{claim_sensor_pin, Button, TriggerInput};
use crate::interfaces::http_api::ApiClient;
use crate::readers::{Dht11Sensor, SensorReader};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

extern "C" fn request_shutdown(_signal: i32) {
    SHUTDOWN.store(true, Ordering::SeqCst);
}

fn install_signal_handlers() -> Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(request_shutdown),
        SaFlags::empty(),
        SigSet::empty(),
    );
    unsafe {
        signal::sigaction(Signal::SIGINT, &action).context("installing SIGINT handler")?;
        signal::sigaction(Signal::SIGTERM, &action).context("installing SIGTERM handler")?;
    }
    Ok(())
}

/// Claimed pins are released by Drop when `run` unwinds or returns; this
/// makes the release visible in the logs on every exit path.
struct PinReleaseNotice;

impl Drop for PinReleaseNotice {
    fn drop(&mut self) {
        log::info!("Releasing GPIO pins");
    }
}

/// Sample the sensor, report each reading, and poll the chart button
/// between samples, until shutdown is requested.
pub fn run() -> Result<()> {
    let config = Config::from_env()?;
    install_signal_handlers()?;

    let mac_address = helpers::mac_address(&config.net_interface);
    log::info!("Device identity: {mac_address}");

    let api = ApiClient::new(&config.api_base_url)?;

    let gpio = Gpio::new().context("opening GPIO")?;
    let _release_notice = PinReleaseNotice;
    let button = Button::claim(&gpio, config.button_pin)
        .with_context(|| format!("claiming button pin {}", config.button_pin))?;
    let mut sensor = Dht11Sensor::new(
        claim_sensor_pin(&gpio, config.sensor_pin)
            .with_context(|| format!("claiming sensor pin {}", config.sensor_pin))?,
    );

    log::info!("Starting to read temperature and humidity");
    sample_loop(
        &mut sensor,
        &button,
        &api,
        &mac_address,
        config.wait_window,
        defaults::BUTTON_POLL_INTERVAL,
        &SHUTDOWN,
        || {
            if let Err(err) = crate::plot::render_last_hour(&api, &config.plot_out) {
                log::error!("Chart generation failed: {err:#}");
            }
        },
    );

    log::info!("Shutdown requested; stopping");
    Ok(())
}

/// The sampling cycle: read, report, then poll the trigger input until the
/// wait window elapses. Time spent in `on_trigger` eats into the window
/// rather than extending it, so cycles are not rigidly periodic.
#[allow(clippy::too_many_arguments)]
fn sample_loop<S, T, F>(
    sensor: &mut S,
    trigger: &T,
    api: &ApiClient,
    mac_address: &str,
    wait_window: Duration,
    poll_interval: Duration,
    stop: &AtomicBool,
    mut on_trigger: F,
) where
    S: SensorReader,
    T: TriggerInput,
    F: FnMut(),
{
    while !stop.load(Ordering::SeqCst) {
        let reading = sensor.read();
        report(api, &reading, mac_address);

        let deadline = Instant::now() + wait_window;
        while Instant::now() < deadline {
            if stop.load(Ordering::SeqCst) {
                return;
            }
            if trigger.is_asserted() {
                on_trigger();
            }
            thread::sleep(poll_interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    use mockito::Server;

    use crate::data_mgmt::models::Reading;

    const SAMPLE_MAC: &str = "11:22:33:44:55:66";
    const WINDOW: Duration = Duration::from_millis(30);
    const POLL: Duration = Duration::from_millis(5);

    /// Returns scripted readings and requests a stop after a fixed
    /// number of sampling cycles.
    struct ScriptedSensor {
        reading: Reading,
        reads: Arc<AtomicUsize>,
        stop_after: usize,
        stop: Arc<AtomicBool>,
    }

    impl SensorReader for ScriptedSensor {
        fn read(&mut self) -> Reading {
            let n = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
            if n >= self.stop_after {
                self.stop.store(true, Ordering::SeqCst);
            }
            self.reading
        }
    }

    struct NeverAsserted;

    impl TriggerInput for NeverAsserted {
        fn is_asserted(&self) -> bool {
            false
        }
    }

    /// Asserted on exactly one poll, then released.
    struct OnePulse {
        armed: Cell<bool>,
    }

    impl TriggerInput for OnePulse {
        fn is_asserted(&self) -> bool {
            self.armed.replace(false)
        }
    }

    fn scripted(
        reading: Reading,
        stop_after: usize,
        stop: &Arc<AtomicBool>,
    ) -> (ScriptedSensor, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        (
            ScriptedSensor {
                reading,
                reads: reads.clone(),
                stop_after,
                stop: stop.clone(),
            },
            reads,
        )
    }

    #[test]
    fn one_sample_per_window_without_trigger() {
        let mut server = Server::new();
        let store = server.mock("POST", "/store").with_status(200).expect(3).create();
        let api = ApiClient::new(&server.url()).unwrap();

        let stop = Arc::new(AtomicBool::new(false));
        let (mut sensor, reads) = scripted(Reading::new(40.0, 21.5), 3, &stop);
        let charts = Cell::new(0);

        sample_loop(
            &mut sensor,
            &NeverAsserted,
            &api,
            SAMPLE_MAC,
            WINDOW,
            POLL,
            &stop,
            || charts.set(charts.get() + 1),
        );

        assert_eq!(reads.load(Ordering::SeqCst), 3);
        assert_eq!(charts.get(), 0);
        store.assert();
    }

    #[test]
    fn incomplete_readings_issue_no_requests() {
        let mut server = Server::new();
        let store = server.mock("POST", "/store").expect(0).create();
        let api = ApiClient::new(&server.url()).unwrap();

        let stop = Arc::new(AtomicBool::new(false));
        let (mut sensor, reads) = scripted(Reading::empty(), 2, &stop);

        sample_loop(
            &mut sensor,
            &NeverAsserted,
            &api,
            SAMPLE_MAC,
            WINDOW,
            POLL,
            &stop,
            || {},
        );

        assert_eq!(reads.load(Ordering::SeqCst), 2);
        store.assert();
    }

    #[test]
    fn single_assertion_triggers_one_chart_then_resumes() {
        let mut server = Server::new();
        let _store = server.mock("POST", "/store").with_status(200).create();
        let api = ApiClient::new(&server.url()).unwrap();

        let stop = Arc::new(AtomicBool::new(false));
        let (mut sensor, reads) = scripted(Reading::new(40.0, 21.5), 2, &stop);
        let trigger = OnePulse {
            armed: Cell::new(true),
        };
        let charts = Cell::new(0);

        sample_loop(
            &mut sensor,
            &trigger,
            &api,
            SAMPLE_MAC,
            WINDOW,
            POLL,
            &stop,
            || charts.set(charts.get() + 1),
        );

        // Charted exactly once, then sampling resumed for another cycle
        assert_eq!(charts.get(), 1);
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn pre_requested_shutdown_stops_before_sampling() {
        let mut server = Server::new();
        let store = server.mock("POST", "/store").expect(0).create();
        let api = ApiClient::new(&server.url()).unwrap();

        let stop = Arc::new(AtomicBool::new(true));
        let (mut sensor, reads) = scripted(Reading::new(40.0, 21.5), 100, &stop);

        sample_loop(
            &mut sensor,
            &NeverAsserted,
            &api,
            SAMPLE_MAC,
            WINDOW,
            POLL,
            &stop,
            || {},
        );

        assert_eq!(reads.load(Ordering::SeqCst), 0);
        store.assert();
    }
}
