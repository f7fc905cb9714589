use anyhow::Result;

use crate::config::Config;
use crate::interfaces::http_api::ApiClient;

/// Render the last hour of stored samples once and exit.
pub fn plot() -> Result<()> {
    let config = Config::from_env()?;
    let api = ApiClient::new(&config.api_base_url)?;
    crate::plot::render_last_hour(&api, &config.plot_out)
}
