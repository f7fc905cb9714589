use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

use crate::constants::defaults;
use crate::data_mgmt::models::HistoryPoint;
use crate::helpers;
use crate::interfaces::http_api::ApiClient;

const CHART_SIZE: (u32, u32) = (800, 480);
const MARKER_SIZE: i32 = 4;

/// Fetch the last hour of stored samples from the collector and render
/// them as a dual-axis SVG chart: temperature (red crosses) on the left
/// axis, humidity (blue circles) on the right, shared timestamp X axis.
///
/// Fetch and parse failures are returned to the caller rather than
/// aborting the process; the sampling loop logs and carries on.
pub fn render_last_hour(api: &ApiClient, out_path: &Path) -> Result<()> {
    let from = helpers::now_epoch() - defaults::HISTORY_WINDOW.as_secs() as i64;
    log::info!("Charting samples stored since {from}");

    let points = api.search_since(from).context("history fetch failed")?;
    if points.is_empty() {
        log::info!("No samples stored in the last hour; nothing to chart");
        return Ok(());
    }

    render_chart(&points, out_path)
        .with_context(|| format!("could not render chart to {}", out_path.display()))?;
    log::info!("Chart written to {}", out_path.display());
    Ok(())
}

fn render_chart(points: &[HistoryPoint], out_path: &Path) -> Result<()> {
    let x_range = padded_range(points.iter().map(|p| p.timestamp as f64));
    let temp_range = padded_range(points.iter().map(|p| p.temperature));
    let hum_range = padded_range(points.iter().map(|p| p.humidity));

    let root = SVGBackend::new(out_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .right_y_label_area_size(50)
        .build_cartesian_2d(x_range.clone(), temp_range)?
        .set_secondary_coord(x_range, hum_range);

    chart
        .configure_mesh()
        .x_desc("timestamp")
        .y_desc("temperature [C]")
        .axis_desc_style(("sans-serif", 16).into_font().color(&RED))
        .draw()?;
    chart
        .configure_secondary_axes()
        .y_desc("humidity [%]")
        .axis_desc_style(("sans-serif", 16).into_font().color(&BLUE))
        .draw()?;

    chart.draw_series(points.iter().map(|p| {
        Cross::new(
            (p.timestamp as f64, p.temperature),
            MARKER_SIZE,
            RED.filled(),
        )
    }))?;
    chart.draw_secondary_series(points.iter().map(|p| {
        Circle::new((p.timestamp as f64, p.humidity), MARKER_SIZE, BLUE.filled())
    }))?;

    root.present()?;
    Ok(())
}

/// Axis range with a margin, widened so that a single sample or a flat
/// series still yields a non-degenerate axis.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let pad = ((max - min) * 0.05).max(1.0);
    (min - pad)..(max + pad)
}
