use std::path::Path;

use color_eyre::eyre;
use hydro_toolbox_core::{
    common::arr_meta::Range as ValueRange, GridSnapshot, TemperatureEvolution,
};
use plotters::{prelude::*, series::DashedLineSeries};

/// Control points of an inferno-like color map.
const INFERNO: [(u8, u8, u8); 5] = [
    (0, 0, 4),
    (87, 16, 110),
    (188, 55, 84),
    (249, 142, 9),
    (252, 255, 164),
];

/// Color for `t` in `0..=1`, clamped.
fn inferno(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let pos = t * (INFERNO.len() - 1) as f64;
    let i = (pos.floor() as usize).min(INFERNO.len() - 2);
    let f = pos - i as f64;
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
    let (a, b) = (INFERNO[i], INFERNO[i + 1]);
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Heatmap of the normalized grid. Cell `[i][j]` is drawn in row `i` and
/// column `j`, so the first file index runs vertically.
pub fn energy_density_map(grid: &GridSnapshot, path: &Path, title: &str) -> eyre::Result<()> {
    let root = BitMapBackend::new(path, (900, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let (rows, cols) = (grid.x_axis(), grid.y_axis());
    let (row_step, col_step) = (grid.dx(), grid.dy());
    let half_h = grid.nx() as f64 * row_step / 2.0 + row_step / 2.0;
    let half_w = grid.ny() as f64 * col_step / 2.0 + col_step / 2.0;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-half_w..half_w, -half_h..half_h)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x (fm)")
        .y_desc("y (fm)")
        .draw()?;

    let range = grid
        .stats()
        .map(|stats| stats.range())
        .unwrap_or(ValueRange::new(0.0, 1.0));

    chart.draw_series(grid.values().indexed_iter().map(|((i, j), v)| {
        let (x0, y0) = (cols[j] - col_step / 2.0, rows[i] - row_step / 2.0);
        Rectangle::new(
            [(x0, y0), (x0 + col_step, y0 + row_step)],
            inferno(range.map(*v)).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

pub fn temperature_curves(evolution: &TemperatureEvolution, path: &Path) -> eyre::Result<()> {
    let root = BitMapBackend::new(path, (1600, 900)).into_drawing_area();
    root.fill(&WHITE)?;

    let tau_min = evolution.tau.iter().next().copied().unwrap_or(0.0);
    let tau_max = evolution
        .tau
        .iter()
        .last()
        .copied()
        .filter(|t| *t > tau_min)
        .unwrap_or(tau_min + 1.0);
    let t_max = evolution
        .maximum
        .iter()
        .chain(evolution.average.iter())
        .fold(0f32, |acc, v| acc.max(*v)) as f64;
    let t_max = if t_max > 0.0 { t_max * 1.05 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(tau_min..tau_max, 0f64..t_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("tau (fm/c)")
        .y_desc("Temperature (GeV)")
        .label_style(("sans-serif", 24))
        .draw()?;

    let points = |values: &ndarray::Array1<f32>| {
        evolution
            .tau
            .iter()
            .zip(values.iter())
            .map(|(t, v)| (*t, *v as f64))
            .collect::<Vec<_>>()
    };

    chart
        .draw_series(LineSeries::new(
            points(&evolution.average),
            BLUE.stroke_width(3),
        ))?
        .label("average")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], BLUE.stroke_width(3)));

    chart
        .draw_series(DashedLineSeries::new(
            points(&evolution.maximum),
            12,
            8,
            RED.stroke_width(3),
        ))?
        .label("maximum")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], RED.stroke_width(3)));

    chart
        .configure_series_labels()
        .label_font(("sans-serif", 24))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
