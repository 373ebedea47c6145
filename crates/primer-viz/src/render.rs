//! SVG rendering with plotters

use crate::boxplot::BoxStats;
use crate::figure::{Figure, Panel, PanelKind, Series};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use primer_core::{Error, Result};
use primer_describe::{GaussianKde, Histogram};
use primer_inference::LinearFit;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, instrument};

type Area<'b> = DrawingArea<SVGBackend<'b>, Shift>;
type Chart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const FONT: &str = "sans-serif";
/// Half the width of a box, violin or bar in category units
const HALF_WIDTH: f64 = 0.35;
const VIOLIN_POINTS: usize = 100;
/// Violin tails extend this many bandwidths past the data
const VIOLIN_CUT: f64 = 2.0;

/// Render a figure to an SVG document
#[instrument(skip(figure), fields(name = %figure.name, panels = figure.panels.len()))]
pub fn render_svg(figure: &Figure) -> Result<String> {
    figure.validate()?;

    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (figure.width, figure.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(Error::render)?;

        let cells = root.split_evenly((figure.rows, figure.cols));
        for (cell, panel) in cells.iter().zip(&figure.panels) {
            draw_panel(cell, panel)?;
        }
        root.present().map_err(Error::render)?;
    }

    debug!(bytes = buffer.len(), "figure rendered");
    Ok(buffer)
}

/// Render a figure and write it to `path`
pub fn render_to_file(figure: &Figure, path: impl AsRef<Path>) -> Result<()> {
    let svg = render_svg(figure)?;
    std::fs::write(path.as_ref(), svg)?;
    Ok(())
}

fn draw_panel(area: &Area<'_>, panel: &Panel) -> Result<()> {
    match &panel.kind {
        PanelKind::Line { points } => draw_line(area, panel, points),
        PanelKind::Scatter { points, trend } => draw_scatter(area, panel, points, trend.as_ref()),
        PanelKind::Histogram {
            series,
            bins,
            alpha,
        } => draw_histogram(area, panel, series, *bins, *alpha),
        PanelKind::Bar { categories } => draw_bar(area, panel, categories),
        PanelKind::BoxPlot { groups } => draw_box_plot(area, panel, groups),
        PanelKind::Pie { slices } => draw_pie(area, panel, slices),
        PanelKind::Violin { groups } => draw_violin(area, panel, groups),
        PanelKind::Strip {
            groups,
            jitter,
            seed,
        } => draw_strip(area, panel, groups, *jitter, *seed),
    }
}

/// Cartesian chart with caption, axis descriptions and mesh
///
/// Non-empty `categories` label the integer x positions `0..categories.len()`.
fn cartesian<'a, 'b>(
    area: &'a Area<'b>,
    panel: &Panel,
    x_range: Range<f64>,
    y_range: Range<f64>,
    categories: &[String],
) -> Result<Chart<'a, 'b>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT, 18).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range, y_range)
        .map_err(Error::render)?;

    let format_x = |x: &f64| category_label(categories, *x);
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(panel.x_label.as_str())
            .y_desc(panel.y_label.as_str());
        if !categories.is_empty() {
            mesh.disable_x_mesh()
                .x_labels(categories.len() + 1)
                .x_label_formatter(&format_x);
        }
        mesh.draw().map_err(Error::render)?;
    }
    Ok(chart)
}

fn category_label(categories: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    categories.get(index as usize).cloned().unwrap_or_default()
}

fn labels(groups: &[Series]) -> Vec<String> {
    groups.iter().map(|g| g.label.clone()).collect()
}

fn category_range(count: usize) -> Range<f64> {
    -0.5..count as f64 - 0.5
}

fn series_color(index: usize) -> RGBAColor {
    Palette99::pick(index).to_rgba()
}

fn bounds(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Give a degenerate interval unit width
fn widen(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

/// Interval with 5% headroom on both sides
fn padded((lo, hi): (f64, f64)) -> Range<f64> {
    let (lo, hi) = widen(lo, hi);
    let pad = 0.05 * (hi - lo);
    (lo - pad)..(hi + pad)
}

fn draw_legend<'a, 'b: 'a>(chart: &mut Chart<'a, 'b>) -> Result<()> {
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(Error::render)
}

fn draw_line(area: &Area<'_>, panel: &Panel, points: &[(f64, f64)]) -> Result<()> {
    let x_range = padded(bounds(points.iter().map(|p| p.0)));
    let y_range = padded(bounds(points.iter().map(|p| p.1)));
    let mut chart = cartesian(area, panel, x_range, y_range, &[])?;
    chart
        .draw_series(LineSeries::new(points.iter().copied(), BLUE.stroke_width(2)))
        .map_err(Error::render)?;
    Ok(())
}

fn draw_scatter(
    area: &Area<'_>,
    panel: &Panel,
    points: &[(f64, f64)],
    trend: Option<&LinearFit>,
) -> Result<()> {
    let (x_lo, x_hi) = bounds(points.iter().map(|p| p.0));
    let trend_ends = trend.map(|fit| [(x_lo, fit.predict(x_lo)), (x_hi, fit.predict(x_hi))]);
    let y_values = points
        .iter()
        .map(|p| p.1)
        .chain(trend_ends.iter().flatten().map(|p| p.1));

    let mut chart = cartesian(area, panel, padded((x_lo, x_hi)), padded(bounds(y_values)), &[])?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&p| Circle::new(p, 3, BLUE.mix(0.6).filled())),
        )
        .map_err(Error::render)?;

    if let (Some(fit), Some(ends)) = (trend, trend_ends) {
        chart
            .draw_series(LineSeries::new(ends, RED.stroke_width(2)))
            .map_err(Error::render)?
            .label(fit.to_string())
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));
        draw_legend(&mut chart)?;
    }
    Ok(())
}

fn draw_histogram(
    area: &Area<'_>,
    panel: &Panel,
    series: &[Series],
    bins: usize,
    alpha: f64,
) -> Result<()> {
    let (lo, hi) = bounds(series.iter().flat_map(|s| s.values.iter().copied()));
    let range = widen(lo, hi);
    let histograms = series
        .iter()
        .map(|s| Histogram::with_range(&s.values, bins, range))
        .collect::<Result<Vec<_>>>()?;
    let max_count = histograms
        .iter()
        .map(Histogram::max_count)
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    let mut chart = cartesian(area, panel, padded(range), 0.0..max_count * 1.1, &[])?;
    for (i, (s, histogram)) in series.iter().zip(&histograms).enumerate() {
        let fill = series_color(i).mix(alpha);
        chart
            .draw_series(histogram.bins().iter().map(|bin| {
                Rectangle::new([(bin.left, 0.0), (bin.right, bin.count as f64)], fill.filled())
            }))
            .map_err(Error::render)?
            .label(s.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], fill.filled()));
    }
    if series.len() > 1 {
        draw_legend(&mut chart)?;
    }
    Ok(())
}

fn draw_bar(area: &Area<'_>, panel: &Panel, categories: &[(String, f64)]) -> Result<()> {
    let names: Vec<String> = categories.iter().map(|(name, _)| name.clone()).collect();
    let (lo, hi) = bounds(categories.iter().map(|c| c.1).chain([0.0]));
    let mut chart = cartesian(
        area,
        panel,
        category_range(names.len()),
        padded((lo, hi)),
        &names,
    )?;
    chart
        .draw_series(categories.iter().enumerate().map(|(i, (_, value))| {
            let x = i as f64;
            Rectangle::new(
                [(x - HALF_WIDTH, 0.0), (x + HALF_WIDTH, *value)],
                series_color(i).filled(),
            )
        }))
        .map_err(Error::render)?;
    Ok(())
}

fn draw_box_plot(area: &Area<'_>, panel: &Panel, groups: &[Series]) -> Result<()> {
    let stats = groups
        .iter()
        .map(|g| BoxStats::from_values(&g.values))
        .collect::<Result<Vec<_>>>()?;
    let y_bounds = bounds(groups.iter().flat_map(|g| g.values.iter().copied()));
    let mut chart = cartesian(
        area,
        panel,
        category_range(groups.len()),
        padded(y_bounds),
        &labels(groups),
    )?;

    let boxes = || {
        stats.iter().enumerate().map(|(i, s)| {
            let x = i as f64;
            [(x - HALF_WIDTH, s.q1), (x + HALF_WIDTH, s.q3)]
        })
    };
    chart
        .draw_series(
            boxes()
                .enumerate()
                .map(|(i, corners)| Rectangle::new(corners, series_color(i).mix(0.5).filled())),
        )
        .map_err(Error::render)?;
    chart
        .draw_series(boxes().map(|corners| Rectangle::new(corners, BLACK.stroke_width(1))))
        .map_err(Error::render)?;

    let cap = HALF_WIDTH / 2.0;
    let strokes = stats.iter().enumerate().flat_map(|(i, s)| {
        let x = i as f64;
        [
            vec![(x - HALF_WIDTH, s.median), (x + HALF_WIDTH, s.median)],
            vec![(x, s.q3), (x, s.upper_whisker)],
            vec![(x, s.q1), (x, s.lower_whisker)],
            vec![(x - cap, s.upper_whisker), (x + cap, s.upper_whisker)],
            vec![(x - cap, s.lower_whisker), (x + cap, s.lower_whisker)],
        ]
    });
    chart
        .draw_series(strokes.map(|path| PathElement::new(path, BLACK.stroke_width(1))))
        .map_err(Error::render)?;

    let outliers = stats
        .iter()
        .enumerate()
        .flat_map(|(i, s)| s.outliers.iter().map(move |&v| (i as f64, v)));
    chart
        .draw_series(outliers.map(|p| Circle::new(p, 3, BLACK.stroke_width(1))))
        .map_err(Error::render)?;
    Ok(())
}

fn draw_pie(area: &Area<'_>, panel: &Panel, slices: &[(String, f64)]) -> Result<()> {
    // Match the axis spans to the pixel aspect so the pie stays round
    let (width, height) = area.dim_in_pixel();
    let aspect = f64::from(width) / f64::from(height.max(1));
    let (x_half, y_half) = if aspect >= 1.0 {
        (1.3 * aspect, 1.3)
    } else {
        (1.3, 1.3 / aspect)
    };
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT, 18).into_font())
        .margin(10)
        .build_cartesian_2d(-x_half..x_half, -y_half..y_half)
        .map_err(Error::render)?;

    let total: f64 = slices.iter().map(|(_, v)| v).sum();
    let centered = TextStyle::from((FONT, 13).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
    let at = |radius: f64, angle: f64| (radius * angle.cos(), radius * angle.sin());

    // Counter-clockwise from the positive x axis
    let mut start = 0.0;
    for (i, (label, value)) in slices.iter().enumerate() {
        let share = value / total;
        if share <= 0.0 {
            continue;
        }
        let sweep = share * TAU;
        let steps = ((share * 120.0).ceil() as usize).max(2);
        let mut outline = vec![(0.0, 0.0)];
        outline.extend((0..=steps).map(|k| at(1.0, start + sweep * k as f64 / steps as f64)));

        chart
            .draw_series(std::iter::once(Polygon::new(outline, series_color(i).filled())))
            .map_err(Error::render)?;

        let middle = start + sweep / 2.0;
        chart
            .draw_series([
                Text::new(format!("{:.1}%", share * 100.0), at(0.6, middle), centered.clone()),
                Text::new(label.clone(), at(1.15, middle), centered.clone()),
            ])
            .map_err(Error::render)?;
        start += sweep;
    }
    Ok(())
}

/// Density profile `(value, density)` of one violin
fn violin_profile(values: &[f64]) -> Result<Vec<(f64, f64)>> {
    let (lo, hi) = bounds(values.iter().copied());
    if hi <= lo {
        return Ok(vec![(lo, 1.0)]);
    }
    let kde = GaussianKde::new(values)?;
    Ok(kde.grid(VIOLIN_POINTS, VIOLIN_CUT))
}

fn draw_violin(area: &Area<'_>, panel: &Panel, groups: &[Series]) -> Result<()> {
    let profiles = groups
        .iter()
        .map(|g| violin_profile(&g.values))
        .collect::<Result<Vec<_>>>()?;
    let stats = groups
        .iter()
        .map(|g| BoxStats::from_values(&g.values))
        .collect::<Result<Vec<_>>>()?;
    let y_bounds = bounds(profiles.iter().flatten().map(|p| p.0));
    let mut chart = cartesian(
        area,
        panel,
        category_range(groups.len()),
        padded(y_bounds),
        &labels(groups),
    )?;

    for (i, profile) in profiles.iter().enumerate() {
        let x = i as f64;
        let peak = profile.iter().map(|p| p.1).fold(0.0, f64::max);
        let half = |density: f64| HALF_WIDTH * density / peak;

        let mut outline: Vec<(f64, f64)> =
            profile.iter().map(|&(y, d)| (x - half(d), y)).collect();
        outline.extend(profile.iter().rev().map(|&(y, d)| (x + half(d), y)));

        let color = series_color(i);
        chart
            .draw_series(std::iter::once(Polygon::new(outline.clone(), color.mix(0.5).filled())))
            .map_err(Error::render)?;
        if let Some(&first) = outline.first() {
            outline.push(first);
        }
        chart
            .draw_series(std::iter::once(PathElement::new(outline, color.stroke_width(1))))
            .map_err(Error::render)?;
    }

    // Interquartile bar and median marker inside each violin
    chart
        .draw_series(stats.iter().enumerate().map(|(i, s)| {
            PathElement::new(vec![(i as f64, s.q1), (i as f64, s.q3)], BLACK.stroke_width(4))
        }))
        .map_err(Error::render)?;
    chart
        .draw_series(
            stats
                .iter()
                .enumerate()
                .map(|(i, s)| Circle::new((i as f64, s.median), 3, WHITE.filled())),
        )
        .map_err(Error::render)?;
    Ok(())
}

fn draw_strip(
    area: &Area<'_>,
    panel: &Panel,
    groups: &[Series],
    jitter: f64,
    seed: u64,
) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points: Vec<(usize, (f64, f64))> = groups
        .iter()
        .enumerate()
        .flat_map(|(i, g)| g.values.iter().map(move |&v| (i, v)))
        .map(|(i, v)| (i, (i as f64 + rng.gen_range(-jitter..=jitter), v)))
        .collect();

    let y_bounds = bounds(points.iter().map(|(_, p)| p.1));
    let mut chart = cartesian(
        area,
        panel,
        category_range(groups.len()),
        padded(y_bounds),
        &labels(groups),
    )?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&(i, p)| Circle::new(p, 3, series_color(i).mix(0.7).filled())),
        )
        .map_err(Error::render)?;
    Ok(())
}
