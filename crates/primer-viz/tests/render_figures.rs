//! Rendering full multi-panel figures

use primer_inference::linear_fit;
use primer_viz::{render_svg, BoxStats, Figure, FigureSink, MemoryFigureSink, Panel, Series};

fn groups() -> Vec<Series> {
    vec![
        Series::new("A", vec![72.0, 75.5, 78.1, 69.9, 74.2, 80.3, 71.0]),
        Series::new("B", vec![81.2, 79.4, 84.0, 77.7, 82.5, 85.1, 120.0]),
        Series::new("C", vec![70.0, 90.0, 65.5, 88.8, 77.3, 79.9, 83.4]),
    ]
}

#[test]
fn test_six_panel_figure() {
    let x: Vec<f64> = (0..20).map(|i| i as f64 / 2.0).collect();
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0 + (v * 7.0).sin()).collect();
    let fit = linear_fit(&x, &y).unwrap();

    let mut figure = Figure::new("overview", 2, 3).with_size(900, 600);
    let panels = vec![
        Panel::line("Sine", x.iter().map(|&v| (v, v.sin())).collect()).with_labels("x", "sin(x)"),
        Panel::scatter("Trend", x.iter().copied().zip(y.iter().copied()).collect(), Some(fit)),
        Panel::histogram("Overlay", groups(), 8, 0.5),
        Panel::box_plot("Boxes", groups()),
        Panel::violin("Violins", groups()),
        Panel::strip("Strips", groups(), 0.15, 7),
    ];
    for panel in panels {
        figure.push(panel).unwrap();
    }

    let svg = render_svg(&figure).unwrap();
    for title in ["Sine", "Trend", "Overlay", "Boxes", "Violins", "Strips"] {
        assert!(svg.contains(title), "missing panel {title}");
    }
    assert!(svg.contains(&fit.to_string()));
}

#[test]
fn test_partial_grid_and_sink() {
    let figure = Figure::new("sparse", 2, 2)
        .with_size(600, 600)
        .with_panel(Panel::bar(
            "Bars",
            vec![("A".into(), 4.0), ("B".into(), 7.0), ("C".into(), 2.0)],
        ))
        .unwrap();

    let sink = MemoryFigureSink::new();
    assert!(sink.is_enabled());
    sink.emit(&figure).unwrap();
    assert_eq!(sink.names(), vec!["sparse"]);
}

#[test]
fn test_strip_jitter_is_reproducible() {
    let figure = Figure::new("strip", 1, 1)
        .with_size(400, 300)
        .with_panel(Panel::strip("Strip", groups(), 0.2, 99))
        .unwrap();
    assert_eq!(render_svg(&figure).unwrap(), render_svg(&figure).unwrap());
}

#[test]
fn test_box_stats_flag_the_outlier() {
    let b = &groups()[1];
    let stats = BoxStats::from_values(&b.values).unwrap();
    assert_eq!(stats.outliers, vec![120.0]);
    assert_eq!(stats.upper_whisker, 85.1);
}
