//! The four-section statistics walkthrough
//!
//! 1. Basic plots: line, scatter, histogram, bar, box and pie charts
//! 2. Statistics: two-group summary with t-test, chi-square, correlation and
//!    normality tests
//! 3. Statistical plots: the two groups compared, and the correlation with
//!    its trend line
//! 4. Group analysis: per-group summary table with violin, box and strip plots
//!
//! Each section draws from its own seeded random stream, so disabling figures
//! or replacing the synthetic groups never changes the other sections' data.

use crate::config::{GroupParams, WalkthroughConfig};
use primer_core::{numeric, Error, Result, Significance, TestOutcome};
use primer_describe::{GroupSummary, GroupedSamples};
use primer_inference::{
    chi_square_contingency, linear_fit, pearson, shapiro_wilk, summarize_with, ChiSquareResult,
    CorrelationResult, LinearFit, NormalityResult, SummaryResult,
};
use primer_viz::{Figure, FigureSink, NullFigureSink, Panel, Series, SvgFileSink};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

const RULE: &str = "----------------------------------------";
const BASIC_STREAM: u64 = 1;
const GROUP_STREAM: u64 = 2;
const CORRELATION_STREAM: u64 = 3;
const NORMALITY_STREAM: u64 = 4;

fn stream(seed: u64, id: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(id);
    rng
}

fn normal_sample<R: Rng>(rng: &mut R, mean: f64, sd: f64, size: usize) -> Result<Vec<f64>> {
    let normal = Normal::new(mean, sd).map_err(|e| Error::distribution("normal", e))?;
    Ok(normal.sample_iter(rng).take(size).collect())
}

fn group_sample<R: Rng>(rng: &mut R, params: &GroupParams) -> Result<Vec<f64>> {
    normal_sample(rng, params.mean, params.sd, params.size)
}

/// Everything the walkthrough computed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkthroughReport {
    pub seed: u64,
    pub alpha: f64,
    /// Labels of the two compared groups
    pub labels: (String, String),
    pub summary: SummaryResult,
    /// Whether the group means differ at `alpha`
    pub significant: bool,
    pub chi_square: ChiSquareResult,
    pub correlation: CorrelationResult,
    pub trend: LinearFit,
    pub normality: NormalityResult,
    /// Whether normality is retained at `alpha`
    pub appears_normal: bool,
    pub groups: GroupSummary,
    /// Files written by the figure sink
    pub figures: Vec<PathBuf>,
}

impl WalkthroughReport {
    pub fn significance(&self) -> Significance {
        if self.significant {
            Significance::Significant { alpha: self.alpha }
        } else {
            Significance::NotSignificant { alpha: self.alpha }
        }
    }
}

impl fmt::Display for WalkthroughReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;

        writeln!(f, "DESCRIPTIVE STATISTICS\n{RULE}")?;
        writeln!(f, "{}: Mean={:.2}, SD={:.2}", self.labels.0, s.mean_a, s.sd_a)?;
        writeln!(f, "{}: Mean={:.2}, SD={:.2}", self.labels.1, s.mean_b, s.sd_b)?;

        writeln!(f, "\nT-TEST (Independent samples)\n{RULE}")?;
        writeln!(f, "{} (df = {:.2})", s.test_name(), s.df)?;
        writeln!(f, "t-statistic: {:.4}", s.t_statistic)?;
        writeln!(f, "p-value: {:.4}", s.p_value)?;
        writeln!(f, "Result: {}", self.significance())?;

        writeln!(f, "\nCHI-SQUARE TEST\n{RULE}")?;
        writeln!(f, "{}", self.chi_square)?;

        writeln!(f, "\nCORRELATION\n{RULE}")?;
        writeln!(f, "{}", self.correlation)?;
        writeln!(f, "Trend line: {}", self.trend)?;

        writeln!(f, "\nNORMALITY TEST (Shapiro-Wilk)\n{RULE}")?;
        writeln!(f, "{}", self.normality)?;
        if self.appears_normal {
            writeln!(f, "Data appears normally distributed")?;
        } else {
            writeln!(f, "Data may not be normally distributed")?;
        }

        writeln!(f, "\nSUMMARY BY GROUP\n{RULE}")?;
        write!(f, "{}", self.groups)?;

        if !self.figures.is_empty() {
            writeln!(f, "\nFIGURES\n{RULE}")?;
            for path in &self.figures {
                writeln!(f, "Saved: {}", path.display())?;
            }
        }
        Ok(())
    }
}

/// Two compared groups, synthetic or loaded
struct Groups {
    labels: (String, String),
    first: Vec<f64>,
    second: Vec<f64>,
    all: GroupedSamples,
}

/// Walkthrough runner, generic over where figures go
#[derive(Debug)]
pub struct Walkthrough<S: FigureSink = NullFigureSink> {
    config: WalkthroughConfig,
    sink: S,
    scores: Option<GroupedSamples>,
}

impl<S: FigureSink> Walkthrough<S> {
    pub fn new(config: WalkthroughConfig, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sink,
            scores: None,
        })
    }

    /// Replace the synthetic groups with loaded scores
    ///
    /// The first two labels in sorted order are compared; every group appears
    /// in the group analysis.
    pub fn with_scores(mut self, scores: GroupedSamples) -> Self {
        self.scores = Some(scores);
        self
    }

    pub fn config(&self) -> &WalkthroughConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run all four sections
    #[instrument(skip(self), fields(seed = self.config.seed))]
    pub fn run(&self) -> Result<WalkthroughReport> {
        let config = &self.config;
        let mut figures = Vec::new();

        info!("section 1: basic plots");
        figures.extend(self.sink.emit(&self.basic_plots()?)?);

        info!("section 2: statistics");
        let groups = self.groups()?;
        let summary = summarize_with(&groups.first, &groups.second, config.variance)?;
        let significant = summary.is_significant(config.alpha)?;
        let chi_square = chi_square_contingency(&config.contingency, config.yates)?;

        let mut rng = stream(config.seed, CORRELATION_STREAM);
        let x: Vec<f64> = (0..config.correlation_size)
            .map(|_| rng.gen::<f64>() * 10.0)
            .collect();
        let noise = normal_sample(&mut rng, 0.0, 3.0, x.len())?;
        let y: Vec<f64> = x.iter().zip(&noise).map(|(xi, e)| 2.0 * xi + e).collect();
        let correlation = pearson(&x, &y)?;
        let trend = linear_fit(&x, &y)?;

        let normal_data = normal_sample(
            &mut stream(config.seed, NORMALITY_STREAM),
            0.0,
            1.0,
            config.normality_size,
        )?;
        let normality = shapiro_wilk(&normal_data)?;
        let appears_normal = normality.appears_normal(config.alpha)?;
        debug!(
            t = summary.t_statistic,
            r = correlation.r,
            w = normality.w,
            "statistics computed"
        );

        info!("section 3: statistical plots");
        let comparison = self.statistical_plots(&groups, &x, &y, &correlation, trend)?;
        figures.extend(self.sink.emit(&comparison)?);

        info!("section 4: group analysis");
        let group_summary = groups.all.describe_groups()?;
        figures.extend(self.sink.emit(&self.group_plots(&groups.all)?)?);

        Ok(WalkthroughReport {
            seed: config.seed,
            alpha: config.alpha,
            labels: groups.labels,
            summary,
            significant,
            chi_square,
            correlation,
            trend,
            normality,
            appears_normal,
            groups: group_summary,
            figures,
        })
    }

    fn groups(&self) -> Result<Groups> {
        match &self.scores {
            Some(scores) => {
                let mut labelled = scores.iter();
                let (Some((label_a, first)), Some((label_b, second))) =
                    (labelled.next(), labelled.next())
                else {
                    return Err(Error::InvalidInput(format!(
                        "score table needs at least two groups, found {}",
                        scores.len()
                    )));
                };
                Ok(Groups {
                    labels: (label_a.to_string(), label_b.to_string()),
                    first: first.to_vec(),
                    second: second.to_vec(),
                    all: scores.clone(),
                })
            }
            None => {
                let mut rng = stream(self.config.seed, GROUP_STREAM);
                let first = group_sample(&mut rng, &self.config.group1)?;
                let second = group_sample(&mut rng, &self.config.group2)?;
                let all = GroupedSamples::from_groups([("A", first.clone()), ("B", second.clone())])?;
                Ok(Groups {
                    labels: ("Group 1".to_string(), "Group 2".to_string()),
                    first,
                    second,
                    all,
                })
            }
        }
    }

    fn basic_plots(&self) -> Result<Figure> {
        let mut rng = stream(self.config.seed, BASIC_STREAM);

        let line: Vec<(f64, f64)> = numeric::linspace(0.0, 10.0, 100)
            .into_iter()
            .map(|x| (x, x.sin()))
            .collect();

        let xs: Vec<f64> = (0..50).map(|_| rng.gen::<f64>() * 10.0).collect();
        let noise = normal_sample(&mut rng, 0.0, 2.0, xs.len())?;
        let scatter = xs.iter().zip(&noise).map(|(&x, e)| (x, 2.0 * x + e)).collect();

        let values = normal_sample(&mut rng, 100.0, 15.0, 1000)?;

        let mut boxes = Vec::with_capacity(3);
        for (i, (mean, sd)) in [(100.0, 10.0), (110.0, 15.0), (120.0, 12.0)].into_iter().enumerate() {
            let group = normal_sample(&mut rng, mean, sd, 100)?;
            boxes.push(Series::new(format!("Group {}", i + 1), group));
        }

        let categories = ["A", "B", "C", "D"]
            .into_iter()
            .zip([23.0, 45.0, 56.0, 78.0])
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        let slices = ["A", "B", "C", "D"]
            .into_iter()
            .zip([30.0, 25.0, 20.0, 25.0])
            .map(|(name, share)| (format!("Category {name}"), share))
            .collect();

        let mut figure = Figure::new("basic_plots", 2, 3);
        figure.push(Panel::line("Line Plot", line).with_labels("X", "Sin(X)"))?;
        figure.push(Panel::scatter("Scatter Plot", scatter, None).with_labels("X", "Y"))?;
        figure.push(
            Panel::histogram("Histogram", vec![Series::new("Value", values)], 30, 0.8)
                .with_labels("Value", "Frequency"),
        )?;
        figure.push(Panel::bar("Bar Plot", categories).with_labels("Category", "Value"))?;
        figure.push(Panel::box_plot("Box Plot", boxes).with_labels("", "Value"))?;
        figure.push(Panel::pie("Pie Chart", slices))?;
        Ok(figure)
    }

    fn statistical_plots(
        &self,
        groups: &Groups,
        x: &[f64],
        y: &[f64],
        correlation: &CorrelationResult,
        trend: LinearFit,
    ) -> Result<Figure> {
        let compared = vec![
            Series::new(groups.labels.0.clone(), groups.first.clone()),
            Series::new(groups.labels.1.clone(), groups.second.clone()),
        ];
        let points = x.iter().copied().zip(y.iter().copied()).collect();

        let mut figure = Figure::new("statistical_plots", 1, 3).with_size(1500, 500);
        figure.push(
            Panel::histogram(
                "Distribution Comparison",
                compared.clone(),
                self.config.comparison_bins,
                0.5,
            )
            .with_labels("Value", "Frequency"),
        )?;
        figure.push(Panel::box_plot("Box Plot Comparison", compared).with_labels("", "Value"))?;
        figure.push(
            Panel::scatter(
                format!("Correlation (r={:.3})", correlation.r),
                points,
                Some(trend),
            )
            .with_labels("X", "Y"),
        )?;
        Ok(figure)
    }

    fn group_plots(&self, grouped: &GroupedSamples) -> Result<Figure> {
        let series: Vec<Series> = grouped
            .iter()
            .map(|(label, values)| Series::new(label, values.to_vec()))
            .collect();

        let mut figure = Figure::new("group_plots", 1, 3).with_size(1200, 400);
        figure.push(Panel::violin("Violin Plot", series.clone()).with_labels("Group", "Score"))?;
        figure.push(Panel::box_plot("Box Plot", series.clone()).with_labels("Group", "Score"))?;
        figure.push(
            Panel::strip("Strip Plot", series, 0.2, self.config.seed).with_labels("Group", "Score"),
        )?;
        Ok(figure)
    }
}

/// Run the walkthrough, writing SVG files when the config asks for figures
pub fn run_walkthrough(
    config: WalkthroughConfig,
    scores: Option<GroupedSamples>,
) -> Result<WalkthroughReport> {
    fn run<S: FigureSink>(
        walkthrough: Walkthrough<S>,
        scores: Option<GroupedSamples>,
    ) -> Result<WalkthroughReport> {
        match scores {
            Some(scores) => walkthrough.with_scores(scores).run(),
            None => walkthrough.run(),
        }
    }

    config.validate()?;
    if config.figures {
        let sink = SvgFileSink::new(&config.output_dir)?;
        run(Walkthrough::new(config, sink)?, scores)
    } else {
        run(Walkthrough::new(config, NullFigureSink)?, scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use primer_viz::MemoryFigureSink;

    #[test]
    fn test_default_run() {
        let walkthrough = Walkthrough::new(WalkthroughConfig::default(), MemoryFigureSink::new()).unwrap();
        let report = walkthrough.run().unwrap();

        assert_eq!(
            walkthrough.sink().names(),
            vec!["basic_plots", "statistical_plots", "group_plots"]
        );
        assert!(report.figures.is_empty());
        assert_eq!((report.summary.n_a, report.summary.n_b), (30, 30));
        assert_abs_diff_eq!(report.chi_square.statistic, 0.6464646464646465, epsilon = 1e-12);
        assert_eq!(report.correlation.n, 100);
        assert_eq!(report.normality.n, 100);
        assert_eq!(report.groups.rows.len(), 2);
        assert_eq!(report.labels, ("Group 1".to_string(), "Group 2".to_string()));
    }

    #[test]
    fn test_runs_are_reproducible() {
        let config = WalkthroughConfig {
            seed: 11,
            ..WalkthroughConfig::default()
        };
        let first = Walkthrough::new(config.clone(), NullFigureSink).unwrap().run().unwrap();
        let second = Walkthrough::new(config, NullFigureSink).unwrap().run().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_group_summary_matches_compared_samples() {
        let report = Walkthrough::new(WalkthroughConfig::default(), NullFigureSink)
            .unwrap()
            .run()
            .unwrap();
        let a = report.groups.get("A").unwrap();
        assert_abs_diff_eq!(a.mean, report.summary.mean_a, epsilon = 1e-9);
        assert_abs_diff_eq!(a.std.unwrap(), report.summary.sd_a, epsilon = 1e-9);
    }

    #[test]
    fn test_scores_replace_synthetic_groups() {
        let scores = GroupedSamples::from_records(vec![
            ("ctrl", 1.0),
            ("ctrl", 2.0),
            ("ctrl", 3.0),
            ("treat", 4.0),
            ("treat", 6.0),
            ("treat", 5.0),
            ("zeta", 9.0),
        ])
        .unwrap();
        let report = Walkthrough::new(WalkthroughConfig::default(), NullFigureSink)
            .unwrap()
            .with_scores(scores)
            .run()
            .unwrap();

        assert_eq!(report.labels, ("ctrl".to_string(), "treat".to_string()));
        assert_abs_diff_eq!(report.summary.mean_a, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.summary.t_statistic, -3.6742346141747673, epsilon = 1e-9);
        assert_eq!(report.groups.rows.len(), 3);
    }

    #[test]
    fn test_single_group_scores_rejected() {
        let scores = GroupedSamples::from_records(vec![("only", 1.0), ("only", 2.0)]).unwrap();
        let result = Walkthrough::new(WalkthroughConfig::default(), NullFigureSink)
            .unwrap()
            .with_scores(scores)
            .run();
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_report_text() {
        let report = Walkthrough::new(WalkthroughConfig::default(), NullFigureSink)
            .unwrap()
            .run()
            .unwrap();
        let text = report.to_string();
        assert!(text.contains("T-TEST (Independent samples)"));
        assert!(text.contains("Student's t-test"));
        assert!(text.contains("Chi-square: 0.6465"));
        assert!(text.contains("Result: "));
        assert!(!text.contains("FIGURES"));
    }
}
