// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders the ridgeline-to-horizon transition for a weekly traffic CSV.

mod load;
mod svg;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use ridgeline_charts::{
    AxisStyle, Ease, RidgeHorizonSpec, SequentialScheme, Sequencer, StageTimings, TimeDomainMode,
    Timeline, plan_stages,
};
use ridgeline_core::Scene;
use ridgeline_transforms::normalize_rows;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::svg::SvgWriter;

/// Upper bound on the snapshots a single `--frames` run may write.
const MAX_FRAMES: usize = 10_000;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ridgeline-to-horizon chart renderer", long_about = None)]
struct Cli {
    /// CSV with `name`, `date` (epoch seconds), `total_1` and `total_2` columns
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Output SVG path
    #[arg(short, long, default_value = "ridgeline.svg", value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Available width in pixels
    #[arg(long, default_value_t = 928.0)]
    width: f64,

    /// Row order by series total
    #[arg(long, value_enum, default_value_t = OrderOpt::Asc)]
    order: OrderOpt,

    /// Band color scheme
    #[arg(long, value_enum, default_value_t = SchemeOpt::Orrd)]
    scheme: SchemeOpt,

    /// How the shared time axis is derived
    #[arg(long, value_enum, default_value_t = TimeDomainOpt::Global)]
    time_domain: TimeDomainOpt,

    /// Band fade-in duration in milliseconds
    #[arg(long, default_value_t = 2000.0)]
    fade_ms: f64,

    /// Pause before the ridge erase starts, in milliseconds
    #[arg(long, default_value_t = 1000.0)]
    erase_delay_ms: f64,

    /// Ridge erase duration in milliseconds
    #[arg(long, default_value_t = 2000.0)]
    erase_ms: f64,

    /// Band fold duration in milliseconds
    #[arg(long, default_value_t = 2000.0)]
    shift_ms: f64,

    /// Timing curve of the band fade and fold
    #[arg(long, value_enum, default_value_t = EaseOpt::InOutCubic)]
    ease: EaseOpt,

    /// Series label font size
    #[arg(long, default_value_t = 10.0)]
    label_font_size: f64,

    /// Time axis label font size
    #[arg(long, default_value_t = 10.0)]
    axis_font_size: f64,

    /// Write the initial scene without animations
    #[arg(long = "static", action = ArgAction::SetTrue)]
    static_only: bool,

    /// Directory to write sampled frame snapshots into
    #[arg(long, value_hint = ValueHint::DirPath)]
    frames: Option<PathBuf>,

    /// Time between frame snapshots in milliseconds
    #[arg(long, default_value_t = 250.0)]
    frame_step_ms: f64,

    /// Enable debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderOpt {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemeOpt {
    Orrd,
    Blues,
}

impl From<SchemeOpt> for SequentialScheme {
    fn from(value: SchemeOpt) -> Self {
        match value {
            SchemeOpt::Orrd => Self::OrRd,
            SchemeOpt::Blues => Self::Blues,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TimeDomainOpt {
    Global,
    Reference,
}

impl From<TimeDomainOpt> for TimeDomainMode {
    fn from(value: TimeDomainOpt) -> Self {
        match value {
            TimeDomainOpt::Global => Self::Global,
            TimeDomainOpt::Reference => Self::ReferenceSeries,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EaseOpt {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
}

impl From<EaseOpt> for Ease {
    fn from(value: EaseOpt) -> Self {
        match value {
            EaseOpt::Linear => Self::Linear,
            EaseOpt::InQuad => Self::InQuad,
            EaseOpt::OutQuad => Self::OutQuad,
            EaseOpt::InOutQuad => Self::InOutQuad,
            EaseOpt::InCubic => Self::InCubic,
            EaseOpt::OutCubic => Self::OutCubic,
            EaseOpt::InOutCubic => Self::InOutCubic,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    run(&cli)
}

fn spec_for(cli: &Cli) -> Result<RidgeHorizonSpec> {
    for (flag, ms) in [
        ("--fade-ms", cli.fade_ms),
        ("--erase-delay-ms", cli.erase_delay_ms),
        ("--erase-ms", cli.erase_ms),
        ("--shift-ms", cli.shift_ms),
    ] {
        ensure!(ms.is_finite() && ms >= 0.0, "{flag} must be a non-negative duration");
    }
    for (flag, size) in [
        ("--label-font-size", cli.label_font_size),
        ("--axis-font-size", cli.axis_font_size),
    ] {
        ensure!(size.is_finite() && size > 0.0, "{flag} must be a positive size");
    }

    let preset = match cli.order {
        OrderOpt::Asc => RidgeHorizonSpec::ascending(),
        OrderOpt::Desc => RidgeHorizonSpec::descending(),
    };
    let axis = AxisStyle {
        font_size: cli.axis_font_size,
        ..preset.axis.clone()
    };
    Ok(preset
        .with_scheme(cli.scheme.into())
        .with_time_domain(cli.time_domain.into())
        .with_timings(StageTimings {
            band_fade_in_ms: cli.fade_ms,
            ridge_fade_out_delay_ms: cli.erase_delay_ms,
            ridge_fade_out_ms: cli.erase_ms,
            band_shift_ms: cli.shift_ms,
            band_ease: cli.ease.into(),
        })
        .with_label_font_size(cli.label_font_size)
        .with_axis(axis))
}

fn run(cli: &Cli) -> Result<()> {
    ensure!(
        cli.width.is_finite() && cli.width > 0.0,
        "--width must be a positive number of pixels"
    );
    let spec = spec_for(cli)?;

    let rows = load::load_rows(&cli.input)?;
    let dataset = spec
        .prepare(normalize_rows(&rows))
        .with_context(|| format!("{} holds no chartable rows", cli.input.display()))?;
    info!(
        rows = rows.len(),
        series = dataset.len(),
        order = ?dataset.order(),
        "aggregated records"
    );

    let mut chart = spec.build(&dataset, cli.width).context("failed to build chart")?;
    let initial = chart.scene.clone();

    let plans = plan_stages(&chart.visuals, chart.layout.row_height, &spec.timings);
    for plan in &plans {
        debug!(
            stage = ?plan.stage,
            tweens = plan.tweens.len(),
            removals = plan.removals.len(),
            duration_ms = plan.duration_ms(),
            "planned stage"
        );
    }
    let mut timeline = Timeline::new();
    let mut sequencer = Sequencer::new(plans);
    let report = pollster::block_on(sequencer.run(&mut chart.scene, &mut timeline));
    for failure in &report.failures {
        warn!(
            stage = ?failure.stage,
            element = %failure.target,
            error = %failure.error,
            "animation step skipped"
        );
    }

    let writer = SvgWriter::new(&initial);
    let svg = if cli.static_only {
        writer.to_svg_string()
    } else {
        writer.with_timeline(&timeline).to_svg_string()
    };
    fs::write(&cli.output, svg)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!(
        path = %cli.output.display(),
        duration_ms = timeline.duration_ms(),
        stages = report.completed.len(),
        "wrote chart"
    );

    if let Some(dir) = &cli.frames {
        let written = write_frames(dir, &initial, &timeline, cli.frame_step_ms)?;
        info!(dir = %dir.display(), frames = written, "wrote frame snapshots");
    }
    Ok(())
}

fn write_frames(dir: &Path, initial: &Scene, timeline: &Timeline, step_ms: f64) -> Result<usize> {
    ensure!(
        step_ms.is_finite() && step_ms > 0.0,
        "--frame-step-ms must be positive"
    );
    let duration = timeline.duration_ms();
    let steps = (duration / step_ms).ceil();
    ensure!(
        steps < MAX_FRAMES as f64,
        "--frame-step-ms {step_ms} would write {} frames (limit {MAX_FRAMES})",
        steps + 1.0
    );
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    #[allow(clippy::cast_possible_truncation, reason = "bounded by MAX_FRAMES above")]
    let steps = steps as usize;
    for i in 0..=steps {
        let at_ms = (i as f64 * step_ms).min(duration);
        let scene = timeline
            .sample(initial, at_ms)
            .with_context(|| format!("failed to sample the timeline at {at_ms}ms"))?;
        let path = dir.join(format!("frame_{i:04}.svg"));
        fs::write(&path, SvgWriter::new(&scene).to_svg_string())
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(steps + 1)
}

#[cfg(test)]
mod tests {
    use ridgeline_charts::SortOrder;

    use super::*;

    #[test]
    fn cli_flags_map_onto_the_chart_preset() {
        let cli = Cli::parse_from([
            "ridgeline_demo",
            "--input",
            "traffic.csv",
            "--order",
            "desc",
            "--scheme",
            "blues",
            "--time-domain",
            "reference",
        ]);
        let spec = spec_for(&cli).unwrap();
        assert_eq!(spec.order, SortOrder::Desc);
        assert_eq!(spec.scheme, SequentialScheme::Blues);
        assert_eq!(spec.time_domain, TimeDomainMode::ReferenceSeries);
        assert_eq!(spec.constants, RidgeHorizonSpec::descending().constants);
        assert_eq!(cli.output, PathBuf::from("ridgeline.svg"));
    }

    #[test]
    fn defaults_use_the_ascending_preset() {
        let cli = Cli::parse_from(["ridgeline_demo", "-i", "traffic.csv"]);
        assert_eq!(spec_for(&cli).unwrap(), RidgeHorizonSpec::ascending());
        assert!(!cli.static_only);
        assert_eq!(cli.frame_step_ms, 250.0);
    }

    #[test]
    fn timing_and_font_flags_reach_the_chart_config() {
        let cli = Cli::parse_from([
            "ridgeline_demo",
            "-i",
            "traffic.csv",
            "--fade-ms",
            "500",
            "--erase-delay-ms",
            "0",
            "--shift-ms",
            "750",
            "--ease",
            "out-quad",
            "--label-font-size",
            "12",
            "--axis-font-size",
            "9",
        ]);
        let spec = spec_for(&cli).unwrap();
        assert_eq!(
            spec.timings,
            StageTimings {
                band_fade_in_ms: 500.0,
                ridge_fade_out_delay_ms: 0.0,
                ridge_fade_out_ms: 2000.0,
                band_shift_ms: 750.0,
                band_ease: Ease::OutQuad,
            }
        );
        assert_eq!(spec.label_font_size, 12.0);
        assert_eq!(spec.axis.font_size, 9.0);
        assert_eq!(spec.axis.tick_size, AxisStyle::default().tick_size);
    }

    #[test]
    fn invalid_timing_and_font_flags_are_rejected() {
        let cli = Cli::parse_from(["ridgeline_demo", "-i", "a.csv", "--fade-ms=-1"]);
        assert!(spec_for(&cli).is_err());
        let cli = Cli::parse_from(["ridgeline_demo", "-i", "a.csv", "--axis-font-size", "0"]);
        let err = spec_for(&cli).unwrap_err();
        assert!(err.to_string().contains("--axis-font-size"), "{err:#}");
    }

    #[test]
    fn frames_cover_the_whole_timeline() {
        let spec = RidgeHorizonSpec::ascending();
        let dataset = spec
            .prepare([
                ridgeline_transforms::Record::new("a", 0, 1.0),
                ridgeline_transforms::Record::new("a", 604_800_000, 2.0),
            ])
            .unwrap();
        let mut chart = spec.build(&dataset, 400.0).unwrap();
        let initial = chart.scene.clone();
        let plans = plan_stages(&chart.visuals, chart.layout.row_height, &spec.timings);
        let mut timeline = Timeline::new();
        pollster::block_on(Sequencer::new(plans).run(&mut chart.scene, &mut timeline));

        let dir = std::env::temp_dir().join(format!("ridgeline_frames_{}", std::process::id()));
        let written = write_frames(&dir, &initial, &timeline, 1_000.0).unwrap();
        assert_eq!(written, 8);
        assert!(dir.join("frame_0007.svg").exists());
        assert!(write_frames(&dir, &initial, &timeline, 0.0).is_err());
        let err = write_frames(&dir, &initial, &timeline, 1e-9).unwrap_err();
        assert!(err.to_string().contains("limit"), "{err:#}");
        assert!(!dir.join("frame_0008.svg").exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
