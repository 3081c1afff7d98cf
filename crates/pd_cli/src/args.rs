// Argument parsing surface for the `pdash` binary.
//
// Everything the dashboard pipeline needs is a flag here: source paths,
// density policy, chart selection, filters, per-chart knobs, and output
// destinations. Arg enums stay CLI-local and convert into the library
// types at the seam.

use clap::{Parser, ValueEnum};
use pd_charts::{BarMode, HeightScale, ValueField};
use pd_core::DensityPolicy;
use pd_pipeline::{ChartKind, ChartRequest};
use std::path::PathBuf;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "pdash",
    disable_help_subcommand = true,
    about = "Offline pathogen dashboard pipeline: renders chart specs as JSON"
)]
pub struct Args {
    /// JSON snapshot of record documents. Omit to use synthetic data only.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Seed for the synthetic fallback generator.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Gap-fill policy for grid completion.
    #[arg(long, value_enum, default_value_t = PolicyArg::FullRectangle)]
    pub policy: PolicyArg,

    /// Chart to render.
    #[arg(long, value_enum, default_value_t = ChartArg::Summary)]
    pub chart: ChartArg,

    /// Inclusive year range as MIN:MAX (clamped to the data's span).
    #[arg(long, value_parser = parse_year_range)]
    pub years: Option<(i32, i32)>,

    /// Comma-separated pathogens to keep, in display order.
    #[arg(long, value_delimiter = ',')]
    pub pathogens: Vec<String>,

    /// Heatmap value field.
    #[arg(long, value_enum, default_value_t = FieldArg::Total)]
    pub field: FieldArg,

    /// 2D bar layout.
    #[arg(long, value_enum, default_value_t = BarModeArg::Group)]
    pub bar_mode: BarModeArg,

    /// Column cap for the facet grid.
    #[arg(long, default_value_t = 4)]
    pub max_cols: usize,

    /// Share one y-range across facet panels.
    #[arg(long)]
    pub uniform_scale: bool,

    /// Height scale for the 3D value axis.
    #[arg(long, value_enum, default_value_t = ScaleArg::Linear)]
    pub scale: ScaleArg,

    /// Emit mid-height count labels on 3D bars.
    #[arg(long)]
    pub show_values: bool,

    /// Write the chart spec JSON here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Also export the filtered grid as CSV.
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// Suppress non-essential stderr logs.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PolicyArg {
    FullRectangle,
    PerPathogenSpan,
}

impl From<PolicyArg> for DensityPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::FullRectangle => DensityPolicy::FullRectangle,
            PolicyArg::PerPathogenSpan => DensityPolicy::PerPathogenSpan,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ChartArg {
    Bars3d,
    Bars2d,
    Facets,
    Heatmap,
    Pie,
    TimeSeries,
    Summary,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FieldArg {
    Positive,
    Negative,
    Total,
}

impl From<FieldArg> for ValueField {
    fn from(f: FieldArg) -> Self {
        match f {
            FieldArg::Positive => ValueField::Positive,
            FieldArg::Negative => ValueField::Negative,
            FieldArg::Total => ValueField::Total,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum BarModeArg {
    Group,
    Stack,
}

impl From<BarModeArg> for BarMode {
    fn from(m: BarModeArg) -> Self {
        match m {
            BarModeArg::Group => BarMode::Group,
            BarModeArg::Stack => BarMode::Stack,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ScaleArg {
    Linear,
    Log,
}

impl From<ScaleArg> for HeightScale {
    fn from(s: ScaleArg) -> Self {
        match s {
            ScaleArg::Linear => HeightScale::Linear,
            ScaleArg::Log => HeightScale::Log1p,
        }
    }
}

/// Year range parser: `MIN:MAX`, both inclusive.
pub fn parse_year_range(s: &str) -> Result<(i32, i32), String> {
    let (min, max) = s
        .split_once(':')
        .ok_or_else(|| "expected MIN:MAX".to_string())?;
    let min: i32 = min.trim().parse().map_err(|_| format!("bad year: {min}"))?;
    let max: i32 = max.trim().parse().map_err(|_| format!("bad year: {max}"))?;
    Ok((min, max))
}

/// Errors surfaced by argument validation. Messages stay short and stable.
#[derive(Debug)]
pub enum CliError {
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Parse and validate. A snapshot path that does not exist is rejected
/// here; letting it slide would silently fall back to synthetic data.
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();
    validate(&args)?;
    Ok(args)
}

fn validate(args: &Args) -> Result<(), CliError> {
    if let Some(input) = &args.input {
        if !input.is_file() {
            return Err(CliError::NotFound(input.display().to_string()));
        }
    }
    Ok(())
}

impl Args {
    /// The pipeline request this invocation describes.
    pub fn to_request(&self) -> ChartRequest {
        let chart = match self.chart {
            ChartArg::Bars3d => ChartKind::Bars3d {
                scale: self.scale.into(),
                show_values: self.show_values,
            },
            ChartArg::Bars2d => ChartKind::Bars2d { mode: self.bar_mode.into() },
            ChartArg::Facets => ChartKind::Facets {
                max_cols: self.max_cols,
                uniform_scale: self.uniform_scale,
            },
            ChartArg::Heatmap => ChartKind::Heatmap { field: self.field.into() },
            ChartArg::Pie => ChartKind::Pie,
            ChartArg::TimeSeries => ChartKind::TimeSeries,
            ChartArg::Summary => ChartKind::Summary,
        };
        let mut request = ChartRequest::new(chart).with_pathogens(self.pathogens.clone());
        if let Some((min, max)) = self.years {
            request = request.with_years(min, max);
        }
        request
    }
}
