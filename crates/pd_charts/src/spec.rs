//! Chart artifact model.
//!
//! Builders turn a dense grid into one of these values; the presentation
//! shell serializes them as JSON and draws. No builder recomputes counts
//! the grid already carries, and none of these types touch I/O.

use crate::style::{Camera, HeightScale};
use pd_grid::{SummaryRow, SummaryStats};
use serde::Serialize;

/// Every chart the pipeline can produce. An empty filtered grid yields
/// `Empty`, never an error.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ChartSpec {
    Empty { message: String },
    Bars3d(Bars3dSpec),
    Bars2d(Bars2dSpec),
    Facets(FacetSpec),
    Heatmap(HeatmapSpec),
    Pie(PieSpec),
    TimeSeries(TimeSeriesSpec),
    Summary(SummarySpec),
}

// ----------------------------- 3D stacked bars -----------------------------

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// One flat-shaded quad, wound consistently. Faces are independent meshes
/// rather than one shared vertex buffer, which kills interpolation seams.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QuadFace {
    pub corners: [Point3; 4],
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Edge3 {
    pub start: Point3,
    pub end: Point3,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Positive,
    Negative,
}

/// Text anchored at a bar's mid-height.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValueLabel {
    pub position: Point3,
    pub text: String,
}

/// One box of the 3D chart: six quad faces plus a 12-segment wireframe.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cuboid {
    pub year: i32,
    pub pathogen: String,
    pub outcome: Outcome,
    /// Raw count, before any height scaling.
    pub value: u64,
    pub color: String,
    pub faces: [QuadFace; 6],
    pub edges: [Edge3; 12],
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Category axis: integer tick per label, range padded half a cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryAxis {
    pub title: String,
    pub labels: Vec<String>,
    pub range: AxisRange,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValueAxis {
    pub title: String,
    pub scale: HeightScale,
    pub range: AxisRange,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bars3dSpec {
    pub cuboids: Vec<Cuboid>,
    pub labels: Vec<ValueLabel>,
    pub year_axis: CategoryAxis,
    pub pathogen_axis: CategoryAxis,
    pub value_axis: ValueAxis,
    pub edge_color: String,
    pub camera: Camera,
}

// ----------------------------- 2D bars -----------------------------

/// Explicit flag; the builder never infers the mode from data shape.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarMode {
    #[default]
    Group,
    Stack,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BarSeries {
    pub name: String,
    pub color: String,
    pub values: Vec<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bars2dSpec {
    pub mode: BarMode,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}

// ----------------------------- Faceted small multiples -----------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FacetPanel {
    pub pathogen: String,
    pub years: Vec<i32>,
    pub positive: Vec<u64>,
    pub negative: Vec<u64>,
    /// Vertical range top for this panel.
    pub y_max: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FacetSpec {
    pub columns: usize,
    pub rows: usize,
    pub uniform_scale: bool,
    pub panels: Vec<FacetPanel>,
}

// ----------------------------- Heatmap -----------------------------

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueField {
    Positive,
    Negative,
    #[default]
    Total,
}

/// `values[row][col]` indexed by `(pathogens, years)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeatmapSpec {
    pub field: ValueField,
    pub years: Vec<i32>,
    pub pathogens: Vec<String>,
    pub values: Vec<Vec<u64>>,
}

// ----------------------------- Pie -----------------------------

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PieMode {
    /// Two slices, positive vs negative.
    Outcome,
    /// One slice per pathogen of its total counts.
    PerPathogen,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    pub color: Option<String>,
    pub pull: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieSpec {
    pub mode: PieMode,
    pub hole: f64,
    pub slices: Vec<PieSlice>,
    pub annotation: Option<String>,
}

// ----------------------------- Time series -----------------------------

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineDash {
    Solid,
    Dash,
    Dot,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub color: String,
    pub dash: LineDash,
    pub years: Vec<i32>,
    pub values: Vec<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeSeriesSpec {
    pub series: Vec<LineSeries>,
}

// ----------------------------- Summary -----------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummarySpec {
    pub stats: SummaryStats,
    pub table: Vec<SummaryRow>,
}
