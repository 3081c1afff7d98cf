//! 3D stacked bar builder.
//!
//! Each nonzero cell becomes up to two cuboids: the negative count rises
//! from the floor, the positive count sits on its top face. A cuboid is
//! six independent quad faces (flat shading, no shared-vertex seams) plus
//! a 12-segment wireframe.

use crate::spec::{
    AxisRange, Bars3dSpec, CategoryAxis, ChartSpec, Cuboid, Edge3, Outcome, Point3, QuadFace,
    ValueAxis, ValueLabel,
};
use crate::style::{Camera, HeightScale, Palette, EDGE_COLOR};
use pd_core::Record;
use pd_grid::distinct_years;

#[derive(Clone, Debug)]
pub struct Bars3dOptions {
    /// Half the bar footprint in grid cells.
    pub half_width: f64,
    pub scale: HeightScale,
    pub palette: Palette,
    /// Emit a mid-height count label per cuboid.
    pub show_values: bool,
    /// Preferred pathogen order (selection order); unlisted pathogens
    /// follow, sorted.
    pub pathogen_order: Vec<String>,
}

impl Default for Bars3dOptions {
    fn default() -> Self {
        Self {
            half_width: 0.4,
            scale: HeightScale::Linear,
            palette: Palette::default(),
            show_values: false,
            pathogen_order: Vec::new(),
        }
    }
}

/// Six faces and twelve edges of an axis-aligned box spanning
/// `[y0, y1]` vertically, centered on `(xc, zc)` in the category plane.
fn box_geometry(xc: f64, zc: f64, hw: f64, y0: f64, y1: f64) -> ([QuadFace; 6], [Edge3; 12]) {
    let (x0, x1) = (xc - hw, xc + hw);
    let (z0, z1) = (zc - hw, zc + hw);
    let b = [
        Point3::new(x0, y0, z0),
        Point3::new(x1, y0, z0),
        Point3::new(x1, y0, z1),
        Point3::new(x0, y0, z1),
    ];
    let t = [
        Point3::new(x0, y1, z0),
        Point3::new(x1, y1, z0),
        Point3::new(x1, y1, z1),
        Point3::new(x0, y1, z1),
    ];
    let faces = [
        QuadFace { corners: b },
        QuadFace { corners: t },
        // front / back (constant z)
        QuadFace { corners: [b[0], b[1], t[1], t[0]] },
        QuadFace { corners: [b[3], b[2], t[2], t[3]] },
        // left / right (constant x)
        QuadFace { corners: [b[0], b[3], t[3], t[0]] },
        QuadFace { corners: [b[1], b[2], t[2], t[1]] },
    ];
    let mut edges = [Edge3 { start: b[0], end: b[0] }; 12];
    for i in 0..4 {
        edges[i] = Edge3 { start: b[i], end: b[(i + 1) % 4] };
        edges[4 + i] = Edge3 { start: t[i], end: t[(i + 1) % 4] };
        edges[8 + i] = Edge3 { start: b[i], end: t[i] };
    }
    (faces, edges)
}

pub fn build_bars3d(grid: &[Record], opts: &Bars3dOptions) -> ChartSpec {
    if grid.is_empty() {
        return crate::empty_spec();
    }

    let years = distinct_years(grid);
    let pathogens = crate::display_order(grid, &opts.pathogen_order);

    let year_index = |year: i32| years.iter().position(|&y| y == year);
    let pathogen_index = |name: &str| pathogens.iter().position(|p| p == name);

    let mut cuboids = Vec::new();
    let mut labels = Vec::new();

    for r in grid {
        let (Some(xi), Some(zi)) = (year_index(r.year), pathogen_index(&r.pathogen)) else {
            continue;
        };
        let (xc, zc) = (xi as f64, zi as f64);

        let neg_height = opts.scale.apply(r.negative);
        if neg_height > 0.0 {
            let (faces, edges) = box_geometry(xc, zc, opts.half_width, 0.0, neg_height);
            cuboids.push(Cuboid {
                year: r.year,
                pathogen: r.pathogen.clone(),
                outcome: Outcome::Negative,
                value: r.negative,
                color: opts.palette.negative.clone(),
                faces,
                edges,
            });
            if opts.show_values {
                labels.push(ValueLabel {
                    position: Point3::new(xc, neg_height / 2.0, zc),
                    text: r.negative.to_string(),
                });
            }
        }

        let pos_height = opts.scale.apply(r.positive);
        if pos_height > 0.0 {
            let y_start = neg_height;
            let (faces, edges) =
                box_geometry(xc, zc, opts.half_width, y_start, y_start + pos_height);
            cuboids.push(Cuboid {
                year: r.year,
                pathogen: r.pathogen.clone(),
                outcome: Outcome::Positive,
                value: r.positive,
                color: opts.palette.positive.clone(),
                faces,
                edges,
            });
            if opts.show_values {
                labels.push(ValueLabel {
                    position: Point3::new(xc, y_start + pos_height / 2.0, zc),
                    text: r.positive.to_string(),
                });
            }
        }
    }

    // Axis top is scaled against the tallest single outcome, floored at 1
    // so an all-small grid still renders.
    let raw_max = grid
        .iter()
        .map(|r| r.positive.max(r.negative))
        .max()
        .unwrap_or(0);
    let scaled_max = opts.scale.apply(raw_max).max(1.0);

    ChartSpec::Bars3d(Bars3dSpec {
        cuboids,
        labels,
        year_axis: CategoryAxis {
            title: "Year".to_string(),
            labels: years.iter().map(|y| y.to_string()).collect(),
            range: AxisRange { min: -0.5, max: years.len() as f64 - 0.5 },
        },
        pathogen_axis: CategoryAxis {
            title: "Pathogen".to_string(),
            labels: pathogens.clone(),
            range: AxisRange { min: -0.5, max: pathogens.len() as f64 - 0.5 },
        },
        value_axis: ValueAxis {
            title: match opts.scale {
                HeightScale::Linear => "Count".to_string(),
                HeightScale::Log1p => "Log Count".to_string(),
            },
            scale: opts.scale,
            range: AxisRange { min: 0.0, max: scaled_max * 1.1 },
        },
        edge_color: EDGE_COLOR.to_string(),
        camera: Camera::default_view(),
    })
}
