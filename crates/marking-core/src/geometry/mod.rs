//! Hit-testing for the three menu layouts.
//!
//! Every resolver takes a pointer offset relative to the anchor and answers
//! with the item index under it, or `None`. Touch input is noisy, so "no
//! target" is an ordinary answer and resolvers never fail.

use crate::point::{Point, Rect};
use rand::Rng;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

pub mod linear;
pub mod radial;
pub mod randomized;

pub use linear::LinearGeometry;
pub use radial::RadialGeometry;
pub use randomized::RandomizedGeometry;

/// Minimum drag distance before any item can be selected.
pub const DEFAULT_MIN_DIST: f64 = 20.0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[strum(to_string = "linear", serialize = "normal", serialize = "list")]
    Linear,
    #[strum(to_string = "radial", serialize = "pie")]
    Radial,
    #[strum(to_string = "randomized", serialize = "custom", serialize = "random")]
    Randomized,
}

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("A menu needs at least one item")]
    NoItems,
    #[error("Invalid {name}: {value} (must be finite and positive)")]
    InvalidDimension { name: &'static str, value: f64 },
    #[error("Invalid minimum drag distance: {0} (must be finite and non-negative)")]
    InvalidMinDist(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl CellSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn validate(&self) -> Result<(), GeometryError> {
        positive("cell width", self.width)?;
        positive("cell height", self.height)
    }
}

/// Sizes supplied by the host. Only the fields a layout needs are checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub cell: CellSize,
    pub radius: f64,
    pub min_dist: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            cell: CellSize::new(280.0, 100.0),
            radius: 350.0,
            min_dist: DEFAULT_MIN_DIST,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Linear(LinearGeometry),
    Radial(RadialGeometry),
    Randomized(RandomizedGeometry),
}

impl Geometry {
    pub fn new(layout: Layout, item_count: usize, dims: &Dimensions) -> Result<Self, GeometryError> {
        Ok(match layout {
            Layout::Linear => {
                Self::Linear(LinearGeometry::new(item_count, dims.cell, dims.min_dist)?)
            }
            Layout::Radial => {
                Self::Radial(RadialGeometry::new(item_count, dims.radius, dims.min_dist)?)
            }
            Layout::Randomized => Self::Randomized(RandomizedGeometry::new(
                item_count,
                dims.cell,
                dims.min_dist,
            )?),
        })
    }

    pub fn layout(&self) -> Layout {
        match self {
            Self::Linear(_) => Layout::Linear,
            Self::Radial(_) => Layout::Radial,
            Self::Randomized(_) => Layout::Randomized,
        }
    }

    pub fn item_count(&self) -> usize {
        match self {
            Self::Linear(g) => g.item_count(),
            Self::Radial(g) => g.item_count(),
            Self::Randomized(g) => g.item_count(),
        }
    }

    pub fn resolve(&self, offset: Point) -> Option<usize> {
        match self {
            Self::Linear(g) => g.resolve(offset),
            Self::Radial(g) => g.resolve(offset),
            Self::Randomized(g) => g.resolve(offset),
        }
    }

    /// Extent of the drawn menu relative to the anchor.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Linear(g) => g.bounds(),
            Self::Radial(g) => g.bounds(),
            Self::Randomized(g) => g.bounds(),
        }
    }

    /// Called once when tracking starts. Only the randomized layout keeps
    /// per-session state.
    pub fn begin_session<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Self::Randomized(g) = self {
            g.begin_session(rng);
        }
    }

    pub fn end_session(&mut self) {
        if let Self::Randomized(g) = self {
            g.end_session();
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidDimension { name, value })
    }
}

fn validate_common(item_count: usize, min_dist: f64) -> Result<(), GeometryError> {
    if item_count == 0 {
        return Err(GeometryError::NoItems);
    }
    if !(min_dist.is_finite() && min_dist >= 0.0) {
        return Err(GeometryError::InvalidMinDist(min_dist));
    }
    Ok(())
}

fn in_dead_zone(offset: Point, min_dist: f64) -> bool {
    offset.length_squared() < min_dist * min_dist
}

/// Row of a stacked layout, or `None` on the closed bottom edge.
fn row_at(y: f64, cell_height: f64, item_count: usize) -> Option<usize> {
    let row = (y / cell_height).floor();
    (row >= 0.0 && row < item_count as f64).then_some(row as usize)
}
