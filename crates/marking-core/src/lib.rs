//! Interaction core for pointer-driven marking menus.
//!
//! A [`SelectionMachine`] turns press/move/release events into a highlighted
//! item index by asking a [`Geometry`] which item lies under the pointer.
//! Rendering, trial recording and logging belong to the host, which listens
//! through [`SelectionObserver`].

pub mod geometry;
pub mod macros;
pub mod menu;
pub mod permutation;
pub mod point;
pub mod selection;

pub use geometry::{
    CellSize, DEFAULT_MIN_DIST, Dimensions, Geometry, GeometryError, Layout, LinearGeometry,
    RadialGeometry, RandomizedGeometry,
};
pub use menu::{ItemLabel, MenuError, MenuItems};
pub use permutation::{Permutation, PermutationError, SlotAssignment};
pub use point::{Point, Rect};
pub use selection::{PointerEvent, PointerKind, SelectionMachine, SelectionObserver, SelectionState};
