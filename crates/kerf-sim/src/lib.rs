#![warn(missing_docs)]

//! Spatial indexing and implicit-surface sweep engine for the kerf
//! machining simulator.
//!
//! This crate answers two geometric questions at interactive rates while
//! a tool moves along a machining path: "does this region of space contain
//! any machined material?" and "what is the signed depth of a point
//! relative to the remaining stock?"
//!
//! # Architecture
//!
//! - [`MoveLookup`] — spatial-index contract over motion segments, with
//!   two implementations: [`AabbTree`] (median-split bounding-volume tree)
//!   and [`Octree`] (fixed-depth eight-way subdivision).
//! - [`Sweep`] — analytic depth classifiers for the volume a tool shape
//!   occupies while traveling a segment: [`ConicSweep`], [`SpheroidSweep`],
//!   [`CompositeSweep`].
//! - [`ToolSweep`] — an index over every segment's swept boxes plus one
//!   shared sweep per tool, exposing a depth field and a cull test.
//! - [`CutWorkpiece`] — stock block minus tool sweep, composed into the
//!   single [`FieldFunction`] a surface extractor queries.
//!
//! Index construction is single-threaded; once built, every query path is
//! read-only and safe to fan out across worker threads without locking.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use kerf_math::{Aabb3, Point3};
//! use kerf_path::{Move, Tool, ToolPath, ToolTable};
//! use kerf_sim::{CutWorkpiece, FieldFunction, ToolSweep, Workpiece};
//!
//! let mut tools = ToolTable::new();
//! tools.set(1, Tool::Cylindrical { radius: 1.0, length: 10.0 });
//!
//! let mut path = ToolPath::new(tools);
//! path.add(Move::new(
//!     Some(1),
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(8.0, 0.0, 0.0),
//!     0.0,
//!     1.0,
//! ));
//!
//! let sweep = Arc::new(ToolSweep::new(Arc::new(path), 0.0, 1.0).unwrap());
//! let stock = Workpiece::new(Aabb3::new(
//!     Point3::new(-5.0, -5.0, -5.0),
//!     Point3::new(10.0, 5.0, 5.0),
//! ));
//!
//! let cut = CutWorkpiece::new(sweep, stock);
//! assert!(cut.depth(Point3::new(4.0, 0.0, 1.0)) < 0.0); // machined away
//! assert!(cut.depth(Point3::new(4.0, 4.0, 1.0)) > 0.0); // still material
//! ```

mod aabb_tree;
mod cut_workpiece;
mod error;
mod field;
mod lookup;
mod octree;
mod sweep;
mod tool_sweep;
mod workpiece;

pub use aabb_tree::AabbTree;
pub use cut_workpiece::CutWorkpiece;
pub use error::SimError;
pub use field::FieldFunction;
pub use lookup::MoveLookup;
pub use octree::Octree;
pub use sweep::{CompositeSweep, ConicSweep, SpheroidSweep, Sweep, DEFAULT_TOLERANCE};
pub use tool_sweep::{SharedLookup, SharedSweep, ToolSweep};
pub use workpiece::Workpiece;
