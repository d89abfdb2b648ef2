#![warn(missing_docs)]

//! Math types for the kerf machining simulator.
//!
//! Thin wrappers around nalgebra providing domain-specific types for
//! cut simulation: points, vectors, and the axis-aligned bounded volume
//! used as the spatial key throughout the simulator.

mod bounds;

pub use bounds::Aabb3;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = nalgebra::Vector3<f64>;
