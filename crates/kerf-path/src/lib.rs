#![warn(missing_docs)]

//! Tool and tool path data model for the kerf machining simulator.
//!
//! This crate defines the inputs the simulation core consumes: cutting
//! tool shape descriptors, a numbered tool table, and time-ordered motion
//! segments with interpolatable positions. Producing these from G-code is
//! the job of an interpreter layer, not this crate.

mod tool;
mod toolpath;

pub use tool::{Tool, ToolTable};
pub use toolpath::{Move, ToolPath};
