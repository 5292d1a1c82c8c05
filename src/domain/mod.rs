//! Domain types for table clustering.
//!
//! This module contains the value types exchanged between the pipeline stages:
//! the detected [`Cell`] rectangles and the [`TableCluster`] groups built from them.

pub mod cell;
pub mod table_cluster;

pub use cell::Cell;
pub use table_cluster::TableCluster;
