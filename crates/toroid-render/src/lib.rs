//! toroid-render: Output artifacts for toroid-fdtd sweeps
//!
//! This crate provides:
//! - The sweep table (comma-separated text, written and read back)
//! - The arrival-time vs. rotation-rate figure (PNG)
//! - The polar ring animation (GIF)
//!
//! The figure is always built from the table on disk, never from the
//! in-memory sweep result.

pub mod animation;
pub mod plot;
pub mod table;

pub use animation::{render_animation, ring_outline};
pub use plot::{load_series, render_arrival_plot};
pub use table::{parse_table, read_table, write_table, TableRow};
