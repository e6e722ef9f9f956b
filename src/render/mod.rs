//! Render pipeline.
//!
//! Turns the terminal grid into drawing calls:
//! - `runs`: split rows into same-style runs
//! - `label`/`pool`: reusable text primitives keyed by (row, slot)
//! - `palette`: resolve cell colors to RGB
//! - `surface`: drawing targets, including the ratatui-backed one
//! - `frame`: the per-frame renderer
//! - `status`: FPS overlay

mod frame;
mod label;
mod palette;
mod pool;
mod runs;
mod status;
mod surface;

pub use frame::{wide_glyph_compensation, FrameRenderer, FrameStats, CURSOR_WIDTH, WIDE_GLYPH_COMPENSATION};
pub use label::Label;
pub use palette::{named_rgb, Palette, Rgb};
pub use pool::LabelPool;
pub use runs::{segment_row, StyleRun};
pub use status::FpsCounter;
pub use surface::{CellSurface, Surface};
