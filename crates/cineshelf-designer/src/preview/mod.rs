//! Sample-card preview of the active configuration.

mod renderer;
mod samples;

pub use renderer::{card_class, container_class, Preview, PreviewRenderer};
pub use samples::{SampleMovie, SAMPLE_MOVIES};
