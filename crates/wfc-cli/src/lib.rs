//! CLI library components for the waveform catalog extractor.

pub mod logging;
pub mod pipeline;
