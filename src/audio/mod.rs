//! WAV decoding and ambient-noise calibration.

mod source;

pub use source::{AudioClip, AudioSource, CalibrationConfig};
