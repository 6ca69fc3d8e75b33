//! Primary/fallback recognition orchestration.

use super::backend::{Recognition, SpeechBackend};
use super::pocketsphinx_cli::PocketsphinxCliBackend;
use super::remote_api::{RemoteRecognizer, RemoteRecognizerConfig};
use crate::audio::{AudioClip, AudioSource, CalibrationConfig};
use crate::text;
use std::path::Path;

/// Drives one recognition pass: load and calibrate the clip, ask the primary
/// backend, fall back to the offline engine when the primary is unreachable,
/// clean up the hypothesis.
pub struct Transcriber<P, F> {
    primary: P,
    fallback: F,
    calibration: CalibrationConfig,
}

impl Transcriber<RemoteRecognizer, PocketsphinxCliBackend> {
    /// The default backend pair, configured from the environment.
    pub fn from_env() -> Self {
        Self::new(
            RemoteRecognizer::new(RemoteRecognizerConfig::from_env()),
            PocketsphinxCliBackend::from_env(),
            CalibrationConfig::default(),
        )
    }
}

impl<P: SpeechBackend, F: SpeechBackend> Transcriber<P, F> {
    pub fn new(primary: P, fallback: F, calibration: CalibrationConfig) -> Self {
        Self {
            primary,
            fallback,
            calibration,
        }
    }

    /// Transcribe a WAV file. `None` means no speech was detected or no
    /// backend produced a hypothesis; the two are indistinguishable here.
    /// Recognition failures are absorbed and logged, never propagated.
    pub async fn transcribe(&self, path: &Path) -> Option<String> {
        if !self.primary.is_available() {
            log::error!("{} is not available", self.primary.name());
            return None;
        }

        let clip = match self.load_clip(path) {
            Ok(clip) => clip,
            Err(e) => {
                log::error!("{}", e);
                return None;
            }
        };

        match self.primary.recognize(&clip).await {
            Ok(Recognition::Hypothesis(raw)) => non_empty(text::normalize_command(&raw)),
            Ok(Recognition::Unintelligible) => None,
            Ok(Recognition::Unavailable) => {
                log::debug!(
                    "{} unavailable, trying {}",
                    self.primary.name(),
                    self.fallback.name()
                );
                self.try_fallback(&clip).await
            }
            Err(e) => {
                log::error!("{}: {}", self.primary.name(), e);
                None
            }
        }
    }

    async fn try_fallback(&self, clip: &AudioClip) -> Option<String> {
        if !self.fallback.is_available() {
            log::debug!("{} is not installed", self.fallback.name());
            return None;
        }
        match self.fallback.recognize(clip).await {
            // Fallback output skips the dash substitutions on purpose.
            Ok(Recognition::Hypothesis(raw)) => non_empty(text::normalize_plain(&raw)),
            Ok(Recognition::Unintelligible) | Ok(Recognition::Unavailable) => None,
            Err(e) => {
                log::error!("{}: {}", self.fallback.name(), e);
                None
            }
        }
    }

    fn load_clip(&self, path: &Path) -> Result<AudioClip, String> {
        let mut source = AudioSource::open(path)?;
        source.calibrate(&self.calibration);
        source.record()
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
