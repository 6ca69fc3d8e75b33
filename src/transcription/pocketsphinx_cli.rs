//! PocketSphinx CLI fallback backend.

use super::backend::{Recognition, SpeechBackend};
use crate::audio::AudioClip;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

const DEFAULT_BINARY: &str = "pocketsphinx_continuous";

/// Offline engine invoked as a child process. Considered absent rather than
/// broken when the binary is not installed.
pub struct PocketsphinxCliBackend {
    pub binary_path: String,
}

impl PocketsphinxCliBackend {
    pub fn new(binary_path: Option<String>) -> Self {
        Self {
            binary_path: binary_path.unwrap_or_else(|| DEFAULT_BINARY.to_string()),
        }
    }

    /// Read `POCKETSPHINX_BIN` from the environment.
    pub fn from_env() -> Self {
        Self::new(std::env::var("POCKETSPHINX_BIN").ok())
    }

    fn recognize_file(&self, wav_path: &Path) -> Result<Recognition, String> {
        let logfn = if cfg!(windows) { "NUL" } else { "/dev/null" };
        let output = match Command::new(&self.binary_path)
            .arg("-infile")
            .arg(wav_path)
            .arg("-logfn")
            .arg(logfn)
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("pocketsphinx not installed ({})", self.binary_path);
                return Ok(Recognition::Unavailable);
            }
            Err(e) => return Err(format!("Failed to run pocketsphinx: {}", e)),
        };

        if !output.status.success() {
            log::debug!(
                "pocketsphinx exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
            return Ok(Recognition::Unavailable);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let hypothesis = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty());

        match hypothesis {
            Some(text) => Ok(Recognition::Hypothesis(text.to_string())),
            None => Ok(Recognition::Unintelligible),
        }
    }
}

impl SpeechBackend for PocketsphinxCliBackend {
    fn id(&self) -> &'static str {
        "pocketsphinx-cli"
    }

    fn name(&self) -> &'static str {
        "PocketSphinx (CLI)"
    }

    fn is_available(&self) -> bool {
        let binary = Path::new(&self.binary_path);
        if binary.components().count() > 1 {
            return binary.is_file();
        }
        std::env::var_os("PATH")
            .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(binary).is_file()))
            .unwrap_or(false)
    }

    async fn recognize(&self, clip: &AudioClip) -> Result<Recognition, String> {
        // The child process reads from disk, so spill the clip to a temp file
        // that is cleaned up when the guard drops.
        let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
        let wav_path = dir.path().join("clip.wav");
        std::fs::write(&wav_path, &clip.wav_bytes).map_err(|e| e.to_string())?;
        self.recognize_file(&wav_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec};

    fn dummy_clip() -> AudioClip {
        AudioClip {
            wav_bytes: vec![0; 44],
            spec: WavSpec {
                channels: 1,
                sample_rate: 16000,
                bits_per_sample: 16,
                sample_format: SampleFormat::Int,
            },
        }
    }

    #[test]
    fn test_missing_binary_is_not_available() {
        let backend = PocketsphinxCliBackend::new(Some("/nonexistent/pocketsphinx".to_string()));
        assert!(!backend.is_available());
    }

    #[tokio::test]
    async fn test_missing_binary_recognize_is_unavailable() {
        let backend = PocketsphinxCliBackend::new(Some("pocketsphinx_binary_that_does_not_exist".to_string()));
        let result = backend.recognize(&dummy_clip()).await;
        assert_eq!(result, Ok(Recognition::Unavailable));
    }

    #[test]
    fn test_default_binary_name() {
        let backend = PocketsphinxCliBackend::new(None);
        assert_eq!(backend.binary_path, "pocketsphinx_continuous");
    }
}
