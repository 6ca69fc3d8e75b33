//! Load a WAV clip and calibrate for ambient noise.

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::Cursor;
use std::path::Path;

/// Sensitivity constants for ambient-noise calibration.
#[derive(Debug, Clone)]
pub struct CalibrationConfig {
    /// Baseline energy level considered speech.
    pub energy_threshold: f64,
    /// Raise the threshold when the ambient floor is louder than the baseline.
    pub dynamic_energy_threshold: bool,
    /// Seconds of silence that end a phrase.
    pub pause_threshold: f64,
    /// Seconds of leading audio sampled for the ambient floor.
    pub ambient_duration: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            energy_threshold: 300.0,
            dynamic_energy_threshold: true,
            pause_threshold: 0.5,
            ambient_duration: 0.3,
        }
    }
}

/// An in-memory WAV sample ready to hand to a recognition backend.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub wav_bytes: Vec<u8>,
    pub spec: WavSpec,
}

/// A decoded WAV file plus calibration state. One per invocation; the file
/// handle is consumed and closed inside `open`.
pub struct AudioSource {
    samples: Vec<i16>,
    spec: WavSpec,
    energy_threshold: f64,
}

impl AudioSource {
    /// Decode the whole file. 16-bit integer PCM only; sample rate and
    /// channel count are passed through to the backends as-is.
    pub fn open(path: &Path) -> Result<Self, String> {
        let mut reader = WavReader::open(path).map_err(|e| e.to_string())?;
        let spec = reader.spec();
        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(format!(
                "Expected 16-bit PCM, got {}-bit {:?}",
                spec.bits_per_sample, spec.sample_format
            ));
        }

        let samples: Vec<i16> = reader
            .samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?;

        Ok(Self {
            samples,
            spec,
            energy_threshold: CalibrationConfig::default().energy_threshold,
        })
    }

    /// Measure the ambient floor over the leading window and adjust the
    /// energy threshold. This only tunes sensitivity bookkeeping; the
    /// backends see the full clip either way.
    pub fn calibrate(&mut self, config: &CalibrationConfig) {
        self.energy_threshold = config.energy_threshold;

        let frames = (config.ambient_duration * self.spec.sample_rate as f64) as usize;
        let window = (frames * self.spec.channels as usize).min(self.samples.len());
        if window == 0 {
            return;
        }

        let ambient = rms(&self.samples[..window]);
        if config.dynamic_energy_threshold && ambient * 1.5 > self.energy_threshold {
            self.energy_threshold = ambient * 1.5;
        }

        log::debug!(
            "ambient rms {:.1}, energy threshold {:.1}, pause threshold {}s",
            ambient,
            self.energy_threshold,
            config.pause_threshold
        );
    }

    pub fn energy_threshold(&self) -> f64 {
        self.energy_threshold
    }

    /// Capture the entire file as one in-memory WAV sample.
    pub fn record(&self) -> Result<AudioClip, String> {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, self.spec).map_err(|e| e.to_string())?;
        for &s in &self.samples {
            writer.write_sample(s).map_err(|e| e.to_string())?;
        }
        writer.finalize().map_err(|e| e.to_string())?;

        Ok(AudioClip {
            wav_bytes: cursor.into_inner(),
            spec: self.spec,
        })
    }
}

fn rms(samples: &[i16]) -> f64 {
    let sum: f64 = samples.iter().map(|&s| s as f64 * s as f64).sum();
    (sum / samples.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(path: &Path, samples: &[i16]) {
        let mut writer = WavWriter::create(
            path,
            WavSpec {
                channels: 1,
                sample_rate: 16000,
                bits_per_sample: 16,
                sample_format: SampleFormat::Int,
            },
        )
        .unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_open_missing_file_is_err() {
        let result = AudioSource::open(Path::new("/tmp/does_not_exist_stt_helper.wav"));
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_floor_keeps_static_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiet.wav");
        // 0.5 s of near-silence
        write_fixture(&path, &vec![10; 8000]);

        let mut source = AudioSource::open(&path).unwrap();
        source.calibrate(&CalibrationConfig::default());
        assert_eq!(source.energy_threshold(), 300.0);
    }

    #[test]
    fn test_loud_floor_raises_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loud.wav");
        write_fixture(&path, &vec![2000; 8000]);

        let mut source = AudioSource::open(&path).unwrap();
        source.calibrate(&CalibrationConfig::default());
        assert!(source.energy_threshold() > 300.0);
    }

    #[test]
    fn test_dynamic_threshold_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loud.wav");
        write_fixture(&path, &vec![2000; 8000]);

        let config = CalibrationConfig {
            dynamic_energy_threshold: false,
            ..CalibrationConfig::default()
        };
        let mut source = AudioSource::open(&path).unwrap();
        source.calibrate(&config);
        assert_eq!(source.energy_threshold(), 300.0);
    }

    #[test]
    fn test_record_produces_riff_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        write_fixture(&path, &[0, 100, -100, 0]);

        let source = AudioSource::open(&path).unwrap();
        let clip = source.record().unwrap();
        assert_eq!(&clip.wav_bytes[..4], b"RIFF");
        assert_eq!(clip.spec.sample_rate, 16000);
    }

    #[test]
    fn test_empty_clip_calibrates_without_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        write_fixture(&path, &[]);

        let mut source = AudioSource::open(&path).unwrap();
        source.calibrate(&CalibrationConfig::default());
        assert_eq!(source.energy_threshold(), 300.0);
    }
}
