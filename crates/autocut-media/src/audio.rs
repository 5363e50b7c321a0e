//! Decoded audio buffers.
//!
//! Samples are held as mono f32 normalized to `[-1.0, 1.0]`, the form
//! the silence scan operates on. Multi-channel WAVs are down-mixed by
//! averaging interleaved frames.

use std::path::Path;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Full-scale amplitude of 16-bit PCM.
const I16_FULL_SCALE: f32 = 32768.0;

/// A decoded mono audio signal.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Mono samples normalized to `[-1.0, 1.0]`
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Wrap already-decoded mono samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> MediaResult<Self> {
        if sample_rate == 0 {
            return Err(MediaError::audio_decode("sample rate is zero"));
        }
        if samples.is_empty() {
            return Err(MediaError::EmptyAudio);
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Decode a PCM WAV file (16-bit integer or 32-bit float samples).
    pub fn from_wav_path(path: impl AsRef<Path>) -> MediaResult<Self> {
        let path = path.as_ref();
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        debug!(
            path = %path.display(),
            sample_rate = spec.sample_rate,
            channels = spec.channels,
            bits = spec.bits_per_sample,
            "Decoding WAV"
        );

        let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
            (hound::SampleFormat::Int, 16) => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / I16_FULL_SCALE))
                .collect::<Result<_, _>>()?,
            (hound::SampleFormat::Float, 32) => {
                reader.samples::<f32>().collect::<Result<_, _>>()?
            }
            (format, bits) => {
                return Err(MediaError::audio_decode(format!(
                    "unsupported WAV sample format: {format:?} {bits}-bit"
                )))
            }
        };

        if interleaved.is_empty() {
            return Err(MediaError::EmptyAudio);
        }

        let samples = downmix(&interleaved, spec.channels as usize);
        Self::new(samples, spec.sample_rate)
    }

    /// Total duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }

    /// RMS level of a sample range in dBFS.
    ///
    /// A digitally silent range has no defined level and comes back as
    /// negative infinity, which compares below any threshold.
    pub fn level_db(&self, start: usize, end: usize) -> f64 {
        let end = end.min(self.samples.len());
        if start >= end {
            return f64::NEG_INFINITY;
        }

        let window = &self.samples[start..end];
        let sum_sq: f64 = window.iter().map(|&s| (s as f64) * (s as f64)).sum();
        let rms = (sum_sq / window.len() as f64).sqrt();

        if rms <= 0.0 {
            f64::NEG_INFINITY
        } else {
            20.0 * rms.log10()
        }
    }
}

/// Average interleaved channels down to mono.
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_samples() {
        assert!(matches!(
            AudioBuffer::new(Vec::new(), 44_100),
            Err(MediaError::EmptyAudio)
        ));
    }

    #[test]
    fn test_duration_ms() {
        let buffer = AudioBuffer::new(vec![0.1; 44_100], 44_100).unwrap();
        assert_eq!(buffer.duration_ms(), 1000);
    }

    #[test]
    fn test_downmix_stereo() {
        let mono = downmix(&[1.0, 0.0, 0.5, 0.5], 2);
        assert_eq!(mono, vec![0.5, 0.5]);
    }

    #[test]
    fn test_level_db_full_scale_sine_is_near_minus_three() {
        let sample_rate = 8000;
        let samples: Vec<f32> = (0..sample_rate)
            .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sample_rate as f32).sin())
            .collect();
        let buffer = AudioBuffer::new(samples, sample_rate as u32).unwrap();

        // RMS of a full-scale sine is 1/sqrt(2) ~ -3.01 dBFS
        let level = buffer.level_db(0, sample_rate);
        assert!((level - (-3.01)).abs() < 0.1, "level was {level}");
    }

    #[test]
    fn test_level_db_digital_silence() {
        let buffer = AudioBuffer::new(vec![0.0; 1000], 8000).unwrap();
        assert_eq!(buffer.level_db(0, 1000), f64::NEG_INFINITY);
    }

    #[test]
    fn test_wav_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..8000u32 {
            let v = (0.25 * (2.0 * std::f32::consts::PI * 220.0 * i as f32 / 8000.0).sin()
                * I16_FULL_SCALE) as i16;
            writer.write_sample(v).unwrap();
        }
        writer.finalize().unwrap();

        let buffer = AudioBuffer::from_wav_path(&path).unwrap();
        assert_eq!(buffer.sample_rate, 8000);
        assert_eq!(buffer.duration_ms(), 1000);
    }
}
