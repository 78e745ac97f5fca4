//! WAV export
//!
//! Encodes a stereo buffer as 16-bit PCM RIFF/WAVE: a 44-byte header
//! followed by interleaved little-endian samples.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;
use std::path::Path;

use super::Composition;
use crate::buffer::AudioBuffer;
use crate::error::{Error, Result};

/// MIME type of exported audio
pub const WAV_MIME: &str = "audio/wav";

/// Size of the canonical PCM header in bytes
pub const HEADER_LEN: usize = 44;

const CHANNELS: u16 = 2;
const BITS_PER_SAMPLE: u16 = 16;
const BYTES_PER_FRAME: usize = (CHANNELS * BITS_PER_SAMPLE / 8) as usize;

/// Output format for a sample rate
pub fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

/// Float sample to 16-bit PCM, clamped to full scale
#[inline]
pub fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Expected encoded size for a number of frames
pub fn encoded_len(frames: usize) -> usize {
    HEADER_LEN + frames * BYTES_PER_FRAME
}

/// Encode a buffer as WAV bytes
pub fn encode_wav(buffer: &AudioBuffer) -> Result<Vec<u8>> {
    if buffer.is_empty() {
        return Err(Error::EmptyBuffer);
    }

    let mut cursor = Cursor::new(Vec::with_capacity(encoded_len(buffer.frames())));
    let mut writer = WavWriter::new(&mut cursor, wav_spec(buffer.sample_rate()))?;
    for (&left, &right) in buffer.left().iter().zip(buffer.right()) {
        writer.write_sample(to_pcm16(left))?;
        writer.write_sample(to_pcm16(right))?;
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}

/// Encode a composition as WAV bytes (`audio/wav`)
pub fn export_wav(composition: &Composition) -> Result<Vec<u8>> {
    encode_wav(&composition.buffer)
}

/// Encode a composition and write it to `path`
pub fn save_wav(composition: &Composition, path: &Path) -> Result<()> {
    let bytes = export_wav(composition)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;
    use tempfile::tempdir;

    fn ramp(frames: usize, sample_rate: u32) -> AudioBuffer {
        let left: Vec<f32> = (0..frames).map(|i| i as f32 / frames as f32).collect();
        let right: Vec<f32> = left.iter().map(|s| -s).collect();
        AudioBuffer::from_channels(left, right, sample_rate)
    }

    #[test]
    fn test_header_layout() {
        let bytes = encode_wav(&ramp(100, 22050)).unwrap();
        assert_eq!(bytes.len(), encoded_len(100));
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        // PCM, 2 channels, 22050 Hz, 16-bit
        assert_eq!(u16::from_le_bytes([bytes[20], bytes[21]]), 1);
        assert_eq!(u16::from_le_bytes([bytes[22], bytes[23]]), 2);
        assert_eq!(
            u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]),
            22050
        );
        assert_eq!(u16::from_le_bytes([bytes[34], bytes[35]]), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(
            u32::from_le_bytes([bytes[40], bytes[41], bytes[42], bytes[43]]),
            400
        );
    }

    #[test]
    fn test_round_trip_with_reader() {
        let buffer = ramp(256, 44100);
        let bytes = encode_wav(&buffer).unwrap();

        let mut reader = WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(reader.duration(), 256);

        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 512);
        assert_eq!(samples[0], 0);
        assert_eq!(samples[2], to_pcm16(buffer.left()[1]));
        assert_eq!(samples[3], to_pcm16(buffer.right()[1]));
    }

    #[test]
    fn test_clamping() {
        assert_eq!(to_pcm16(2.0), 32767);
        assert_eq!(to_pcm16(-2.0), -32767);
        assert_eq!(to_pcm16(0.0), 0);
        assert_eq!(to_pcm16(0.5), 16383);
    }

    #[test]
    fn test_empty_buffer_rejected() {
        let empty = AudioBuffer::new(0, 44100);
        assert!(matches!(encode_wav(&empty), Err(Error::EmptyBuffer)));
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let buffer = ramp(1000, 8000);
        assert_eq!(encode_wav(&buffer).unwrap(), encode_wav(&buffer).unwrap());
    }

    #[test]
    fn test_save_wav() {
        use crate::config::{AudioConfig, EngineConfig};
        use crate::engine::{Engine, GenerateOptions};

        let engine = Engine::new(EngineConfig {
            audio: AudioConfig { sample_rate: 8000 },
            ..EngineConfig::default()
        })
        .unwrap();
        let composition = engine
            .generate("calm piano", &GenerateOptions::new().duration(3.0).seed(4))
            .unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join(composition.suggested_filename());
        save_wav(&composition, &path).unwrap();

        let reader = WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 8000);
        assert_eq!(reader.duration() as usize, composition.frame_count());
        assert_eq!(
            std::fs::metadata(&path).unwrap().len() as usize,
            encoded_len(composition.frame_count())
        );
    }
}
