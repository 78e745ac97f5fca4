//! Real-time playback of a finished composition using cpal

use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use super::Composition;

/// Plays one composition at a time on the default output device
pub struct Player {
    stream: Option<Stream>,
    running: Arc<AtomicBool>,
    /// Source frames already sent to the device
    position: Arc<AtomicUsize>,
    frames: usize,
}

impl Player {
    pub fn new() -> Self {
        Self {
            stream: None,
            running: Arc::new(AtomicBool::new(false)),
            position: Arc::new(AtomicUsize::new(0)),
            frames: 0,
        }
    }

    /// Start playing a composition, replacing anything already playing
    pub fn play(&mut self, composition: &Composition) -> Result<()> {
        self.stop();

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No output device available"))?;

        let config = device.default_output_config()?;
        let sample_format = config.sample_format();
        let stream_config: StreamConfig = config.into();

        let samples: Arc<[f32]> = composition.buffer.interleaved().into();
        let source = Source {
            samples,
            source_rate: composition.sample_rate,
        };
        self.frames = composition.frame_count();
        self.position.store(0, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);

        let stream = match sample_format {
            SampleFormat::F32 => self.build_stream::<f32>(&device, &stream_config, source)?,
            SampleFormat::I16 => self.build_stream::<i16>(&device, &stream_config, source)?,
            SampleFormat::U16 => self.build_stream::<u16>(&device, &stream_config, source)?,
            other => return Err(anyhow!("Unsupported sample format {:?}", other)),
        };

        stream.play()?;
        debug!(
            device_rate = stream_config.sample_rate.0,
            channels = stream_config.channels,
            frames = self.frames,
            "playback started"
        );
        self.stream = Some(stream);
        Ok(())
    }

    /// Stop playback immediately
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.stream = None;
    }

    /// Check if currently playing
    pub fn is_playing(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Flag that stops playback when cleared; safe to hand to a signal handler
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    /// Fraction of the composition played so far
    pub fn progress(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        (self.position.load(Ordering::Relaxed) as f64 / self.frames as f64).min(1.0)
    }

    /// Block until playback finishes or is stopped
    pub fn wait(&mut self) {
        while self.is_playing() {
            std::thread::sleep(Duration::from_millis(50));
        }
        self.stream = None;
    }

    fn build_stream<T: cpal::Sample + cpal::SizedSample + cpal::FromSample<f32>>(
        &self,
        device: &Device,
        config: &StreamConfig,
        source: Source,
    ) -> Result<Stream> {
        let channels = config.channels as usize;
        let step = source.source_rate as f64 / config.sample_rate.0 as f64;
        let total = source.samples.len() / 2;
        let running = self.running.clone();
        let position = self.position.clone();
        let mut cursor = 0.0f64;

        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                for frame in data.chunks_mut(channels) {
                    let index = cursor as usize;
                    let playing = running.load(Ordering::Relaxed) && index < total;
                    let (left, right) = if playing {
                        (source.samples[index * 2], source.samples[index * 2 + 1])
                    } else {
                        (0.0, 0.0)
                    };

                    for (ch, out) in frame.iter_mut().enumerate() {
                        let value = match (channels, ch) {
                            (1, _) => (left + right) * 0.5,
                            (_, 0) => left,
                            (_, 1) => right,
                            _ => 0.0,
                        };
                        *out = T::from_sample(value.clamp(-1.0, 1.0));
                    }

                    if playing {
                        cursor += step;
                    }
                }

                let index = (cursor as usize).min(total);
                position.store(index, Ordering::Relaxed);
                if index >= total {
                    running.store(false, Ordering::SeqCst);
                }
            },
            |err| {
                error!("Audio stream error: {}", err);
            },
            None,
        )?;

        Ok(stream)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Interleaved stereo samples shared with the audio thread
struct Source {
    samples: Arc<[f32]>,
    source_rate: u32,
}
