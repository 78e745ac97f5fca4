//! Synthesis voices
//!
//! Oscillators, envelopes, and the per-instrument renderers that turn a
//! planned section into samples.

mod bank;
mod bass;
mod drums;
mod envelope;
mod harmonic;
mod lfo;
mod melody;
mod oscillator;
mod voice;

pub use bank::VoiceBank;
pub use bass::BassVoice;
pub use drums::{DrumVoice, Hit};
pub use envelope::{exp_decay, Adsr, EnvelopeStage};
pub use harmonic::HarmonicVoice;
pub use lfo::Lfo;
pub use melody::MelodyVoice;
pub use oscillator::{Oscillator, Waveform};
pub use voice::{frames_per_beat, looped_spans, section_level, Span, VoiceRenderer};

#[cfg(test)]
pub(crate) fn test_structure(
    prompt: &str,
    seconds: f64,
) -> crate::composition::CompositionStructure {
    use rand::SeedableRng;

    let analysis = crate::analysis::PromptAnalyzer::new().analyze(prompt, None);
    crate::composition::StructureBuilder::new(seconds)
        .build(&analysis, &mut rand_pcg::Pcg32::seed_from_u64(11))
        .expect("positive duration")
}
