//! Instrument to renderer dispatch

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use super::bass::BassVoice;
use super::drums::DrumVoice;
use super::harmonic::HarmonicVoice;
use super::melody::MelodyVoice;
use super::voice::VoiceRenderer;
use crate::analysis::Instrument;
use crate::buffer::StereoSliceMut;
use crate::composition::{CompositionStructure, Section};
use crate::error::{Error, Result};

/// Set of renderers keyed by instrument
#[derive(Default)]
pub struct VoiceBank {
    voices: HashMap<Instrument, Box<dyn VoiceRenderer>>,
}

impl VoiceBank {
    /// Empty bank
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank with a renderer for every known instrument
    pub fn standard() -> Self {
        Self::new()
            .with(Instrument::Synth, MelodyVoice::synth())
            .with(Instrument::Guitar, MelodyVoice::guitar())
            .with(Instrument::Brass, MelodyVoice::brass())
            .with(Instrument::Drums, DrumVoice::new())
            .with(Instrument::Bass, BassVoice::new())
            .with(Instrument::Piano, HarmonicVoice::piano())
            .with(Instrument::Strings, HarmonicVoice::strings())
    }

    /// Register (or replace) the renderer for an instrument
    pub fn with<V: VoiceRenderer + 'static>(mut self, instrument: Instrument, voice: V) -> Self {
        self.voices.insert(instrument, Box::new(voice));
        self
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// Renderer for an instrument
    pub fn get(&self, instrument: Instrument) -> Result<&dyn VoiceRenderer> {
        self.voices
            .get(&instrument)
            .map(|v| v.as_ref())
            .ok_or_else(|| {
                Error::invalid_config(format!("no renderer for instrument '{}'", instrument))
            })
    }

    /// Renderer for an instrument identifier such as `"piano"`
    pub fn resolve(&self, id: &str) -> Result<&dyn VoiceRenderer> {
        self.get(id.parse()?)
    }

    /// Render every instrument of a section into its frame range.
    ///
    /// All instruments are resolved before any sample is written, so a
    /// failure leaves `out` untouched.
    pub fn render_section(
        &self,
        section: &Section,
        structure: &CompositionStructure,
        sample_rate: u32,
        out: &mut StereoSliceMut<'_>,
    ) -> Result<()> {
        let voices = section
            .instruments
            .iter()
            .map(|&instrument| self.get(instrument))
            .collect::<Result<Vec<_>>>()?;

        if section.is_empty() || out.is_empty() {
            return Ok(());
        }

        for voice in voices {
            voice.render(section, structure, sample_rate, out);
        }

        debug!(
            section = %section.kind,
            bars = section.bars,
            frames = out.len(),
            layers = section.instruments.len(),
            "rendered section"
        );
        Ok(())
    }
}

impl fmt::Debug for VoiceBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.voices.values().map(|v| v.name()).collect();
        names.sort_unstable();
        f.debug_struct("VoiceBank").field("voices", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::AudioBuffer;
    use crate::synth::test_structure;

    #[test]
    fn test_standard_bank_covers_every_instrument() {
        let bank = VoiceBank::standard();
        assert_eq!(bank.len(), Instrument::ALL.len());
        for instrument in Instrument::ALL {
            assert_eq!(bank.get(instrument).unwrap().name(), instrument.name());
        }
    }

    #[test]
    fn test_resolve_by_name() {
        let bank = VoiceBank::standard();
        assert_eq!(bank.resolve("Piano").unwrap().name(), "piano");
        assert!(matches!(
            bank.resolve("kazoo"),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_missing_renderer_is_an_error() {
        let bank = VoiceBank::new().with(Instrument::Drums, DrumVoice::new());
        assert!(bank.get(Instrument::Drums).is_ok());
        assert!(matches!(
            bank.get(Instrument::Piano),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_failed_section_writes_nothing() {
        let structure = test_structure("piano drums", 8.0);
        let bank = VoiceBank::new().with(Instrument::Piano, HarmonicVoice::piano());
        let mut buffer = AudioBuffer::new(structure.section_ranges(8000)[1].len(), 8000);

        let result = bank.render_section(
            &structure.sections[1],
            &structure,
            8000,
            &mut buffer.as_slice_mut(),
        );
        assert!(result.is_err());
        assert_eq!(buffer.peak(), 0.0);
    }

    #[test]
    fn test_render_section_layers_add() {
        let structure = test_structure("piano", 8.0);
        let len = structure.section_ranges(8000)[1].len();
        let bank = VoiceBank::standard();

        let mut single = AudioBuffer::new(len, 8000);
        bank.render_section(&structure.sections[1], &structure, 8000, &mut single.as_slice_mut())
            .unwrap();

        let mut doubled_section = structure.sections[1].clone();
        doubled_section.instruments.push(Instrument::Piano);
        let mut doubled = AudioBuffer::new(len, 8000);
        bank.render_section(&doubled_section, &structure, 8000, &mut doubled.as_slice_mut())
            .unwrap();

        assert!((doubled.peak() - 2.0 * single.peak()).abs() < 1e-5);
    }
}
