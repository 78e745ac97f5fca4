//! End-to-end tests through the public API

use cadence::config::{AudioConfig, EngineConfig};
use cadence::engine::wav::{encode_wav, HEADER_LEN};
use cadence::{export_wav, Engine, Error, GenerateOptions, Instrument, Mood, PromptAnalyzer};
use hound::WavReader;
use std::io::Cursor;

fn engine(sample_rate: u32) -> Engine {
    Engine::new(EngineConfig {
        audio: AudioConfig { sample_rate },
        ..EngineConfig::default()
    })
    .unwrap()
}

#[test]
fn test_ten_seconds_is_within_one_bar() {
    let engine = engine(44100);
    let composition = engine
        .generate("ambient pads", &GenerateOptions::new().duration(10.0).seed(1))
        .unwrap();

    let bar_frames = 4.0 * 60.0 / composition.analysis.tempo as f64 * 44100.0;
    let diff = (composition.frame_count() as f64 - 441_000.0).abs();
    assert!(diff <= bar_frames, "{} frames off", diff);
}

#[test]
fn test_frame_count_tracks_duration_at_many_tempos() {
    let engine = engine(8000);
    for prompt in ["lento", "120 bpm", "fast", "epic", "ultra", "200 bpm"] {
        for duration in [1.0, 7.5, 30.0] {
            let composition = engine
                .generate(prompt, &GenerateOptions::new().duration(duration).seed(2))
                .unwrap();
            let bar_frames = 4.0 * 60.0 / composition.analysis.tempo as f64 * 8000.0;
            let target = duration * 8000.0;
            let diff = (composition.frame_count() as f64 - target).abs();
            assert!(diff <= bar_frames, "{} for {}s: {} frames off", prompt, duration, diff);
        }
    }
}

#[test]
fn test_wav_round_trip() {
    let engine = engine(22050);
    let composition = engine
        .generate("synthwave drums bass", &GenerateOptions::new().duration(5.0).seed(8))
        .unwrap();
    let bytes = export_wav(&composition).unwrap();

    assert_eq!(bytes.len(), HEADER_LEN + composition.frame_count() * 4);
    let reader = WavReader::new(Cursor::new(&bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_rate, 22050);
    assert_eq!(reader.duration() as usize, composition.frame_count());
    let data_len = u32::from_le_bytes([bytes[40], bytes[41], bytes[42], bytes[43]]);
    assert_eq!(data_len as usize, composition.frame_count() * 4);

    // idempotent
    assert_eq!(export_wav(&composition).unwrap(), bytes);
}

#[test]
fn test_same_seed_same_bytes() {
    let engine = engine(8000);
    let options = GenerateOptions::new().duration(6.0).seed(1234);
    let a = engine.generate("epic strings brass", &options).unwrap();
    let b = engine.generate("epic strings brass", &options).unwrap();
    assert_eq!(export_wav(&a).unwrap(), export_wav(&b).unwrap());

    let melodies = |seed: u64| -> Vec<_> {
        let options = GenerateOptions::new().duration(30.0).seed(seed);
        let plan = engine.plan("epic strings brass", &options).unwrap();
        plan.structure
            .sections
            .into_iter()
            .flat_map(|section| section.melody)
            .collect()
    };
    assert_ne!(melodies(1234), melodies(4321));
}

#[test]
fn test_every_instrument_renders() {
    let engine = engine(8000);
    for instrument in Instrument::ALL {
        let options = GenerateOptions::new()
            .duration(4.0)
            .seed(6)
            .instruments(vec![instrument]);
        let composition = engine.generate("", &options).unwrap();
        assert!(composition.buffer.peak() > 0.0, "{} is silent", instrument);
    }
}

#[test]
fn test_output_is_clamped_on_export() {
    let engine = engine(8000);
    let composition = engine
        .generate(
            "aggressive rock guitar drums bass synth brass strings piano",
            &GenerateOptions::new().duration(4.0).seed(9),
        )
        .unwrap();
    let bytes = export_wav(&composition).unwrap();
    let mut reader = WavReader::new(Cursor::new(bytes)).unwrap();
    assert!(reader
        .samples::<i16>()
        .all(|s| s.map(|v| v > i16::MIN).unwrap_or(false)));
}

#[test]
fn test_invalid_requests_fail() {
    let engine = engine(8000);
    assert!(matches!(
        engine.generate("x", &GenerateOptions::new().duration(0.0)),
        Err(Error::InvalidDuration { .. })
    ));
    assert!(matches!(
        encode_wav(&cadence::AudioBuffer::new(0, 8000)),
        Err(Error::EmptyBuffer)
    ));
    assert!(matches!(
        Engine::new(EngineConfig {
            audio: AudioConfig { sample_rate: 250_000 },
            ..EngineConfig::default()
        }),
        Err(Error::UnsupportedSampleRate { .. })
    ));
}

#[test]
fn test_analysis_scenarios() {
    let analyzer = PromptAnalyzer::new();

    let sad = analyzer.analyze("triste piano lento", None);
    assert_eq!(sad.mood, Mood::Sad);
    assert!(sad.tempo <= 90);
    assert!(sad.has_instrument(Instrument::Piano));

    let dance = analyzer.analyze("120 bpm dance synth", None);
    assert_eq!(dance.tempo, 120);

    for prompt in ["", "1000 bpm", "0 bpm", "¿qué?", "HAPPY HAPPY JOY"] {
        let analysis = analyzer.analyze(prompt, None);
        assert!((40..=220).contains(&analysis.tempo));
        assert!(!analysis.instruments.is_empty());
        assert!(Mood::ALL.contains(&analysis.mood));
    }
}
