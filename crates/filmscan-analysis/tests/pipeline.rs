//! End-to-end pipeline tests over synthetic in-memory videos.

use filmscan_analysis::signals::{MotionExtractor, SignalExtractor};
use filmscan_analysis::{run_analysis, Pipeline};
use filmscan_media::{FrameFeatures, FrameSample, MemoryFrameSource, FrameSource};
use filmscan_models::{AnalysisConfig, Scene, SignalKind, SignalSample, VideoInfo};

fn info(duration: f64) -> VideoInfo {
    VideoInfo {
        duration,
        width: 320,
        height: 180,
        fps: 25.0,
        codec: "h264".to_string(),
        size: 0,
        bitrate: 0,
    }
}

/// Append `seconds` worth of 1 fps solid frames starting where the clip
/// currently ends.
fn push_solid(frames: &mut Vec<FrameSample>, seconds: usize, rgb: [u8; 3]) {
    let start = frames.len();
    for i in 0..seconds {
        frames.push(FrameSample::solid((start + i) as f64, 32, 18, rgb));
    }
}

/// Base test configuration: edge heuristics off so synthetic static
/// scenes aren't swallowed as intro/outro.
fn test_config() -> AnalysisConfig {
    AnalysisConfig {
        boundary_scene_count: 0,
        ..Default::default()
    }
}

#[test]
fn test_hard_cut_yields_two_scenes() {
    let mut frames = Vec::new();
    push_solid(&mut frames, 5, [0, 0, 255]);
    push_solid(&mut frames, 5, [255, 0, 0]);
    let mut source = MemoryFrameSource::new(info(10.0), frames);

    let report = run_analysis(&mut source, test_config()).unwrap();

    assert_eq!(report.scenes.len(), 2);
    assert!((report.scenes[0].start - 0.0).abs() < 1e-9);
    assert!((report.scenes[0].end - 5.0).abs() < 1e-9);
    assert!((report.scenes[1].start - 5.0).abs() < 1e-9);
    assert!((report.scenes[1].end - 10.0).abs() < 1e-9);
}

#[test]
fn test_static_video_is_one_scene_with_no_highlights() {
    let mut frames = Vec::new();
    push_solid(&mut frames, 20, [120, 120, 120]);
    let mut source = MemoryFrameSource::new(info(20.0), frames);

    let report = run_analysis(&mut source, test_config()).unwrap();

    assert_eq!(report.scenes.len(), 1);
    assert!((report.scenes[0].start - 0.0).abs() < 1e-9);
    assert!((report.scenes[0].end - 20.0).abs() < 1e-9);
    assert!(
        report.highlights.is_empty(),
        "a featureless video has no interest peaks"
    );
}

#[test]
fn test_scene_partition_is_gapless_and_ordered() {
    let mut frames = Vec::new();
    push_solid(&mut frames, 7, [200, 40, 40]);
    push_solid(&mut frames, 4, [40, 200, 40]);
    push_solid(&mut frames, 9, [40, 40, 200]);
    push_solid(&mut frames, 5, [200, 200, 40]);
    let mut source = MemoryFrameSource::new(info(25.0), frames);

    let report = run_analysis(&mut source, test_config()).unwrap();

    assert!((report.scenes[0].start - 0.0).abs() < 1e-9);
    for pair in report.scenes.windows(2) {
        assert!(
            (pair[0].end - pair[1].start).abs() < 1e-9,
            "partition must have no gaps"
        );
        assert!(pair[0].start < pair[1].start, "starts must be ascending");
    }
    assert!((report.scenes.last().unwrap().end - 25.0).abs() < 1e-9);
}

#[test]
fn test_repeated_segment_is_excluded_from_highlights() {
    // Identical gray bookends around a vivid middle: the bookends match
    // each other non-adjacently and are classified advertisement, so the
    // only highlight comes from the middle scene.
    let mut frames = Vec::new();
    push_solid(&mut frames, 20, [120, 120, 120]);
    push_solid(&mut frames, 10, [255, 0, 0]);
    push_solid(&mut frames, 20, [120, 120, 120]);
    let mut source = MemoryFrameSource::new(info(50.0), frames);

    let mut config = test_config();
    config.signal_weights.insert(SignalKind::Motion, 0.0);
    config.signal_weights.insert(SignalKind::Presence, 0.0);
    let report = run_analysis(&mut source, config).unwrap();

    let kinds: Vec<&str> = report
        .scenes
        .iter()
        .map(|s| s.kind.as_str())
        .collect();
    assert_eq!(kinds, vec!["advertisement", "main-content", "advertisement"]);

    assert_eq!(report.highlights.len(), 1);
    let clip = &report.highlights[0];
    assert!(clip.start >= 20.0 - 1e-9 && clip.end <= 30.0 + 1e-9);
    assert!(clip.signals.contains_key(&SignalKind::Color));
}

#[test]
fn test_duration_limit_caps_analysis() {
    let mut frames = Vec::new();
    push_solid(&mut frames, 50, [120, 120, 120]);
    let mut source = MemoryFrameSource::new(info(50.0), frames);

    let mut config = test_config();
    config.duration_limit = 10.0;
    let report = run_analysis(&mut source, config).unwrap();

    assert!((report.scenes.last().unwrap().end - 10.0).abs() < 1e-9);
}

#[test]
fn test_identical_input_yields_identical_report() {
    let build = || {
        let mut frames = Vec::new();
        push_solid(&mut frames, 10, [120, 120, 120]);
        push_solid(&mut frames, 10, [255, 0, 0]);
        push_solid(&mut frames, 10, [40, 40, 200]);
        MemoryFrameSource::new(info(30.0), frames)
    };

    let first = run_analysis(&mut build(), test_config())
        .unwrap()
        .to_json()
        .unwrap();
    let second = run_analysis(&mut build(), test_config())
        .unwrap()
        .to_json()
        .unwrap();
    assert_eq!(first, second);
}

/// Extractor that cannot run, standing in for a missing detector backend.
struct OfflineDetector;

impl SignalExtractor for OfflineDetector {
    fn kind(&self) -> SignalKind {
        SignalKind::Presence
    }

    fn available(&self) -> bool {
        false
    }

    fn extract(&self, _: &Scene, _: &[FrameFeatures]) -> Vec<SignalSample> {
        Vec::new()
    }
}

#[test]
fn test_unavailable_extractor_degrades_gracefully() {
    let mut frames = Vec::new();
    push_solid(&mut frames, 10, [120, 120, 120]);
    push_solid(&mut frames, 10, [255, 0, 0]);
    let mut source = MemoryFrameSource::new(info(20.0), frames);

    let extractors: Vec<Box<dyn SignalExtractor>> =
        vec![Box::new(MotionExtractor), Box::new(OfflineDetector)];
    let report = Pipeline::new(test_config())
        .with_extractors(extractors)
        .run(&mut source)
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    let warning_kinds: Vec<&str> = json["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|w| w["kind"].as_str())
        .collect();
    assert!(warning_kinds.contains(&"extractor_unavailable"));
}

#[test]
fn test_memory_source_reports_video_summary() {
    let mut frames = Vec::new();
    push_solid(&mut frames, 5, [120, 120, 120]);
    let source = MemoryFrameSource::new(info(5.0), frames);
    assert_eq!(source.info().resolution(), "320x180");

    let mut source = source;
    let report = run_analysis(&mut source, test_config()).unwrap();
    assert_eq!(report.video_info.resolution, "320x180");
    assert!((report.video_info.duration - 5.0).abs() < 1e-9);
}
