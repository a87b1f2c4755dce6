use super::*;
use crate::foundation::core::Rgba8Premul;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 4,
        height: 2,
        fps: Fps::default(),
    }
}

#[test]
fn in_memory_sink_keeps_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    let f = FrameRGBA::new(4, 2, Rgba8Premul::opaque(1, 2, 3));
    sink.push_frame(FrameIndex(0), &f).unwrap();
    sink.push_frame(FrameIndex(1), &f).unwrap();
    sink.end().unwrap();

    assert!(sink.is_ended());
    assert_eq!(sink.config(), Some(cfg()));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1]);

    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
}

#[test]
fn png_sequence_names_frames_and_round_trips_pixels() {
    let dir = std::path::PathBuf::from("target").join("unit_png_sequence");
    let _ = std::fs::remove_dir_all(&dir);

    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg()).unwrap();
    let half = Rgba8Premul::from_straight_rgba(200, 100, 50, 128);
    let f = FrameRGBA::new(4, 2, half);
    sink.push_frame(FrameIndex(7), &f).unwrap();
    sink.end().unwrap();

    let path = dir.join("frame_00007.png");
    assert_eq!(sink.written(), &[path.clone()]);
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 2));
    let px = img.get_pixel(0, 0).0;
    assert_eq!(px[3], 128);
    assert!(px[0].abs_diff(200) <= 2);
    assert!(px[1].abs_diff(100) <= 2);
}

#[test]
fn png_sequence_rejects_empty_size() {
    let mut sink = PngSequenceSink::new("target/unit_png_empty");
    let bad = SinkConfig {
        width: 0,
        ..cfg()
    };
    assert!(sink.begin(bad).is_err());
}
