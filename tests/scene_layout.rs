// Scene-data authoring: sequential frame layout, the wire shape the external
// renderer expects, and overlap validation.

use ai_news_relay::scene::{QuickItem, SceneKind, ScriptBuilder, VideoScript};

fn quick_item(rank: u32, ms: u32) -> QuickItem {
    QuickItem {
        rank,
        title: format!("quick title {rank}"),
        text: format!("quick script {rank}"),
        duration_ms: ms,
    }
}

#[test]
fn scenes_are_laid_out_back_to_back() {
    let mut b = ScriptBuilder::new(30);
    b.opening("大家好", "assets/audio/opening.mp3", 10_000)
        .detailed(1, 1, "Top story", "script", "key point", "GitHub Trending", 45_000)
        .quick(vec![quick_item(4, 20_000), quick_item(5, 20_000)])
        .closing("明天见", "assets/audio/closing.mp3", 8_000);
    let script = b.build("2026-08-31");

    assert_eq!(script.fps, 30);
    assert_eq!(script.scenes.len(), 4);

    // 10s -> 300 frames, 45s -> 1350, 40s -> 1200, 8s -> 240
    let starts: Vec<u32> = script.scenes.iter().map(|s| s.start_frame).collect();
    assert_eq!(starts, vec![0, 300, 1650, 2850]);
    assert_eq!(script.total_frames, 3090);
    script.validate().expect("builder output always validates");
}

#[test]
fn quick_scene_sums_item_durations_and_audio_files() {
    let mut b = ScriptBuilder::default();
    b.quick(vec![quick_item(4, 15_000), quick_item(5, 25_000)]);
    let script = b.build("2026-08-31");

    let scene = &script.scenes[0];
    assert_eq!(scene.duration_ms, 40_000);
    match &scene.kind {
        SceneKind::Quick { items, audio_files } => {
            assert_eq!(items.len(), 2);
            assert_eq!(
                audio_files,
                &vec![
                    "assets/audio/quick_1.mp3".to_string(),
                    "assets/audio/quick_2.mp3".to_string()
                ]
            );
        }
        other => panic!("expected quick scene, got {other:?}"),
    }
}

#[test]
fn empty_quick_list_adds_no_scene() {
    let mut b = ScriptBuilder::default();
    b.opening("hi", "a.mp3", 1_000).quick(Vec::new());
    let script = b.build("2026-08-31");
    assert_eq!(script.scenes.len(), 1);
}

#[test]
fn wire_shape_uses_type_tags_and_camel_case() {
    let mut b = ScriptBuilder::new(30);
    b.opening("口播", "assets/audio/opening.mp3", 10_000).detailed(
        1,
        1,
        "标题",
        "口播稿",
        "亮点",
        "GitHub Trending",
        30_000,
    );
    let script = b.build("2026-08-31");

    let json = serde_json::to_value(&script).unwrap();
    assert_eq!(json["totalFrames"], 1200);
    assert_eq!(json["scenes"][0]["type"], "opening");
    assert_eq!(json["scenes"][0]["startFrame"], 0);
    assert_eq!(json["scenes"][0]["durationFrames"], 300);
    assert_eq!(json["scenes"][0]["audioFile"], "assets/audio/opening.mp3");
    assert_eq!(json["scenes"][1]["type"], "detailed");
    assert_eq!(json["scenes"][1]["keyPoint"], "亮点");
    assert_eq!(json["scenes"][1]["audioFile"], "assets/audio/detailed_1.mp3");

    // And back in: the tag selects the variant.
    let parsed: VideoScript = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, script);
}

#[test]
fn overlapping_scenes_fail_validation() {
    let mut b = ScriptBuilder::new(30);
    b.opening("a", "a.mp3", 10_000).closing("b", "b.mp3", 5_000);
    let mut script = b.build("2026-08-31");

    script.scenes[1].start_frame = 100; // overlaps the 300-frame opening
    let err = script.validate().unwrap_err();
    assert!(err.to_string().contains("starts at frame"));
}

#[test]
fn scenes_past_total_frames_fail_validation() {
    let mut b = ScriptBuilder::new(30);
    b.opening("a", "a.mp3", 10_000);
    let mut script = b.build("2026-08-31");

    script.total_frames = 100;
    assert!(script.validate().is_err());
}
