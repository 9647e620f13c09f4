use std::f64::consts::TAU;

use approx::assert_abs_diff_eq;
use chart3d::ChartError;
use chart3d::core::timeline::{
    EasingKind, HandleType, ROTATION_GAP_FRAMES, RotationConfig, ScheduleSpec, StageConfig,
    StageSpan, TIMELINE_TAIL_FRAMES, schedule,
};

fn spec() -> ScheduleSpec {
    ScheduleSpec {
        start_frame: 1,
        creation: StageConfig::disabled(),
        explode: StageConfig::disabled(),
        rotation: RotationConfig::default(),
        explode_applicable: true,
    }
}

#[test]
fn creation_stagger_for_three_items() {
    let timeline = schedule(
        3,
        &ScheduleSpec {
            creation: StageConfig::enabled(30, 5),
            ..spec()
        },
    )
    .expect("schedule");

    let spans: Vec<_> = timeline
        .items
        .iter()
        .map(|item| item.creation.expect("creation span"))
        .collect();
    assert_eq!(
        spans,
        [
            StageSpan { start: 1, end: 31 },
            StageSpan { start: 6, end: 36 },
            StageSpan { start: 11, end: 41 },
        ]
    );
    assert_eq!(timeline.max_end_frame, Some(41));
    assert_eq!(timeline.required_end_frame(), Some(41 + TIMELINE_TAIL_FRAMES));
}

#[test]
fn explode_follows_each_items_creation() {
    let timeline = schedule(
        2,
        &ScheduleSpec {
            creation: StageConfig::enabled(10, 2),
            explode: StageConfig::enabled(20, 3).with_delay(4),
            ..spec()
        },
    )
    .expect("schedule");

    // item 1: creation [3, 13], explode from 13 + 4 + 3
    assert_eq!(
        timeline.items[1].explode,
        Some(StageSpan { start: 20, end: 40 })
    );
    assert_eq!(
        timeline.items[0].explode,
        Some(StageSpan { start: 15, end: 35 })
    );
}

#[test]
fn explode_without_creation_anchors_to_start_frame() {
    let timeline = schedule(
        2,
        &ScheduleSpec {
            start_frame: 10,
            explode: StageConfig::enabled(5, 2),
            ..spec()
        },
    )
    .expect("schedule");
    assert_eq!(
        timeline.items[0].explode,
        Some(StageSpan { start: 10, end: 15 })
    );
    assert_eq!(
        timeline.items[1].explode,
        Some(StageSpan { start: 12, end: 17 })
    );
}

#[test]
fn explode_is_skipped_when_not_applicable() {
    let timeline = schedule(
        2,
        &ScheduleSpec {
            explode: StageConfig::enabled(5, 2),
            explode_applicable: false,
            ..spec()
        },
    )
    .expect("schedule");
    assert!(timeline.items.iter().all(|item| item.explode.is_none()));
    assert!(!timeline.is_animated());
    assert_eq!(timeline.required_end_frame(), None);
}

#[test]
fn rotation_starts_after_every_item_stage() {
    let timeline = schedule(
        3,
        &ScheduleSpec {
            creation: StageConfig::enabled(30, 5),
            rotation: RotationConfig::enabled(1.0, 2.0),
            ..spec()
        },
    )
    .expect("schedule");
    let rotation = timeline.rotation.expect("rotation");
    assert_eq!(rotation.start, 41 + ROTATION_GAP_FRAMES);
    assert_eq!(rotation.end, rotation.start + 180);
    assert_eq!(timeline.max_end_frame, Some(rotation.end));
}

#[test]
fn rotation_alone_starts_at_start_frame() {
    let timeline = schedule(
        4,
        &ScheduleSpec {
            start_frame: 7,
            rotation: RotationConfig::enabled(2.0, -4.0),
            ..spec()
        },
    )
    .expect("schedule");
    assert_eq!(
        timeline.rotation,
        Some(StageSpan { start: 7, end: 187 })
    );
}

#[test]
fn zero_rotation_speed_is_one_frame() {
    let rotation = RotationConfig::enabled(3.0, 0.0);
    assert_eq!(rotation.duration(), 1);
    let timeline = schedule(
        1,
        &ScheduleSpec {
            rotation,
            ..spec()
        },
    )
    .expect("schedule");
    assert_eq!(timeline.rotation, Some(StageSpan { start: 1, end: 2 }));
}

#[test]
fn fast_rotation_still_lasts_one_frame() {
    let rotation = RotationConfig::enabled(0.001, 90.0);
    assert_eq!(rotation.duration(), 1);
    let timeline = schedule(
        1,
        &ScheduleSpec {
            rotation,
            ..spec()
        },
    )
    .expect("schedule");
    assert_eq!(timeline.rotation, Some(StageSpan { start: 1, end: 2 }));
}

#[test]
fn slow_rotation_past_frame_range_is_rejected() {
    let err = schedule(
        3,
        &ScheduleSpec {
            rotation: RotationConfig::enabled(1.0, 1e-18),
            ..spec()
        },
    )
    .expect_err("overflowing rotation");
    assert!(matches!(err, ChartError::InvalidConfig(_)), "{err}");
}

#[test]
fn huge_creation_offset_is_rejected() {
    let err = schedule(
        3,
        &ScheduleSpec {
            creation: StageConfig::enabled(30, i64::MAX / 2),
            ..spec()
        },
    )
    .expect_err("overflowing stagger");
    assert!(matches!(err, ChartError::InvalidConfig(_)), "{err}");
}

#[test]
fn end_frame_without_room_for_the_tail_is_rejected() {
    let err = schedule(
        1,
        &ScheduleSpec {
            start_frame: i64::MAX - 40,
            creation: StageConfig::enabled(30, 0),
            ..spec()
        },
    )
    .expect_err("no room for tail");
    assert!(matches!(err, ChartError::InvalidConfig(_)), "{err}");
}

#[test]
fn rotation_angle_follows_speed_sign() {
    assert_abs_diff_eq!(RotationConfig::enabled(1.0, 2.0).total_angle(), TAU);
    assert_abs_diff_eq!(RotationConfig::enabled(2.0, -1.0).total_angle(), -2.0 * TAU);
}

#[test]
fn nothing_enabled_means_no_horizon() {
    let timeline = schedule(5, &spec()).expect("schedule");
    assert_eq!(timeline.items.len(), 5);
    assert!(timeline.rotation.is_none());
    assert_eq!(timeline.max_end_frame, None);
}

#[test]
fn only_linear_uses_vector_handles() {
    assert_eq!(EasingKind::Linear.handle_type(), HandleType::Vector);
    for easing in [
        EasingKind::Bezier,
        EasingKind::Sine,
        EasingKind::Quad,
        EasingKind::Cubic,
        EasingKind::Expo,
        EasingKind::Back,
        EasingKind::Bounce,
        EasingKind::Elastic,
    ] {
        assert_eq!(easing.handle_type(), HandleType::AutoClamped);
    }
}

#[test]
fn every_easing_hits_its_endpoints() {
    for easing in [
        EasingKind::Linear,
        EasingKind::Bezier,
        EasingKind::Sine,
        EasingKind::Quad,
        EasingKind::Cubic,
        EasingKind::Expo,
        EasingKind::Back,
        EasingKind::Bounce,
        EasingKind::Elastic,
    ] {
        assert_abs_diff_eq!(easing.sample(0.0), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(easing.sample(1.0), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(easing.sample(0.5), 0.5, epsilon = 1e-9);
    }
}
