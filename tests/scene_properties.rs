use approx::assert_abs_diff_eq;
use rstest::rstest;
use solarview::coordinates::cartesian::screen_direction;
use solarview::planetlib::Body;
use solarview::projection::{canvas_center, Hemisphere};
use solarview::scene::{render, Definition, DrawCommand, Role, SystemLayout, PRACTICAL_CLIP_ID};
use solarview::{CelestialObject, Timestamp};
use std::f64::consts::PI;

fn local(offset_hours: i32, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Timestamp {
    Timestamp::from_local(offset_hours * 3600, y, mo, d, h, mi, 0).unwrap()
}

fn texts(scene: &solarview::scene::Scene) -> Vec<String> {
    scene
        .elements
        .iter()
        .filter_map(|e| match &e.command {
            DrawCommand::Text { content, .. } | DrawCommand::TextOnPath { content, .. } => {
                Some(content.clone())
            }
            _ => None,
        })
        .collect()
}

#[test]
fn valentines_noon_faces_the_sun() {
    let when = local(1, 2026, 2, 14, 12, 0);
    let layout = SystemLayout::at(&when);
    let earth = Body::Earth.position_at(&when);

    let facing_sun = earth.rotated(PI);
    assert!(layout.observer_angle.separation(&facing_sun) < 1e-9);

    for wedge in layout.visibility_wedges() {
        let toward_centroid = wedge.centroid() - wedge.anchor;
        let observer = screen_direction(layout.observer_angle.radians());
        assert!(toward_centroid.dot(&observer) > 0.0);
    }

    let (scene, _) = render(&when, Hemisphere::North);
    let labels = texts(&scene);
    for expected in ["1 AU", "5.2 AU", "30.05 AU", "Earth", "Moon", "Saturn"] {
        assert!(labels.iter().any(|t| t == expected), "missing {}", expected);
    }
    assert!(!labels.iter().any(|t| t == "Sun"));
}

#[rstest]
#[case(Hemisphere::North, ["Winter", "Autumn", "Summer", "Spring"])]
#[case(Hemisphere::South, ["Summer", "Spring", "Winter", "Autumn"])]
fn season_labels_follow_hemisphere(#[case] hemisphere: Hemisphere, #[case] expected: [&str; 4]) {
    let (scene, _) = render(&local(0, 2026, 2, 14, 12, 0), hemisphere);
    let seasons: Vec<String> = scene
        .with_role(Role::SeasonLabel)
        .filter_map(|e| match &e.command {
            DrawCommand::TextOnPath { content, .. } => Some(content.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(seasons, expected);
}

#[test]
fn winter_and_summer_differ() {
    let january = local(0, 2024, 1, 1, 12, 0);
    let july = local(0, 2024, 7, 1, 12, 0);

    let earth_jan = SystemLayout::at(&january).earth();
    let earth_jul = SystemLayout::at(&july).earth();
    assert!(earth_jan.angle.separation(&earth_jul.angle) > 2.5);
    assert!((earth_jan.position - earth_jul.position).norm() > 10.0);

    let clip = |when: &Timestamp| {
        let (scene, _) = render(when, Hemisphere::North);
        match scene.definition(PRACTICAL_CLIP_ID) {
            Some(Definition::ClipPath { path, .. }) => path.to_string(),
            other => panic!("missing practical clip: {:?}", other),
        }
    };
    assert_ne!(clip(&january), clip(&july));
}

#[rstest]
#[case(local(0, 1900, 1, 1, 0, 0))]
#[case(local(-5, 2024, 2, 29, 23, 59))]
#[case(local(9, 2026, 2, 14, 12, 0))]
#[case(local(0, 2300, 12, 31, 6, 30))]
fn render_is_deterministic_and_bounded(#[case] when: Timestamp) {
    let (first, first_bounds) = render(&when, Hemisphere::North);
    let (second, second_bounds) = render(&when, Hemisphere::North);
    assert_eq!(first, second);
    assert_eq!(first_bounds, second_bounds);
    assert!(first_bounds.contains(&canvas_center()));
    assert_eq!(first.with_role(Role::Orbit).count(), 8);
    assert_eq!(first.with_role(Role::NeedleTip).count(), 1);
}

#[test]
fn moon_orbits_earth_on_screen() {
    let when = local(0, 2026, 2, 14, 12, 0);
    let (scene, bounds) = render(&when, Hemisphere::North);
    let layout = SystemLayout::at(&when);
    let earth = layout.earth().position;

    match &scene.with_role(Role::MoonOrbit).next().unwrap().command {
        DrawCommand::Circle { center, radius, .. } => {
            assert_eq!(*center, earth);
            assert_eq!(*radius, 22.0);
        }
        other => panic!("unexpected moon orbit {:?}", other),
    }
    assert_abs_diff_eq!((layout.moon.position - earth).norm(), 22.0, epsilon = 1e-9);
    assert!(bounds.min_x <= layout.moon.position.x - 22.0);
    assert!(bounds.max_y >= layout.moon.position.y + 22.0);
}
