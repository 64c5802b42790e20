//! Scene assembly for the solar view
//!
//! [`render`] turns an instant and a hemisphere into a declarative [`Scene`]:
//! a handful of reusable definitions (clip regions, label arcs) and an ordered
//! list of draw commands. Nothing here touches a drawing surface; backends
//! such as [`svg`] walk the command list front to back.
//!
//! Command order is significant. Later commands paint over earlier ones:
//!
//! 1. day/night visibility shading
//! 2. season quadrant dividers
//! 3. season labels
//! 4. orbit rings with distance labels
//! 5. the Sun
//! 6. planets (Saturn's ring between its body and its label)
//! 7. the Moon's orbit around Earth
//! 8. the Moon
//! 9. the observer needle and its tip dot

pub mod bounds;
pub mod svg;

pub use bounds::SceneBounds;

use crate::coordinates::{AngularPosition, ScreenPoint};
use crate::planetlib::{self, Body, CelestialBodyConstant, MOON, PLANETS, SUN};
use crate::projection::{
    au_to_radius, canvas_center, observer_angle, orbit_point, season_arcs, surface_point,
    Hemisphere, PathData, VisibilityWedge, CENTER, MAX_RADIUS, VIEW_SIZE,
};
use crate::projection::wedge::{HEMISPHERE_HALF_ANGLE_DEG, PRACTICAL_HALF_ANGLE_DEG};
use crate::celestial::CelestialObject;
use crate::coordinates::polar_offset;
use crate::time::Timestamp;
use nalgebra::Point2;
use serde::Serialize;

const ORBIT_COLOR: &str = "rgba(255, 255, 255, 0.12)";
const LABEL_COLOR: &str = "rgba(255, 255, 255, 0.5)";
const BODY_LABEL_COLOR: &str = "#ffffff";
const DAY_OVERLAY: &str = "rgba(255, 255, 255, 0.04)";
const NEEDLE_COLOR: &str = "rgba(255, 255, 255, 0.7)";
const SEASON_LINE_COLOR: &str = "rgba(255, 255, 255, 0.25)";
const SEASON_LABEL_COLOR: &str = "rgba(255, 255, 255, 0.5)";

const ORBIT_DASH: &str = "5, 5";
const SEASON_DASH: &str = "4, 6";
const MOON_ORBIT_DASH: &str = "2, 3";

const SEASON_FONT_SIZE: f64 = 20.0;
const BODY_FONT_SIZE: f64 = 11.0;
const AU_FONT_SIZE: f64 = 9.0;

/// Gap between a body's rim and its label baseline
const LABEL_GAP: f64 = 6.0;
/// Vertical footprint of a label above its body, for bounds
const LABEL_FOOTPRINT: f64 = 17.0;
/// AU labels sit this far outside their ring
const AU_LABEL_OFFSET: f64 = 8.0;
/// and this far right of the vertical season divider
const AU_LABEL_INDENT: f64 = 5.0;
/// Shading overlay reaches just past the outermost orbit
const OVERLAY_RADIUS: f64 = MAX_RADIUS + 30.0;
/// Moon distance from Earth in pixels; its true AU offset would be invisible
pub const MOON_PIXEL_OFFSET: f64 = 22.0;
const SATURN_RING_STROKE: f64 = 4.0;
const NEEDLE_TIP_RADIUS: f64 = 2.0;

pub const VISIBLE_CLIP_ID: &str = "sky-visible";
pub const PRACTICAL_CLIP_ID: &str = "sky-practical";

/// What a scene element depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "role", content = "body", rename_all = "kebab-case")]
pub enum Role {
    DayShade,
    SeasonDivider,
    SeasonLabel,
    Orbit,
    OrbitLabel,
    Body(Body),
    BodyLabel(Body),
    SaturnRing,
    MoonOrbit,
    Needle,
    NeedleTip,
}

impl Role {
    /// Stable kebab-case name, used as a CSS class by backends
    pub fn class_name(&self) -> &'static str {
        match self {
            Role::DayShade => "day-shade",
            Role::SeasonDivider => "season-divider",
            Role::SeasonLabel => "season-label",
            Role::Orbit => "orbit",
            Role::OrbitLabel => "orbit-label",
            Role::Body(_) => "body",
            Role::BodyLabel(_) => "body-label",
            Role::SaturnRing => "saturn-ring",
            Role::MoonOrbit => "moon-orbit",
            Role::Needle => "needle",
            Role::NeedleTip => "needle-tip",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub dash: Option<String>,
    pub round_cap: bool,
}

impl Stroke {
    fn solid(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash: None,
            round_cap: false,
        }
    }

    fn dashed(color: &str, width: f64, dash: &str) -> Self {
        Self {
            dash: Some(dash.to_string()),
            ..Self::solid(color, width)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
}

/// Reusable, non-drawing scene content
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Definition {
    ClipPath { id: String, path: PathData },
    LabelPath { id: String, path: PathData },
}

impl Definition {
    pub fn id(&self) -> &str {
        match self {
            Definition::ClipPath { id, .. } | Definition::LabelPath { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Circle {
        center: ScreenPoint,
        radius: f64,
        fill: Option<String>,
        stroke: Option<Stroke>,
        clip: Option<String>,
    },
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        stroke: Stroke,
    },
    Text {
        position: ScreenPoint,
        content: String,
        font_size: f64,
        color: String,
        anchor: TextAnchor,
    },
    TextOnPath {
        path_id: String,
        content: String,
        font_size: f64,
        color: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneElement {
    #[serde(flatten)]
    pub role: Role,
    pub command: DrawCommand,
}

/// A complete, backend-independent description of one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// Side length of the square canvas
    pub size: f64,
    pub definitions: Vec<Definition>,
    /// Back to front
    pub elements: Vec<SceneElement>,
}

impl Scene {
    fn new() -> Self {
        Self {
            size: VIEW_SIZE,
            definitions: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn definition(&self, id: &str) -> Option<&Definition> {
        self.definitions.iter().find(|d| d.id() == id)
    }

    /// Elements with the given role, in drawing order
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &SceneElement> {
        self.elements.iter().filter(move |e| e.role == role)
    }

    /// Index of the first element with the given role
    pub fn position_of(&self, role: Role) -> Option<usize> {
        self.elements.iter().position(|e| e.role == role)
    }
}

/// Where every body lands on the canvas at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemLayout {
    pub planets: Vec<PlacedBody>,
    pub moon: PlacedBody,
    pub observer_angle: AngularPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedBody {
    pub body: Body,
    pub angle: AngularPosition,
    pub position: ScreenPoint,
}

impl SystemLayout {
    /// Compute body placements for an instant
    pub fn at(ts: &Timestamp) -> Self {
        let planets: Vec<PlacedBody> = PLANETS
            .iter()
            .map(|planet| {
                let angle = planet.position_at(ts);
                PlacedBody {
                    body: planet.body,
                    angle,
                    position: orbit_point(au_to_radius(planet.distance_au), angle),
                }
            })
            .collect();

        let earth = Self::find(&planets, Body::Earth);
        let moon_angle = planetlib::moon_position(ts);
        let moon = PlacedBody {
            body: Body::Moon,
            angle: moon_angle,
            position: polar_offset(earth.position, MOON_PIXEL_OFFSET, moon_angle.radians()),
        };
        let observer = observer_angle(earth.angle, ts);

        Self {
            planets,
            moon,
            observer_angle: observer,
        }
    }

    fn find(planets: &[PlacedBody], body: Body) -> PlacedBody {
        // PLANETS always contains every planet
        planets
            .iter()
            .copied()
            .find(|p| p.body == body)
            .unwrap_or(PlacedBody {
                body,
                angle: AngularPosition::ZERO,
                position: canvas_center(),
            })
    }

    pub fn earth(&self) -> PlacedBody {
        Self::find(&self.planets, Body::Earth)
    }

    pub fn planet(&self, body: Body) -> Option<PlacedBody> {
        self.planets.iter().copied().find(|p| p.body == body)
    }

    /// Earth's rim point facing the observer's zenith
    pub fn observer_anchor(&self) -> ScreenPoint {
        surface_point(
            self.earth().position,
            Body::Earth.constant().display_radius_px,
            self.observer_angle,
        )
    }

    /// Full-hemisphere and practical-visibility wedges, widest first
    pub fn visibility_wedges(&self) -> [VisibilityWedge; 2] {
        let anchor = self.observer_anchor();
        [
            VisibilityWedge::new(anchor, self.observer_angle, HEMISPHERE_HALF_ANGLE_DEG),
            VisibilityWedge::new(anchor, self.observer_angle, PRACTICAL_HALF_ANGLE_DEG),
        ]
    }
}

/// Convert a `#rrggbb` color to `rgba(r, g, b, alpha)`
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Option<String> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(format!(
        "rgba({}, {}, {}, {})",
        channel(0)?,
        channel(2)?,
        channel(4)?,
        alpha
    ))
}

struct SceneBuilder {
    scene: Scene,
    bounds: SceneBounds,
}

impl SceneBuilder {
    fn push(&mut self, role: Role, command: DrawCommand) {
        self.scene.elements.push(SceneElement { role, command });
    }

    fn define(&mut self, definition: Definition) {
        self.scene.definitions.push(definition);
    }

    fn day_night_shading(&mut self, layout: &SystemLayout) {
        let ids = [VISIBLE_CLIP_ID, PRACTICAL_CLIP_ID];
        for (wedge, id) in layout.visibility_wedges().iter().zip(ids) {
            self.define(Definition::ClipPath {
                id: id.to_string(),
                path: wedge.to_path(),
            });
            self.push(
                Role::DayShade,
                DrawCommand::Circle {
                    center: canvas_center(),
                    radius: OVERLAY_RADIUS,
                    fill: Some(DAY_OVERLAY.to_string()),
                    stroke: None,
                    clip: Some(id.to_string()),
                },
            );
        }
    }

    fn season_overlay(&mut self, hemisphere: Hemisphere) {
        let stroke = Stroke::dashed(SEASON_LINE_COLOR, 1.0, SEASON_DASH);
        self.push(
            Role::SeasonDivider,
            DrawCommand::Line {
                from: Point2::new(0.0, CENTER),
                to: Point2::new(VIEW_SIZE, CENTER),
                stroke: stroke.clone(),
            },
        );
        self.push(
            Role::SeasonDivider,
            DrawCommand::Line {
                from: Point2::new(CENTER, 0.0),
                to: Point2::new(CENTER, VIEW_SIZE),
                stroke,
            },
        );

        for (i, arc) in season_arcs(hemisphere).iter().enumerate() {
            let id = format!("season-arc-{}", i);
            self.define(Definition::LabelPath {
                id: id.clone(),
                path: arc.to_path(),
            });
            self.push(
                Role::SeasonLabel,
                DrawCommand::TextOnPath {
                    path_id: id,
                    content: arc.season.name().to_string(),
                    font_size: SEASON_FONT_SIZE,
                    color: SEASON_LABEL_COLOR.to_string(),
                },
            );
        }
    }

    fn orbit(&mut self, planet: &CelestialBodyConstant) {
        let radius = au_to_radius(planet.distance_au);
        self.push(
            Role::Orbit,
            DrawCommand::Circle {
                center: canvas_center(),
                radius,
                fill: None,
                stroke: Some(Stroke::dashed(ORBIT_COLOR, 1.0, ORBIT_DASH)),
                clip: None,
            },
        );

        // mirrored above and below the Sun, right of the vertical divider
        let label = format!("{} AU", planet.distance_au);
        for y in [
            CENTER - radius - AU_LABEL_OFFSET,
            CENTER + radius + AU_LABEL_OFFSET,
        ] {
            self.push(
                Role::OrbitLabel,
                DrawCommand::Text {
                    position: Point2::new(CENTER + AU_LABEL_INDENT, y),
                    content: label.clone(),
                    font_size: AU_FONT_SIZE,
                    color: LABEL_COLOR.to_string(),
                    anchor: TextAnchor::Start,
                },
            );
        }
    }

    fn body_disc(&mut self, body: Body, at: ScreenPoint, radius: f64, color: &str) {
        self.push(
            Role::Body(body),
            DrawCommand::Circle {
                center: at,
                radius,
                fill: Some(color.to_string()),
                stroke: None,
                clip: None,
            },
        );
    }

    fn body_label(&mut self, body: Body, at: ScreenPoint, radius: f64) {
        self.push(
            Role::BodyLabel(body),
            DrawCommand::Text {
                position: Point2::new(at.x, at.y - radius - LABEL_GAP),
                content: body.name().to_string(),
                font_size: BODY_FONT_SIZE,
                color: BODY_LABEL_COLOR.to_string(),
                anchor: TextAnchor::Middle,
            },
        );
    }

    fn labelled_body(&mut self, constant: &CelestialBodyConstant, at: ScreenPoint) {
        let radius = constant.display_radius_px;
        self.body_disc(constant.body, at, radius, constant.color);
        self.body_label(constant.body, at, radius);
        self.bounds.expand(at, radius + LABEL_FOOTPRINT);
    }

    /// Saturn is drawn top-down: a shrunk body inside a circular ring that
    /// fits the planet's usual footprint, label painted last
    fn saturn(&mut self, constant: &CelestialBodyConstant, at: ScreenPoint) {
        let body_radius = (constant.display_radius_px / 2.0).round();
        self.body_disc(constant.body, at, body_radius, constant.color);
        self.bounds.expand(at, body_radius + LABEL_FOOTPRINT);

        let ring_radius = constant.display_radius_px - SATURN_RING_STROKE / 2.0;
        let ring_color = hex_to_rgba(constant.color, 0.6).unwrap_or_else(|| constant.color.to_string());
        self.push(
            Role::SaturnRing,
            DrawCommand::Circle {
                center: at,
                radius: ring_radius,
                fill: None,
                stroke: Some(Stroke::solid(&ring_color, SATURN_RING_STROKE)),
                clip: None,
            },
        );
        self.body_label(constant.body, at, body_radius);
        self.bounds.expand(at, ring_radius + SATURN_RING_STROKE / 2.0);
    }

    fn moon(&mut self, earth: ScreenPoint, moon: ScreenPoint) {
        self.push(
            Role::MoonOrbit,
            DrawCommand::Circle {
                center: earth,
                radius: MOON_PIXEL_OFFSET,
                fill: None,
                stroke: Some(Stroke::dashed(ORBIT_COLOR, 1.0, MOON_ORBIT_DASH)),
                clip: None,
            },
        );
        self.bounds.expand(earth, MOON_PIXEL_OFFSET);
        self.labelled_body(&MOON, moon);
    }

    fn observer_needle(&mut self, layout: &SystemLayout) {
        let earth = layout.earth().position;
        let tip = layout.observer_anchor();
        self.push(
            Role::Needle,
            DrawCommand::Line {
                from: earth,
                to: tip,
                stroke: Stroke {
                    round_cap: true,
                    ..Stroke::solid(NEEDLE_COLOR, 2.0)
                },
            },
        );
        self.push(
            Role::NeedleTip,
            DrawCommand::Circle {
                center: tip,
                radius: NEEDLE_TIP_RADIUS,
                fill: Some(NEEDLE_COLOR.to_string()),
                stroke: None,
                clip: None,
            },
        );
    }
}

/// Build the scene for an instant and hemisphere, with its content bounds
pub fn render(ts: &Timestamp, hemisphere: Hemisphere) -> (Scene, SceneBounds) {
    let layout = SystemLayout::at(ts);
    let mut builder = SceneBuilder {
        scene: Scene::new(),
        bounds: SceneBounds::empty(),
    };

    builder.day_night_shading(&layout);
    builder.season_overlay(hemisphere);
    for planet in PLANETS.iter() {
        builder.orbit(planet);
    }

    let center = canvas_center();
    builder.body_disc(Body::Sun, center, SUN.display_radius_px, SUN.color);
    builder.bounds.expand(center, SUN.display_radius_px);

    for placed in layout.planets.iter() {
        let constant = placed.body.constant();
        log::trace!(
            "{} at {:.2} deg -> ({:.1}, {:.1})",
            placed.body.name(),
            placed.angle.degrees(),
            placed.position.x,
            placed.position.y
        );
        if placed.body == Body::Saturn {
            builder.saturn(constant, placed.position);
        } else {
            builder.labelled_body(constant, placed.position);
        }
    }

    builder.moon(layout.earth().position, layout.moon.position);
    builder.observer_needle(&layout);

    log::debug!(
        "Rendered {} elements for {} ({:?}), observer at {:.1} deg",
        builder.scene.elements.len(),
        ts,
        hemisphere,
        layout.observer_angle.degrees()
    );
    (builder.scene, builder.bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn noon() -> Timestamp {
        Timestamp::from_local(0, 2026, 2, 14, 12, 0, 0).unwrap()
    }

    fn circle_of(scene: &Scene, role: Role) -> (ScreenPoint, f64) {
        match scene.with_role(role).next().map(|e| &e.command) {
            Some(DrawCommand::Circle { center, radius, .. }) => (*center, *radius),
            other => panic!("expected a circle for {:?}, got {:?}", role, other),
        }
    }

    #[test]
    fn test_eight_orbits_and_labels() {
        let (scene, _) = render(&noon(), Hemisphere::North);
        assert_eq!(scene.with_role(Role::Orbit).count(), 8);
        let labels: Vec<String> = scene
            .with_role(Role::OrbitLabel)
            .filter_map(|e| match &e.command {
                DrawCommand::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels.len(), 16);
        assert!(labels.contains(&"1 AU".to_string()));
        assert!(labels.contains(&"5.2 AU".to_string()));
    }

    #[test]
    fn test_sun_at_center_without_label() {
        let (scene, _) = render(&noon(), Hemisphere::North);
        let (center, radius) = circle_of(&scene, Role::Body(Body::Sun));
        assert_eq!(center, Point2::new(400.0, 400.0));
        assert_eq!(radius, 16.0);
        assert_eq!(scene.with_role(Role::BodyLabel(Body::Sun)).count(), 0);
    }

    #[test]
    fn test_draw_order() {
        let (scene, _) = render(&noon(), Hemisphere::North);
        let order = [
            Role::DayShade,
            Role::SeasonDivider,
            Role::SeasonLabel,
            Role::Orbit,
            Role::Body(Body::Sun),
            Role::Body(Body::Mercury),
            Role::MoonOrbit,
            Role::Body(Body::Moon),
            Role::Needle,
            Role::NeedleTip,
        ];
        let indices: Vec<usize> = order
            .iter()
            .map(|role| scene.position_of(*role).expect("role present"))
            .collect();
        for pair in indices.windows(2) {
            assert!(pair[0] < pair[1], "{:?}", indices);
        }
    }

    #[test]
    fn test_saturn_ring_between_body_and_label() {
        let (scene, _) = render(&noon(), Hemisphere::North);
        let body = scene.position_of(Role::Body(Body::Saturn)).unwrap();
        let ring = scene.position_of(Role::SaturnRing).unwrap();
        let label = scene.position_of(Role::BodyLabel(Body::Saturn)).unwrap();
        assert!(body < ring && ring < label);
        assert_eq!(scene.with_role(Role::SaturnRing).count(), 1);

        let (_, body_radius) = circle_of(&scene, Role::Body(Body::Saturn));
        assert_eq!(body_radius, 10.0);
        match &scene.with_role(Role::SaturnRing).next().unwrap().command {
            DrawCommand::Circle {
                radius,
                fill,
                stroke: Some(stroke),
                ..
            } => {
                assert_eq!(*radius, 18.0);
                assert!(fill.is_none());
                assert_eq!(stroke.color, "rgba(224, 192, 128, 0.6)");
                assert_eq!(stroke.width, 4.0);
            }
            other => panic!("unexpected ring command {:?}", other),
        };
    }

    #[test]
    fn test_two_shading_layers_with_clips() {
        let (scene, _) = render(&noon(), Hemisphere::North);
        let clips: Vec<Option<String>> = scene
            .with_role(Role::DayShade)
            .map(|e| match &e.command {
                DrawCommand::Circle { clip, .. } => clip.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(
            clips,
            vec![
                Some(VISIBLE_CLIP_ID.to_string()),
                Some(PRACTICAL_CLIP_ID.to_string())
            ]
        );
        assert!(matches!(
            scene.definition(VISIBLE_CLIP_ID),
            Some(Definition::ClipPath { .. })
        ));
        assert!(matches!(
            scene.definition(PRACTICAL_CLIP_ID),
            Some(Definition::ClipPath { .. })
        ));
    }

    #[test]
    fn test_needle_points_along_observer_angle() {
        let ts = Timestamp::from_local(0, 2026, 2, 14, 6, 0, 0).unwrap();
        let (scene, _) = render(&ts, Hemisphere::North);
        let layout = SystemLayout::at(&ts);
        match &scene.with_role(Role::Needle).next().unwrap().command {
            DrawCommand::Line { from, to, stroke } => {
                let v = to - from;
                let angle = crate::coordinates::cartesian::screen_angle(&v);
                assert!(crate::coordinates::angle::separation(angle, layout.observer_angle.radians()) < 0.01);
                assert_abs_diff_eq!(v.norm(), 10.0, epsilon = 1e-9);
                assert_eq!(stroke.width, 2.0);
                assert!(stroke.round_cap);
            }
            other => panic!("unexpected needle {:?}", other),
        }
        let (_, tip_radius) = circle_of(&scene, Role::NeedleTip);
        assert_eq!(tip_radius, 2.0);
    }

    #[test]
    fn test_moon_offset_from_earth() {
        let layout = SystemLayout::at(&noon());
        let d = (layout.moon.position - layout.earth().position).norm();
        assert_abs_diff_eq!(d, MOON_PIXEL_OFFSET, epsilon = 1e-9);
    }

    #[test]
    fn test_hex_to_rgba() {
        assert_eq!(
            hex_to_rgba("#e0c080", 0.6).as_deref(),
            Some("rgba(224, 192, 128, 0.6)")
        );
        assert_eq!(hex_to_rgba("e0c080", 0.6), None);
        assert_eq!(hex_to_rgba("#zzzzzz", 0.6), None);
    }

    #[test]
    fn test_bounds_cover_saturn_ring() {
        let ts = noon();
        let (_, bounds) = render(&ts, Hemisphere::North);
        let saturn = SystemLayout::at(&ts).planet(Body::Saturn).unwrap().position;
        assert!(bounds.min_x <= saturn.x - 20.0);
        assert!(bounds.max_x >= saturn.x + 20.0);
        assert!(bounds.min_y <= saturn.y - 20.0);
        assert!(bounds.max_y >= saturn.y + 20.0);
    }
}
