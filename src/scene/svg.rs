//! SVG backend for [`Scene`]
//!
//! Produces a standalone SVG document. The scene is drawn at its native
//! 800-unit size and the caller picks which part is visible through the
//! `viewBox`, so panning and zooming never re-render the content.

use super::{Definition, DrawCommand, Scene, SceneElement, Stroke, TextAnchor};
use crate::viewport::ViewBox;
use crate::Result;
use std::fs;
use std::path::Path;

const BACKGROUND: &str = "#1e1e1e";
const FONT_FAMILY: &str = "sans-serif";

/// Escape text content and attribute values
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn stroke_attributes(stroke: &Stroke) -> String {
    let mut attrs = format!(
        r#" stroke="{}" stroke-width="{}""#,
        escape(&stroke.color),
        stroke.width
    );
    if let Some(dash) = &stroke.dash {
        attrs.push_str(&format!(r#" stroke-dasharray="{}""#, escape(dash)));
    }
    if stroke.round_cap {
        attrs.push_str(r#" stroke-linecap="round""#);
    }
    attrs
}

fn anchor_name(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
    }
}

fn write_definition(svg: &mut String, definition: &Definition) {
    match definition {
        Definition::ClipPath { id, path } => {
            svg.push_str(&format!(
                "    <clipPath id=\"{}\"><path d=\"{}\"/></clipPath>\n",
                escape(id),
                path
            ));
        }
        Definition::LabelPath { id, path } => {
            svg.push_str(&format!(
                "    <path id=\"{}\" d=\"{}\" fill=\"none\"/>\n",
                escape(id),
                path
            ));
        }
    }
}

fn write_element(svg: &mut String, element: &SceneElement) {
    let class = element.role.class_name();
    match &element.command {
        DrawCommand::Circle {
            center,
            radius,
            fill,
            stroke,
            clip,
        } => {
            let fill = fill.as_deref().map(escape).unwrap_or_else(|| "none".to_string());
            svg.push_str(&format!(
                r#"  <circle class="{}" cx="{}" cy="{}" r="{}" fill="{}""#,
                class, center.x, center.y, radius, fill
            ));
            if let Some(stroke) = stroke {
                svg.push_str(&stroke_attributes(stroke));
            }
            if let Some(clip) = clip {
                svg.push_str(&format!(r#" clip-path="url(#{})""#, escape(clip)));
            }
            svg.push_str("/>\n");
        }
        DrawCommand::Line { from, to, stroke } => {
            svg.push_str(&format!(
                r#"  <line class="{}" x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
                class,
                from.x,
                from.y,
                to.x,
                to.y,
                stroke_attributes(stroke)
            ));
            svg.push('\n');
        }
        DrawCommand::Text {
            position,
            content,
            font_size,
            color,
            anchor,
        } => {
            svg.push_str(&format!(
                r#"  <text class="{}" x="{}" y="{}" font-size="{}" font-family="{}" fill="{}" text-anchor="{}">{}</text>"#,
                class,
                position.x,
                position.y,
                font_size,
                FONT_FAMILY,
                escape(color),
                anchor_name(*anchor),
                escape(content)
            ));
            svg.push('\n');
        }
        DrawCommand::TextOnPath {
            path_id,
            content,
            font_size,
            color,
        } => {
            svg.push_str(&format!(
                r##"  <text class="{}" font-size="{}" font-family="{}" fill="{}"><textPath href="#{}" startOffset="50%" text-anchor="middle">{}</textPath></text>"##,
                class,
                font_size,
                FONT_FAMILY,
                escape(color),
                escape(path_id),
                escape(content)
            ));
            svg.push('\n');
        }
    }
}

/// Serialize a scene into an SVG document showing `view_box`
pub fn to_svg(scene: &Scene, view_box: &ViewBox) -> String {
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{}\" width=\"100%\" height=\"100%\">\n",
        view_box
    ));
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
        scene.size, scene.size, BACKGROUND
    ));

    if !scene.definitions.is_empty() {
        svg.push_str("  <defs>\n");
        for definition in &scene.definitions {
            write_definition(&mut svg, definition);
        }
        svg.push_str("  </defs>\n");
    }

    for element in &scene.elements {
        write_element(&mut svg, element);
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write the SVG document for `scene` to `path`
pub fn write_svg<P: AsRef<Path>>(path: P, scene: &Scene, view_box: &ViewBox) -> Result<()> {
    fs::write(path.as_ref(), to_svg(scene, view_box))?;
    log::debug!("Wrote SVG to {}", path.as_ref().display());
    Ok(())
}

/// Pretty-printed JSON form of the scene
pub fn to_json(scene: &Scene) -> Result<String> {
    Ok(serde_json::to_string_pretty(scene)?)
}
