//! Minimal vector path description
//!
//! Enough of the SVG path mini-language to describe pie-slice clip regions and
//! circular label arcs. Paths display in the standard `d` attribute syntax.

use crate::coordinates::ScreenPoint;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(ScreenPoint),
    LineTo(ScreenPoint),
    /// Circular arc of `radius` ending at `to`
    Arc {
        radius: f64,
        large_arc: bool,
        /// `true` sweeps clockwise on screen
        sweep: bool,
        to: ScreenPoint,
    },
    Close,
}

/// An ordered list of path segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    segments: Vec<PathSegment>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: ScreenPoint) -> Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: ScreenPoint) -> Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    pub fn arc_to(mut self, radius: f64, large_arc: bool, sweep: bool, to: ScreenPoint) -> Self {
        self.segments.push(PathSegment::Arc {
            radius,
            large_arc,
            sweep,
            to,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// All explicit points of the path, in order
    pub fn points(&self) -> Vec<ScreenPoint> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => Some(*p),
                PathSegment::Arc { to, .. } => Some(*to),
                PathSegment::Close => None,
            })
            .collect()
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match segment {
                PathSegment::MoveTo(p) => write!(f, "M {} {}", p.x, p.y)?,
                PathSegment::LineTo(p) => write!(f, "L {} {}", p.x, p.y)?,
                PathSegment::Arc {
                    radius,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    f,
                    "A {} {} 0 {} {} {} {}",
                    radius,
                    radius,
                    flag(*large_arc),
                    flag(*sweep),
                    to.x,
                    to.y
                )?,
                PathSegment::Close => write!(f, "Z")?,
            }
        }
        Ok(())
    }
}

impl Serialize for PathData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
