use crate::{
    foundation::core::{Affine, Point, Point3, Rect, Rgba8, Vec2, palette},
    foundation::error::{ReelError, ReelResult},
    scene::layout,
};

/// Index of a visual object inside its scene.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Axis range `[min, max, step]`.
pub type AxisRange = [f64; 3];

/// What a visual object is. Shapes carry absolute scene-space geometry; text is laid out around
/// the origin and placed by its [`Pose`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectKind {
    /// A text label, possibly multi-line.
    Text {
        /// Text content; `\n` separates lines.
        content: String,
        /// Font family, engine default when `None`.
        font: Option<String>,
        /// Font size in points.
        font_size: f64,
    },
    /// A typeset equation split into addressable parts.
    MathTex {
        /// TeX source of each part.
        parts: Vec<String>,
        /// Font size in points.
        font_size: f64,
    },
    /// A straight segment.
    Line {
        /// Start point.
        start: Point,
        /// End point.
        end: Point,
        /// Dashed stroke.
        dashed: bool,
    },
    /// A segment with a tip at `end`.
    Arrow {
        /// Tail.
        start: Point,
        /// Tip.
        end: Point,
    },
    /// A filled disc.
    Dot {
        /// Center.
        center: Point,
        /// Radius in scene units.
        radius: f64,
    },
    /// A filled disc in 3D space.
    Dot3 {
        /// Center.
        center: Point3,
        /// Radius in scene units.
        radius: f64,
    },
    /// Two perpendicular axes.
    Axes {
        /// Horizontal range.
        x_range: AxisRange,
        /// Vertical range.
        y_range: AxisRange,
        /// Drawn length of the horizontal axis.
        x_length: f64,
        /// Drawn length of the vertical axis.
        y_length: f64,
    },
    /// Three perpendicular axes centered on the origin.
    Axes3 {
        /// X range.
        x_range: AxisRange,
        /// Y range.
        y_range: AxisRange,
        /// Z range.
        z_range: AxisRange,
        /// Drawn X length.
        x_length: f64,
        /// Drawn Y length.
        y_length: f64,
        /// Drawn Z length.
        z_length: f64,
    },
    /// A set of objects animated as one.
    Group {
        /// Members, in declaration order.
        children: Vec<ObjectId>,
    },
    /// Parts `[start, end)` of an equation.
    Slice {
        /// The equation.
        of: ObjectId,
        /// First part.
        start: usize,
        /// One past the last part.
        end: usize,
    },
}

impl ObjectKind {
    /// Single-font text.
    pub fn text(content: impl Into<String>, font_size: f64) -> Self {
        Self::Text {
            content: content.into(),
            font: None,
            font_size,
        }
    }

    /// Text in a named font family.
    pub fn text_in(content: impl Into<String>, font: impl Into<String>, font_size: f64) -> Self {
        Self::Text {
            content: content.into(),
            font: Some(font.into()),
            font_size,
        }
    }

    /// Equation at the default 48pt size.
    pub fn math_tex<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MathTex {
            parts: parts.into_iter().map(Into::into).collect(),
            font_size: 48.0,
        }
    }

    /// Solid line.
    pub fn line(start: Point, end: Point) -> Self {
        Self::Line {
            start,
            end,
            dashed: false,
        }
    }

    /// Dashed line.
    pub fn dashed_line(start: Point, end: Point) -> Self {
        Self::Line {
            start,
            end,
            dashed: true,
        }
    }

    /// Arrow from `start` to `end`.
    pub fn arrow(start: Point, end: Point) -> Self {
        Self::Arrow { start, end }
    }

    /// Dot of the default radius.
    pub fn dot(center: Point) -> Self {
        Self::Dot {
            center,
            radius: 0.08,
        }
    }

    /// Objects this one is built from, which must exist before it.
    pub fn dependencies(&self) -> Vec<ObjectId> {
        match self {
            Self::Group { children } => children.clone(),
            Self::Slice { of, .. } => vec![*of],
            _ => Vec::new(),
        }
    }

    /// `true` for containers that are never drawn themselves.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Group { .. } | Self::Slice { .. })
    }

    /// `true` for arrows.
    pub fn is_arrow(&self) -> bool {
        matches!(self, Self::Arrow { .. })
    }

    /// `true` for lines and arrows.
    pub fn is_stroke(&self) -> bool {
        matches!(self, Self::Line { .. } | Self::Arrow { .. })
    }

    /// Number of strokes a draw-on animation traces. Containers report zero; their members are
    /// counted by the scene.
    pub fn strokes(&self) -> usize {
        match self {
            Self::Text { content, .. } => content.chars().filter(|c| !c.is_whitespace()).count(),
            Self::MathTex { parts, .. } => parts.iter().map(|p| layout::tex_strokes(p)).sum(),
            Self::Line { .. } | Self::Dot { .. } | Self::Dot3 { .. } => 1,
            Self::Arrow { .. } => 2,
            Self::Axes { .. } => 2,
            Self::Axes3 { .. } => 3,
            Self::Group { .. } | Self::Slice { .. } => 0,
        }
    }

    /// Scene-space rectangle covered by the unposed geometry.
    pub fn local_rect(&self) -> Rect {
        match self {
            Self::Text {
                content, font_size, ..
            } => Rect::from_center_size(Point::ORIGIN, layout::text_extent(content, *font_size)),
            Self::MathTex { parts, font_size } => {
                let display: String = parts.iter().map(|p| layout::tex_display(p)).collect();
                Rect::from_center_size(Point::ORIGIN, layout::text_extent(&display, *font_size))
            }
            Self::Line { start, end, .. } | Self::Arrow { start, end } => {
                Rect::from_points(*start, *end)
            }
            Self::Dot { center, radius } => {
                Rect::from_center_size(*center, (2.0 * radius, 2.0 * radius))
            }
            Self::Dot3 { center, radius } => {
                Rect::from_center_size(center.xy(), (2.0 * radius, 2.0 * radius))
            }
            Self::Axes {
                x_length, y_length, ..
            }
            | Self::Axes3 {
                x_length, y_length, ..
            } => Rect::from_center_size(Point::ORIGIN, (*x_length, *y_length)),
            Self::Group { .. } | Self::Slice { .. } => Rect::ZERO,
        }
    }

    /// Reject degenerate geometry.
    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Text { font_size, .. } | Self::MathTex { font_size, .. } => {
                if !(font_size.is_finite() && *font_size > 0.0) {
                    return Err(ReelError::validation("font_size must be > 0"));
                }
                Ok(())
            }
            Self::Dot { radius, .. } | Self::Dot3 { radius, .. } => {
                if !(radius.is_finite() && *radius > 0.0) {
                    return Err(ReelError::validation("dot radius must be > 0"));
                }
                Ok(())
            }
            Self::Axes {
                x_range,
                y_range,
                x_length,
                y_length,
            } => {
                check_range("x_range", x_range)?;
                check_range("y_range", y_range)?;
                check_length(*x_length)?;
                check_length(*y_length)
            }
            Self::Axes3 {
                x_range,
                y_range,
                z_range,
                x_length,
                y_length,
                z_length,
            } => {
                check_range("x_range", x_range)?;
                check_range("y_range", y_range)?;
                check_range("z_range", z_range)?;
                check_length(*x_length)?;
                check_length(*y_length)?;
                check_length(*z_length)
            }
            Self::Slice { start, end, .. } => {
                if start >= end {
                    return Err(ReelError::validation("slice must select at least one part"));
                }
                Ok(())
            }
            Self::Line { .. } | Self::Arrow { .. } | Self::Group { .. } => Ok(()),
        }
    }
}

fn check_range(what: &str, r: &AxisRange) -> ReelResult<()> {
    if r[0] < r[1] && r[2] > 0.0 {
        Ok(())
    } else {
        Err(ReelError::validation(format!(
            "{what} must be [min, max, step] with min < max and step > 0"
        )))
    }
}

fn check_length(v: f64) -> ReelResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ReelError::validation("axis length must be > 0"))
    }
}

/// Drawing style.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    /// Stroke and fill color.
    pub color: Rgba8,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Stroke width in pixels at 1080p.
    pub stroke_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: palette::WHITE,
            opacity: 1.0,
            stroke_width: 4.0,
        }
    }
}

impl Style {
    /// Default style in `color`.
    pub fn colored(color: Rgba8) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Same style at `opacity`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Same style with `stroke_width`.
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }
}

/// Placement of an object's geometry: scaled and rotated about its own center, then moved so
/// that center sits at `position`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    /// Center in scene units.
    pub position: Point,
    /// Uniform scale.
    pub scale: f64,
    /// Counter-clockwise rotation in radians.
    pub rotation: f64,
}

impl Pose {
    /// Identity pose for geometry centered at `position`.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            scale: 1.0,
            rotation: 0.0,
        }
    }

    /// Affine mapping local geometry centered at `anchor` into scene space.
    pub fn affine(&self, anchor: Point) -> Affine {
        Affine::translate(self.position.to_vec2())
            * Affine::rotate(self.rotation)
            * Affine::scale(self.scale)
            * Affine::translate(-anchor.to_vec2())
    }
}

/// A drawable entity of a scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualObject {
    /// Index in the owning scene.
    pub id: ObjectId,
    /// Semantic key, when registered.
    pub key: Option<String>,
    /// Geometry.
    pub kind: ObjectKind,
    /// Placement.
    pub pose: Pose,
    /// Style.
    pub style: Style,
}

impl VisualObject {
    /// New object posed at the natural center of its geometry.
    pub fn new(id: ObjectId, kind: ObjectKind, style: Style) -> Self {
        let pose = Pose::at(kind.local_rect().center());
        Self {
            id,
            key: None,
            kind,
            pose,
            style,
        }
    }

    /// Affine from local geometry into scene space.
    pub fn transform(&self) -> Affine {
        self.pose.affine(self.kind.local_rect().center())
    }

    /// Axis-aligned scene-space bounds. Containers report an empty rectangle at their pose.
    pub fn bounds(&self) -> Rect {
        if self.kind.is_container() {
            return Rect::from_center_size(self.pose.position, (0.0, 0.0));
        }
        self.transform().transform_rect_bbox(self.kind.local_rect())
    }

    /// Label used in diagnostics: the semantic key, or kind and index.
    pub fn label(&self) -> String {
        match &self.key {
            Some(key) => format!("'{key}'"),
            None => format!("#{} ({})", self.id.0, kind_name(&self.kind)),
        }
    }

    /// Move the center by `delta`.
    pub fn shift(&mut self, delta: Vec2) {
        self.pose.position += delta;
    }
}

/// Short stable name of a kind.
pub fn kind_name(kind: &ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Text { .. } => "text",
        ObjectKind::MathTex { .. } => "math_tex",
        ObjectKind::Line { .. } => "line",
        ObjectKind::Arrow { .. } => "arrow",
        ObjectKind::Dot { .. } => "dot",
        ObjectKind::Dot3 { .. } => "dot3",
        ObjectKind::Axes { .. } => "axes",
        ObjectKind::Axes3 { .. } => "axes3",
        ObjectKind::Group { .. } => "group",
        ObjectKind::Slice { .. } => "slice",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/object.rs"]
mod tests;
