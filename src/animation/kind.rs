use crate::{
    animation::ease::RateFunc,
    foundation::core::{Point, Rgba8, Vec2},
    foundation::error::{ReelError, ReelResult},
    scene::object::ObjectId,
};

/// Run time used when neither the step nor its group declares one.
pub const DEFAULT_RUN_TIME: f64 = 1.0;

/// Draw-on animations of objects with at least this many strokes default to a longer run time.
pub const LONG_WRITE_STROKES: usize = 15;

/// Closed set of animation kinds the engine understands, with their kind-specific parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Animation {
    /// Fade into view, optionally drifting by `shift` and growing from `scale`.
    FadeIn {
        /// Drift applied while fading in.
        shift: Option<Vec2>,
        /// Starting scale relative to the final size.
        scale: Option<f64>,
    },
    /// Fade out of view; the targets are destroyed afterwards.
    FadeOut {
        /// Drift applied while fading out.
        shift: Option<Vec2>,
        /// Final scale relative to the starting size.
        scale: Option<f64>,
    },
    /// Draw strokes on, then fill.
    Write,
    /// Trace the outline into existence.
    Create,
    /// Grow an arrow from its tail.
    GrowArrow,
    /// Morph the targets into `into`, which replaces them.
    Transform {
        /// Object the targets become.
        into: ObjectId,
    },
    /// Briefly pulse the targets in `color`, scaled by `scale_factor`.
    Indicate {
        /// Highlight color.
        color: Rgba8,
        /// Peak scale.
        scale_factor: f64,
    },
    /// Burst of rays around the targets.
    Flash {
        /// Ray color.
        color: Rgba8,
        /// Distance of the rays from the target center.
        radius: f64,
    },
    /// A travelling highlight along a stroke; the stroke is not left on screen.
    PassingFlash {
        /// Fraction of the stroke lit at any time.
        time_width: f64,
    },
    /// Translate the targets.
    MoveBy {
        /// Displacement in scene units.
        delta: Vec2,
    },
    /// Rotate the targets around a fixed point.
    RotateAbout {
        /// Angle in radians, counter-clockwise.
        angle: f64,
        /// Pivot in scene units.
        about: Point,
    },
    /// Move the 3D camera to a new orientation.
    MoveCamera {
        /// Polar angle in radians.
        phi: f64,
        /// Azimuth in radians.
        theta: f64,
        /// Zoom factor.
        zoom: f64,
    },
    /// Rotate the camera continuously for the duration of the step.
    AmbientRotation {
        /// Azimuth rate in radians per second.
        rate: f64,
    },
}

/// What an animation requires of its targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetRule {
    /// At least one object of any kind.
    AnyObject,
    /// At least one object, every one of them an arrow.
    Arrows,
    /// At least one object, every one of them a line or an arrow.
    Strokes,
    /// No objects: the animation acts on the camera.
    Camera,
}

impl Animation {
    /// Plain fade in.
    pub fn fade_in() -> Self {
        Self::FadeIn {
            shift: None,
            scale: None,
        }
    }

    /// Fade in while drifting by `shift`.
    pub fn fade_in_shifted(shift: Vec2) -> Self {
        Self::FadeIn {
            shift: Some(shift),
            scale: None,
        }
    }

    /// Fade in while growing from `scale`.
    pub fn fade_in_scaled(scale: f64) -> ReelResult<Self> {
        check_positive("fade_in scale", scale)?;
        Ok(Self::FadeIn {
            shift: None,
            scale: Some(scale),
        })
    }

    /// Plain fade out.
    pub fn fade_out() -> Self {
        Self::FadeOut {
            shift: None,
            scale: None,
        }
    }

    /// Fade out while shrinking to `scale`.
    pub fn fade_out_scaled(scale: f64) -> ReelResult<Self> {
        check_positive("fade_out scale", scale)?;
        Ok(Self::FadeOut {
            shift: None,
            scale: Some(scale),
        })
    }

    /// Morph into `into`.
    pub fn transform(into: ObjectId) -> Self {
        Self::Transform { into }
    }

    /// Pulse in `color` up to `scale_factor`.
    pub fn indicate(color: Rgba8, scale_factor: f64) -> ReelResult<Self> {
        check_positive("indicate scale_factor", scale_factor)?;
        Ok(Self::Indicate {
            color,
            scale_factor,
        })
    }

    /// Burst of `color` rays at `radius`.
    pub fn flash(color: Rgba8, radius: f64) -> ReelResult<Self> {
        check_positive("flash radius", radius)?;
        Ok(Self::Flash { color, radius })
    }

    /// Travelling highlight covering `time_width` of the stroke.
    pub fn passing_flash(time_width: f64) -> ReelResult<Self> {
        if !(time_width > 0.0 && time_width <= 1.0) {
            return Err(ReelError::validation(format!(
                "passing_flash time_width must be in (0, 1], got {time_width}"
            )));
        }
        Ok(Self::PassingFlash { time_width })
    }

    /// Translate by `delta`.
    pub fn move_by(delta: Vec2) -> Self {
        Self::MoveBy { delta }
    }

    /// Rotate by `angle` around `about`.
    pub fn rotate_about(angle: f64, about: Point) -> Self {
        Self::RotateAbout { angle, about }
    }

    /// Camera move to `(phi, theta, zoom)`.
    pub fn move_camera(phi: f64, theta: f64, zoom: f64) -> ReelResult<Self> {
        check_positive("camera zoom", zoom)?;
        Ok(Self::MoveCamera { phi, theta, zoom })
    }

    /// Ambient camera rotation at `rate` radians per second.
    pub fn ambient_rotation(rate: f64) -> Self {
        Self::AmbientRotation { rate }
    }

    /// Re-check parameters of a value built by hand or deserialized.
    pub fn validate(&self) -> ReelResult<()> {
        match *self {
            Self::FadeIn { shift, scale } | Self::FadeOut { shift, scale } => {
                if let Some(s) = shift
                    && !(s.x.is_finite() && s.y.is_finite())
                {
                    return Err(ReelError::validation("fade shift must be finite"));
                }
                if let Some(scale) = scale {
                    check_positive("fade scale", scale)?;
                }
                Ok(())
            }
            Self::Indicate { scale_factor, .. } => {
                check_positive("indicate scale_factor", scale_factor)
            }
            Self::Flash { radius, .. } => check_positive("flash radius", radius),
            Self::PassingFlash { time_width } => Self::passing_flash(time_width).map(|_| ()),
            Self::MoveBy { delta } => {
                if delta.x.is_finite() && delta.y.is_finite() {
                    Ok(())
                } else {
                    Err(ReelError::validation("move delta must be finite"))
                }
            }
            Self::RotateAbout { angle, about } => {
                if angle.is_finite() && about.x.is_finite() && about.y.is_finite() {
                    Ok(())
                } else {
                    Err(ReelError::validation("rotation must be finite"))
                }
            }
            Self::MoveCamera { zoom, .. } => check_positive("camera zoom", zoom),
            Self::AmbientRotation { rate } => {
                if rate.is_finite() {
                    Ok(())
                } else {
                    Err(ReelError::validation("ambient rotation rate must be finite"))
                }
            }
            Self::Write | Self::Create | Self::GrowArrow | Self::Transform { .. } => Ok(()),
        }
    }

    /// Short stable name, used in logs and manifests.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FadeIn { .. } => "fade_in",
            Self::FadeOut { .. } => "fade_out",
            Self::Write => "write",
            Self::Create => "create",
            Self::GrowArrow => "grow_arrow",
            Self::Transform { .. } => "transform",
            Self::Indicate { .. } => "indicate",
            Self::Flash { .. } => "flash",
            Self::PassingFlash { .. } => "passing_flash",
            Self::MoveBy { .. } => "move_by",
            Self::RotateAbout { .. } => "rotate_about",
            Self::MoveCamera { .. } => "move_camera",
            Self::AmbientRotation { .. } => "ambient_rotation",
        }
    }

    /// Rate function the engine should apply.
    pub fn rate_func(&self) -> RateFunc {
        match self {
            Self::Write | Self::PassingFlash { .. } | Self::AmbientRotation { .. } => {
                RateFunc::Linear
            }
            Self::Indicate { .. } => RateFunc::ThereAndBack,
            Self::Flash { .. } => RateFunc::RushFrom,
            _ => RateFunc::Smooth,
        }
    }

    /// Target requirements checked by static validation.
    pub fn target_rule(&self) -> TargetRule {
        match self {
            Self::GrowArrow => TargetRule::Arrows,
            Self::PassingFlash { .. } => TargetRule::Strokes,
            Self::MoveCamera { .. } | Self::AmbientRotation { .. } => TargetRule::Camera,
            _ => TargetRule::AnyObject,
        }
    }

    /// `true` when the targets are on screen once the animation completes.
    pub fn reveals(&self) -> bool {
        matches!(
            self,
            Self::FadeIn { .. } | Self::Write | Self::Create | Self::GrowArrow
        )
    }

    /// `true` when the targets no longer exist once the animation completes.
    pub fn destroys_targets(&self) -> bool {
        matches!(self, Self::FadeOut { .. } | Self::Transform { .. })
    }

    /// Run time when none is declared, given the stroke count of the targets.
    pub fn default_run_time(&self, strokes: usize) -> f64 {
        match self {
            Self::Write if strokes >= LONG_WRITE_STROKES => 2.0,
            _ => DEFAULT_RUN_TIME,
        }
    }
}

fn check_positive(what: &str, v: f64) -> ReelResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ReelError::validation(format!(
            "{what} must be finite and > 0, got {v}"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/kind.rs"]
mod tests;
