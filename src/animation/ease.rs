/// Rate functions mapping normalized animation progress to eased progress.
///
/// The engine owns interpolation; the crate only tags each animation with the curve it expects
/// and uses it for the animatic dissolve between poster frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateFunc {
    /// Linear progress.
    Linear,
    /// Cubic ease-in/out, the default for most animations.
    Smooth,
    /// Rise to 1 at the midpoint, then return to 0.
    ThereAndBack,
    /// Fast start, slow settle.
    RushFrom,
}

impl RateFunc {
    /// Apply this rate function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => smooth(t),
            Self::ThereAndBack => {
                if t < 0.5 {
                    smooth(2.0 * t)
                } else {
                    smooth(2.0 - 2.0 * t)
                }
            }
            Self::RushFrom => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }

    /// Progress value reached when the animation completes.
    pub fn end_value(self) -> f64 {
        self.apply(1.0)
    }
}

fn smooth(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
