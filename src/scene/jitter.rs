use crate::{
    foundation::core::Vec2,
    foundation::error::{ReelError, ReelResult},
    foundation::rng::Rng64,
    scene::object::Pose,
};

/// Bounds of the cosmetic offsets applied to each word of a cloud.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct JitterPolicy {
    /// Each shift component is drawn from `[0, max_shift)`.
    pub max_shift: f64,
    /// Scale factor range `[lo, hi)`.
    pub scale_range: (f64, f64),
    /// Rotation is drawn from `[-max_rotation, max_rotation)` radians.
    pub max_rotation: f64,
}

/// One sampled set of offsets.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Jitter {
    /// Added to the position.
    pub shift: Vec2,
    /// Multiplies the scale.
    pub scale: f64,
    /// Added to the rotation.
    pub rotation: f64,
}

impl JitterPolicy {
    /// Check the ranges.
    pub fn validate(&self) -> ReelResult<()> {
        let (lo, hi) = self.scale_range;
        if !(self.max_shift >= 0.0 && self.max_shift.is_finite()) {
            return Err(ReelError::validation("jitter max_shift must be >= 0"));
        }
        if !(lo > 0.0 && lo <= hi && hi.is_finite()) {
            return Err(ReelError::validation(
                "jitter scale_range must satisfy 0 < lo <= hi",
            ));
        }
        if !(self.max_rotation >= 0.0 && self.max_rotation.is_finite()) {
            return Err(ReelError::validation("jitter max_rotation must be >= 0"));
        }
        Ok(())
    }

    /// Draw one jitter. Consumes exactly five values: three shift components (depth discarded),
    /// then scale, then rotation.
    pub fn sample(&self, rng: &mut Rng64) -> Jitter {
        let dx = rng.next_f64_01() * self.max_shift;
        let dy = rng.next_f64_01() * self.max_shift;
        let _dz = rng.next_f64_01();
        let scale = rng.uniform(self.scale_range.0, self.scale_range.1);
        let rotation = rng.uniform(-self.max_rotation, self.max_rotation);
        Jitter {
            shift: Vec2::new(dx, dy),
            scale,
            rotation,
        }
    }
}

impl Jitter {
    /// Apply to a pose: shift, then scale and rotate about the (shifted) center.
    pub fn apply(&self, pose: &mut Pose) {
        pose.position += self.shift;
        pose.scale *= self.scale;
        pose.rotation += self.rotation;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/jitter.rs"]
mod tests;
