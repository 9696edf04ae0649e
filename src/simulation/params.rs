use crate::config::{DAMPING, WAVE_SPEED};
use crate::simulation::error::{FieldError, FieldResult};

/// Which state an excitation pushes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Impulse {
    /// Displace the surface directly; the released bump rings outward.
    #[default]
    Height,
    /// Kick the surface velocity; height keeps growing while the impulse is held.
    Velocity,
}

/// Physical constants of a wave field, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    /// Wave speed `c` in cells per step
    pub wave_speed: f64,
    /// Multiplicative velocity loss per step, in (0, 1]
    pub damping: f64,
    /// Target of `WaveField::excite`
    pub impulse: Impulse,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            wave_speed: WAVE_SPEED,
            damping: DAMPING,
            impulse: Impulse::default(),
        }
    }
}

impl WaveParams {
    pub fn new(wave_speed: f64, damping: f64) -> Self {
        Self {
            wave_speed,
            damping,
            impulse: Impulse::default(),
        }
    }

    pub fn with_impulse(mut self, impulse: Impulse) -> Self {
        self.impulse = impulse;
        self
    }

    /// Squared wave speed, the coefficient applied to the Laplacian.
    pub fn c2(&self) -> f64 {
        self.wave_speed * self.wave_speed
    }

    /// Reject parameters under which the explicit scheme can diverge.
    ///
    /// Requires `0 < c` with `c^2 <= 1`, and `0 < damping <= 1`.
    pub fn validate(&self) -> FieldResult<()> {
        if !self.wave_speed.is_finite() || self.wave_speed <= 0.0 {
            return Err(FieldError::InvalidParameter {
                name: "wave_speed",
                value: self.wave_speed,
                reason: "must be finite and positive",
            });
        }
        if self.c2() > 1.0 {
            return Err(FieldError::InvalidParameter {
                name: "wave_speed",
                value: self.wave_speed,
                reason: "c^2 must not exceed 1 for a stable explicit step",
            });
        }
        if !self.damping.is_finite() || self.damping <= 0.0 || self.damping > 1.0 {
            return Err(FieldError::InvalidParameter {
                name: "damping",
                value: self.damping,
                reason: "must lie in (0, 1]",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_stable() {
        let params = WaveParams::default();
        assert!(params.validate().is_ok(), "Configured constants must pass validation");
        assert!(params.c2() <= 1.0);
    }

    #[test]
    fn test_unit_speed_lossless_is_allowed() {
        assert!(WaveParams::new(1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_fast_waves() {
        let err = WaveParams::new(1.01, 0.99).validate().unwrap_err();
        assert!(matches!(err, FieldError::InvalidParameter { name: "wave_speed", .. }));
    }

    #[test]
    fn test_rejects_non_positive_or_nan_speed() {
        for speed in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            assert!(
                WaveParams::new(speed, 0.99).validate().is_err(),
                "wave_speed {} should be rejected",
                speed
            );
        }
    }

    #[test]
    fn test_rejects_damping_outside_unit_interval() {
        for damping in [0.0, -0.1, 1.0001, f64::NAN] {
            let err = WaveParams::new(0.5, damping).validate().unwrap_err();
            assert!(
                matches!(err, FieldError::InvalidParameter { name: "damping", .. }),
                "damping {} should be rejected",
                damping
            );
        }
    }

    #[test]
    fn test_with_impulse() {
        let params = WaveParams::default().with_impulse(Impulse::Velocity);
        assert_eq!(params.impulse, Impulse::Velocity);
        assert_eq!(params.wave_speed, WAVE_SPEED);
    }
}
