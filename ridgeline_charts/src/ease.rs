// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves for tweens.

/// Timing curve applied to a tween's normalized progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in-out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in-out, the default transition timing.
    #[default]
    InOutCubic,
}

impl Ease {
    /// Maps progress `t` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }

    /// Control points `[x1, y1, x2, y2]` of a cubic Bézier approximating the curve.
    ///
    /// Declarative hosts (CSS `cubic-bezier`, SMIL `keySplines`) use these.
    /// `Linear` returns `None`.
    pub fn cubic_bezier(self) -> Option<[f64; 4]> {
        match self {
            Self::Linear => None,
            Self::InQuad => Some([0.11, 0.0, 0.5, 0.0]),
            Self::OutQuad => Some([0.5, 1.0, 0.89, 1.0]),
            Self::InOutQuad => Some([0.45, 0.0, 0.55, 1.0]),
            Self::InCubic => Some([0.32, 0.0, 0.67, 0.0]),
            Self::OutCubic => Some([0.33, 1.0, 0.68, 1.0]),
            Self::InOutCubic => Some([0.65, 0.0, 0.35, 1.0]),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];

    #[test]
    fn endpoints_are_stable() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?} at 1");
        }
    }

    #[test]
    fn monotonic_spot_check() {
        for ease in ALL {
            let a = ease.apply(0.25);
            let b = ease.apply(0.5);
            let c = ease.apply(0.75);
            assert!(a < b, "{ease:?}");
            assert!(b < c, "{ease:?}");
        }
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(Ease::InOutCubic.apply(-1.0), 0.0);
        assert_eq!(Ease::InOutCubic.apply(2.0), 1.0);
        assert_eq!(Ease::InOutCubic.apply(0.5), 0.5);
    }
}
