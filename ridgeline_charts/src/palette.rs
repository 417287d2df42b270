// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sequential color ramps for horizon bands.
//!
//! The ramps are the ColorBrewer sequential schemes, stored per step count
//! (`3..=9`), lightest first.

use peniko::Color;

/// Smallest step count any scheme provides.
pub const MIN_STEPS: u32 = 3;

#[allow(clippy::cast_possible_truncation, reason = "extracting bytes from a packed hex color")]
const fn rgb(hex: u32) -> Color {
    Color::from_rgba8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255)
}

const OR_RD: [&[Color]; 7] = [
    &[rgb(0xfee8c8), rgb(0xfdbb84), rgb(0xe34a33)],
    &[rgb(0xfef0d9), rgb(0xfdcc8a), rgb(0xfc8d59), rgb(0xd7301f)],
    &[
        rgb(0xfef0d9),
        rgb(0xfdcc8a),
        rgb(0xfc8d59),
        rgb(0xe34a33),
        rgb(0xb30000),
    ],
    &[
        rgb(0xfef0d9),
        rgb(0xfdd49e),
        rgb(0xfdbb84),
        rgb(0xfc8d59),
        rgb(0xe34a33),
        rgb(0xb30000),
    ],
    &[
        rgb(0xfef0d9),
        rgb(0xfdd49e),
        rgb(0xfdbb84),
        rgb(0xfc8d59),
        rgb(0xef6548),
        rgb(0xd7301f),
        rgb(0x990000),
    ],
    &[
        rgb(0xfff7ec),
        rgb(0xfee8c8),
        rgb(0xfdd49e),
        rgb(0xfdbb84),
        rgb(0xfc8d59),
        rgb(0xef6548),
        rgb(0xd7301f),
        rgb(0x990000),
    ],
    &[
        rgb(0xfff7ec),
        rgb(0xfee8c8),
        rgb(0xfdd49e),
        rgb(0xfdbb84),
        rgb(0xfc8d59),
        rgb(0xef6548),
        rgb(0xd7301f),
        rgb(0xb30000),
        rgb(0x7f0000),
    ],
];

const BLUES: [&[Color]; 7] = [
    &[rgb(0xdeebf7), rgb(0x9ecae1), rgb(0x3182bd)],
    &[rgb(0xeff3ff), rgb(0xbdd7e7), rgb(0x6baed6), rgb(0x2171b5)],
    &[
        rgb(0xeff3ff),
        rgb(0xbdd7e7),
        rgb(0x6baed6),
        rgb(0x3182bd),
        rgb(0x08519c),
    ],
    &[
        rgb(0xeff3ff),
        rgb(0xc6dbef),
        rgb(0x9ecae1),
        rgb(0x6baed6),
        rgb(0x3182bd),
        rgb(0x08519c),
    ],
    &[
        rgb(0xeff3ff),
        rgb(0xc6dbef),
        rgb(0x9ecae1),
        rgb(0x6baed6),
        rgb(0x4292c6),
        rgb(0x2171b5),
        rgb(0x084594),
    ],
    &[
        rgb(0xf7fbff),
        rgb(0xdeebf7),
        rgb(0xc6dbef),
        rgb(0x9ecae1),
        rgb(0x6baed6),
        rgb(0x4292c6),
        rgb(0x2171b5),
        rgb(0x084594),
    ],
    &[
        rgb(0xf7fbff),
        rgb(0xdeebf7),
        rgb(0xc6dbef),
        rgb(0x9ecae1),
        rgb(0x6baed6),
        rgb(0x4292c6),
        rgb(0x2171b5),
        rgb(0x08519c),
        rgb(0x08306b),
    ],
];

/// A perceptually sequential color scheme indexable by step count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SequentialScheme {
    /// Orange → red.
    #[default]
    OrRd,
    /// Light → dark blue.
    Blues,
}

impl SequentialScheme {
    fn variants(self) -> &'static [&'static [Color]] {
        match self {
            Self::OrRd => &OR_RD,
            Self::Blues => &BLUES,
        }
    }

    /// Largest step count this scheme provides.
    #[allow(clippy::cast_possible_truncation, reason = "at most seven variants")]
    pub fn max_steps(self) -> u32 {
        MIN_STEPS + self.variants().len() as u32 - 1
    }

    /// Returns the `steps`-color ramp, if the scheme has one.
    pub fn ramp(self, steps: u32) -> Option<&'static [Color]> {
        let i = steps.checked_sub(MIN_STEPS)?;
        self.variants().get(i as usize).copied()
    }

    /// Returns the color of horizon band `band` when `overlap` bands are drawn.
    ///
    /// Defined for `overlap >= 1` and `band < overlap`. With fewer than three bands
    /// the lookup reads from the darkest end of the three-step ramp.
    pub fn band_color(self, overlap: u32, band: u32) -> Option<Color> {
        if overlap == 0 || band >= overlap {
            return None;
        }
        let ramp = self.ramp(overlap.max(MIN_STEPS))?;
        let offset = MIN_STEPS.saturating_sub(overlap);
        ramp.get((band + offset) as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn every_ramp_has_its_step_count() {
        for scheme in [SequentialScheme::OrRd, SequentialScheme::Blues] {
            for steps in MIN_STEPS..=scheme.max_steps() {
                assert_eq!(scheme.ramp(steps).unwrap().len(), steps as usize);
            }
            assert!(scheme.ramp(2).is_none());
            assert!(scheme.ramp(scheme.max_steps() + 1).is_none());
        }
    }

    #[test]
    fn small_overlaps_shift_into_the_three_step_ramp() {
        let s = SequentialScheme::OrRd;
        let three = s.ramp(3).unwrap();
        assert_eq!(s.band_color(1, 0), Some(three[2]));
        assert_eq!(s.band_color(2, 0), Some(three[1]));
        assert_eq!(s.band_color(2, 1), Some(three[2]));
    }

    #[test]
    fn large_overlaps_use_their_own_ramp() {
        let s = SequentialScheme::OrRd;
        let five = s.ramp(5).unwrap();
        for band in 0..5 {
            assert_eq!(s.band_color(5, band), Some(five[band as usize]));
        }
    }

    #[test]
    fn out_of_domain_requests_return_none() {
        let s = SequentialScheme::Blues;
        assert_eq!(s.band_color(0, 0), None);
        assert_eq!(s.band_color(4, 4), None);
        assert_eq!(s.band_color(10, 0), None);
    }
}
