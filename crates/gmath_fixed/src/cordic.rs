//! Integer-only CORDIC kernels.
//!
//! Angles and results are in Q2.30 format (`value * 2^30` stored in an `i64`),
//! which leaves 14 extra fractional bits over [`Fixed`](crate::Fixed) so that
//! the rounding error of the iterations stays below one Q16.16 unit.

/// Number of fractional bits in the internal representation.
pub(crate) const FRAC_BITS: u32 = 30;

pub(crate) const PI: i64 = 3_373_259_426;
pub(crate) const FRAC_PI_2: i64 = 1_686_629_713;
const TWO_PI: i64 = 2 * PI;

/// `atan(2^-i)` in Q2.30 for `i = 0..=30`.
const ATAN_TABLE: [i64; 31] = [
    843_314_857,
    497_837_829,
    263_043_837,
    133_525_159,
    67_021_687,
    33_543_516,
    16_775_851,
    8_388_437,
    4_194_283,
    2_097_149,
    1_048_576,
    524_288,
    262_144,
    131_072,
    65_536,
    32_768,
    16_384,
    8_192,
    4_096,
    2_048,
    1_024,
    512,
    256,
    128,
    64,
    32,
    16,
    8,
    4,
    2,
    1,
];

/// Product of `cos(atan(2^-i))` over the table, in Q2.30. Starting the
/// rotation at this length cancels the gain of the pseudo-rotations.
const GAIN: i64 = 652_032_874;

/// Computes `(sin(angle), cos(angle))` for an angle in Q2.30 radians.
pub(crate) fn sin_cos(angle: i64) -> (i64, i64) {
    let mut theta = angle.rem_euclid(TWO_PI);
    if theta > PI {
        theta -= TWO_PI;
    }

    // The iterations only converge within about +-99 degrees, so fold the
    // outer half circle onto the inner one using sin(pi - t) = sin(t) and
    // cos(pi - t) = -cos(t).
    let negate_cos = if theta > FRAC_PI_2 {
        theta = PI - theta;
        true
    } else if theta < -FRAC_PI_2 {
        theta = -PI - theta;
        true
    } else {
        false
    };

    let mut x = GAIN;
    let mut y = 0;
    let mut z = theta;

    for (i, &step) in ATAN_TABLE.iter().enumerate() {
        let dx = x >> i;
        let dy = y >> i;
        if z >= 0 {
            x -= dy;
            y += dx;
            z -= step;
        } else {
            x += dy;
            y -= dx;
            z += step;
        }
    }

    if negate_cos { (y, -x) } else { (y, x) }
}

/// Computes `atan2(y, x)` in Q2.30 radians. The inputs may use any common
/// fixed-point scale as long as `|x|` and `|y|` stay below `2^61`.
pub(crate) fn atan2(y: i64, x: i64) -> i64 {
    if x == 0 && y == 0 {
        return 0;
    }

    let (mut x, mut y, mut z) = if x < 0 {
        // Rotate by half a turn into the right half plane.
        (-x, -y, if y >= 0 { PI } else { -PI })
    } else {
        (x, y, 0)
    };

    for (i, &step) in ATAN_TABLE.iter().enumerate() {
        let dx = x >> i;
        let dy = y >> i;
        if y > 0 {
            x += dy;
            y -= dx;
            z += step;
        } else {
            x -= dy;
            y += dx;
            z -= step;
        }
    }

    z
}
