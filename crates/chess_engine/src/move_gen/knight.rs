//! Knight geometry
//!
//! Knights move in an L-shape (2+1 or 1+2 squares) and jump over pieces, so
//! board occupancy never matters here.

use crate::types::Square;

/// Check whether a knight on `from` reaches `to`
#[inline]
pub(crate) fn reaches(from: Square, to: Square) -> bool {
    let (df, dr) = from.delta_to(to);
    let (df, dr) = (df.abs(), dr.abs());

    // Valid L-shape: exactly 2+1 or 1+2 squares
    (df == 2 && dr == 1) || (df == 1 && dr == 2)
}
