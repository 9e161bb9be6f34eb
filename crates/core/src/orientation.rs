//! The six axis-permutation rotations of a rectangular item.
//!
//! An orientation maps each of the item's original dimensions onto a
//! container axis. Since boxes are axis-aligned there are exactly six,
//! one per permutation of `(0, 1, 2)`.

use crate::geometry::Dims;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis permutation `(aw, ad, ah)`: the container's width axis carries
/// original dimension `aw`, depth carries `ad`, height carries `ah`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Orientation {
    aw: u8,
    ad: u8,
    ah: u8,
}

impl Orientation {
    /// The identity orientation: no rotation.
    pub const IDENTITY: Orientation = Orientation { aw: 0, ad: 1, ah: 2 };

    /// All six orientations in the fixed enumeration order used by
    /// placement search. This order is part of the tie-break contract.
    pub const ALL: [Orientation; 6] = [
        Orientation { aw: 0, ad: 1, ah: 2 },
        Orientation { aw: 0, ad: 2, ah: 1 },
        Orientation { aw: 1, ad: 0, ah: 2 },
        Orientation { aw: 1, ad: 2, ah: 0 },
        Orientation { aw: 2, ad: 0, ah: 1 },
        Orientation { aw: 2, ad: 1, ah: 0 },
    ];

    /// Creates an orientation, rejecting any triple that is not a
    /// permutation of `{0, 1, 2}`.
    pub fn new(aw: u8, ad: u8, ah: u8) -> Result<Self> {
        let mut seen = [false; 3];
        for axis in [aw, ad, ah] {
            if axis > 2 || seen[axis as usize] {
                return Err(Error::InvalidArgument(format!(
                    "orientation ({aw}, {ad}, {ah}) is not a permutation of (0, 1, 2)"
                )));
            }
            seen[axis as usize] = true;
        }
        Ok(Self { aw, ad, ah })
    }

    /// The permutation triple `(aw, ad, ah)`.
    pub fn axes(&self) -> (u8, u8, u8) {
        (self.aw, self.ad, self.ah)
    }

    /// Remaps original dimensions into effective dimensions under this
    /// orientation.
    pub fn apply(&self, dims: Dims) -> Dims {
        let original = [dims.w, dims.d, dims.h];
        Dims::new(
            original[self.aw as usize],
            original[self.ad as usize],
            original[self.ah as usize],
        )
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_preserves_dims() {
        let dims = Dims::new(3, 2, 1);
        assert_eq!(Orientation::IDENTITY.apply(dims), dims);
    }

    #[test]
    fn test_apply_remaps() {
        // Width axis carries original depth, depth carries original width.
        let orient = Orientation::new(1, 0, 2).unwrap();
        assert_eq!(orient.apply(Dims::new(2, 3, 1)), Dims::new(3, 2, 1));
    }

    #[test]
    fn test_all_orientations_are_the_six_permutations() {
        let dims = Dims::new(2, 3, 5);
        let effective: HashSet<(u32, u32, u32)> = Orientation::ALL
            .iter()
            .map(|o| {
                let e = o.apply(dims);
                (e.w, e.d, e.h)
            })
            .collect();

        let expected: HashSet<(u32, u32, u32)> = [
            (2, 3, 5),
            (2, 5, 3),
            (3, 2, 5),
            (3, 5, 2),
            (5, 2, 3),
            (5, 3, 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(effective, expected);
    }

    #[test]
    fn test_invalid_triples_rejected() {
        assert!(Orientation::new(0, 0, 2).is_err());
        assert!(Orientation::new(0, 1, 3).is_err());
        assert!(Orientation::new(2, 2, 2).is_err());
    }

    #[test]
    fn test_enumeration_order_is_stable() {
        assert_eq!(Orientation::ALL[0], Orientation::IDENTITY);
        assert_eq!(Orientation::ALL[2], Orientation::new(1, 0, 2).unwrap());
    }
}
