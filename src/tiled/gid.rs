//! Global tile ID (GID) arithmetic.
//!
//! A GID is a map-wide 1-based tile index spanning the union of all tilesets,
//! with the top three bits reserved for flip flags. GID 0 means "no tile".
//! Flip bits are masked off for range computation only; the stored values
//! keep them, except object-layer sprites which never carry flip semantics.

use crate::error::{CookError, Result};

use super::raw::RawTilesetRef;

/// Horizontal, vertical and diagonal flip flags.
pub const FLIP_MASK: u32 = 0x8000_0000 | 0x4000_0000 | 0x2000_0000;

/// Min/max of the non-zero GIDs in a sequence, flip bits masked off.
///
/// Returns `None` when the sequence is empty or holds only empty cells.
pub fn gid_range<I>(gids: I) -> Option<(u32, u32)>
where
    I: IntoIterator<Item = u32>,
{
    let mut range: Option<(u32, u32)> = None;

    for gid in gids {
        if gid == 0 {
            continue;
        }
        let gid = gid & !FLIP_MASK;
        range = Some(match range {
            Some((min, max)) => (min.min(gid), max.max(gid)),
            None => (gid, gid),
        });
    }

    range
}

/// Resolve the single tileset a GID range belongs to.
///
/// Walks the references in ascending `firstgid` order: the last entry
/// qualifies on `min >= firstgid` alone, every other entry additionally
/// requires `max` to fall short of its successor's `firstgid`. Returns the
/// tileset index and its `firstgid`, `None` for an empty range, and
/// [`CookError::MultiTilesetReference`] when the range spans tilesets.
pub fn resolve_tileset(
    tilesets: &[RawTilesetRef],
    range: Option<(u32, u32)>,
    layer: &str,
) -> Result<Option<(usize, u32)>> {
    let Some((min_gid, max_gid)) = range else {
        return Ok(None);
    };

    let last = tilesets.len().saturating_sub(1);
    for (index, tileset) in tilesets.iter().enumerate() {
        let first_gid = tileset.firstgid;
        if index == last {
            if min_gid >= first_gid {
                return Ok(Some((index, first_gid)));
            }
        } else if min_gid >= first_gid && max_gid < tilesets[index + 1].firstgid {
            return Ok(Some((index, first_gid)));
        }
    }

    Err(CookError::MultiTilesetReference {
        layer: layer.to_string(),
    })
}

/// Rewrite GIDs in place to 1-based local tile indices.
///
/// Non-zero entries have the `firstgid` offset removed, keeping index 0 free
/// as the "no tile" sentinel. Flip bits survive untouched: the subtraction
/// never borrows into the top three bits because the masked value is at
/// least `first_gid`.
pub fn rewrite_local(gids: &mut [u32], first_gid: u32) {
    for gid in gids.iter_mut() {
        if *gid != 0 {
            *gid -= first_gid - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn refs(firstgids: &[u32]) -> Vec<RawTilesetRef> {
        firstgids
            .iter()
            .map(|&firstgid| RawTilesetRef {
                firstgid,
                source: format!("ts{}.tsx", firstgid),
            })
            .collect()
    }

    #[test]
    fn test_range_skips_zero() {
        assert_eq!(gid_range(vec![0, 5, 3, 0, 9]), Some((3, 9)));
    }

    #[test]
    fn test_range_empty_and_all_zero() {
        assert_eq!(gid_range(vec![]), None);
        assert_eq!(gid_range(vec![0, 0, 0]), None);
    }

    #[test]
    fn test_range_masks_flip_bits() {
        // 5 flipped horizontally+diagonally still compares as 5
        let flipped = 5 | 0x8000_0000 | 0x2000_0000;
        assert_eq!(gid_range(vec![flipped, 7]), Some((5, 7)));
    }

    #[test]
    fn test_resolve_single_tileset() {
        let tilesets = refs(&[1, 65, 129]);

        assert_eq!(
            resolve_tileset(&tilesets, Some((1, 64)), "a").unwrap(),
            Some((0, 1))
        );
        assert_eq!(
            resolve_tileset(&tilesets, Some((65, 128)), "a").unwrap(),
            Some((1, 65))
        );
        // the last tileset qualifies on min alone
        assert_eq!(
            resolve_tileset(&tilesets, Some((129, 500)), "a").unwrap(),
            Some((2, 129))
        );
    }

    #[test]
    fn test_resolve_cross_tileset_span() {
        let tilesets = refs(&[1, 65]);
        let result = resolve_tileset(&tilesets, Some((30, 80)), "ground");

        assert!(matches!(
            result,
            Err(CookError::MultiTilesetReference { layer }) if layer == "ground"
        ));
    }

    #[test]
    fn test_resolve_empty_range() {
        let tilesets = refs(&[1, 65]);
        assert_eq!(resolve_tileset(&tilesets, None, "a").unwrap(), None);
    }

    #[test]
    fn test_resolve_no_tilesets() {
        let result = resolve_tileset(&[], Some((1, 4)), "a");
        assert!(matches!(
            result,
            Err(CookError::MultiTilesetReference { .. })
        ));
    }

    #[test]
    fn test_rewrite_is_one_based() {
        let tilesets = refs(&[1, 65]);
        let mut data = vec![0, 65, 70, 0, 128];

        let (index, first_gid) = resolve_tileset(&tilesets, gid_range(data.iter().copied()), "a")
            .unwrap()
            .unwrap();
        rewrite_local(&mut data, first_gid);

        assert_eq!(index, 1);
        assert_eq!(data, vec![0, 1, 6, 0, 64]);
    }

    #[test]
    fn test_rewrite_preserves_flip_bits() {
        let flipped = 70 | 0x4000_0000;
        let mut data = vec![flipped];

        rewrite_local(&mut data, 65);

        assert_eq!(data[0] & FLIP_MASK, 0x4000_0000);
        assert_eq!(data[0] & !FLIP_MASK, 6);
    }

    #[test]
    fn test_rewrite_local_range_property() {
        // every value in [firstgid, next firstgid) lands in [1, count]
        let mut data: Vec<u32> = (65..=128).collect();
        rewrite_local(&mut data, 65);

        assert_eq!(*data.first().unwrap(), 1);
        assert_eq!(*data.last().unwrap(), 64);
    }
}
