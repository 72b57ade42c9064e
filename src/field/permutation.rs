use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::field::error::NoiseError;

/// Default side of the hash domain.
pub const DEFAULT_TABLE_SIDE: u32 = 256;

/// Largest supported side; keeps `side * side` entries addressable and the
/// table at a sane size.
pub const MAX_TABLE_SIDE: u32 = 4096;

/// A random bijection over `[0, side * side)`, used as the lookup table
/// behind [`positional_hash`](crate::field::hash::positional_hash).
///
/// Built once, then frozen. Share it between evaluators with an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationTable {
    side: u32,
    values: Vec<u32>,
}

impl PermutationTable {
    /// Shuffles `[0, side * side)` by repeatedly drawing a random remaining
    /// entry from `rng` until the source is exhausted.
    pub fn build<R: Rng + ?Sized>(side: u32, rng: &mut R) -> Result<Self, NoiseError> {
        let len = table_len(side)?;
        let mut source: Vec<u32> = (0..len as u32).collect();
        let mut values = Vec::with_capacity(len);
        for _ in 0..len {
            values.push(draw_card(&mut source, rng)?);
        }
        log::info!("built permutation table: side {side}, {len} entries");
        Ok(Self { side, values })
    }

    pub fn with_seed(side: u32, seed: u64) -> Result<Self, NoiseError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::build(side, &mut rng)
    }

    /// `table[i] = i`. Makes hashes hand-computable.
    pub fn identity(side: u32) -> Result<Self, NoiseError> {
        let len = table_len(side)?;
        Ok(Self {
            side,
            values: (0..len as u32).collect(),
        })
    }

    /// Wraps caller-supplied entries after checking they form a bijection
    /// over `[0, side * side)`.
    pub fn from_values(side: u32, values: Vec<u32>) -> Result<Self, NoiseError> {
        let len = table_len(side)?;
        if values.len() != len {
            return Err(NoiseError::NotAPermutation {
                len: values.len(),
                reason: format!("expected {len} entries for side {side}"),
            });
        }

        let mut seen = vec![false; len];
        for &v in &values {
            let Some(slot) = seen.get_mut(v as usize) else {
                return Err(NoiseError::NotAPermutation {
                    len,
                    reason: format!("entry {v} is out of range"),
                });
            };
            if *slot {
                return Err(NoiseError::NotAPermutation {
                    len,
                    reason: format!("entry {v} appears more than once"),
                });
            }
            *slot = true;
        }

        Ok(Self { side, values })
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }
}

fn table_len(side: u32) -> Result<usize, NoiseError> {
    if side == 0 || side > MAX_TABLE_SIDE {
        return Err(NoiseError::InvalidTableSide(side));
    }
    Ok(side as usize * side as usize)
}

/// Removes and returns a uniformly chosen entry of `source`.
fn draw_card<R: Rng + ?Sized>(source: &mut Vec<u32>, rng: &mut R) -> Result<u32, NoiseError> {
    if source.is_empty() {
        return Err(NoiseError::EmptyDrawSource);
    }
    let index = rng.random_range(0..source.len());
    Ok(source.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bijection(table: &PermutationTable) {
        let mut sorted = table.values().to_vec();
        sorted.sort_unstable();
        for (i, v) in sorted.iter().enumerate() {
            assert_eq!(*v as usize, i);
        }
    }

    #[test]
    fn seeded_table_is_a_bijection() {
        let table = PermutationTable::with_seed(DEFAULT_TABLE_SIDE, 88883).unwrap();
        assert_eq!(table.len(), 65536);
        assert_bijection(&table);
    }

    #[test]
    fn tables_from_any_rng_are_bijections() {
        for seed in 0..8 {
            let table = PermutationTable::with_seed(16, seed).unwrap();
            assert_bijection(&table);
        }
        let mut rng = rand::rng();
        assert_bijection(&PermutationTable::build(32, &mut rng).unwrap());
    }

    #[test]
    fn same_seed_builds_same_table() {
        let a = PermutationTable::with_seed(64, 7).unwrap();
        let b = PermutationTable::with_seed(64, 7).unwrap();
        let c = PermutationTable::with_seed(64, 8).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn drawing_from_empty_source_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut source = vec![5];
        assert_eq!(draw_card(&mut source, &mut rng), Ok(5));
        assert_eq!(
            draw_card(&mut source, &mut rng),
            Err(NoiseError::EmptyDrawSource)
        );
    }

    #[test]
    fn identity_maps_index_to_itself() {
        let table = PermutationTable::identity(8).unwrap();
        assert_eq!(table.len(), 64);
        assert!((0..64).all(|i| table.get(i) == Some(i as u32)));
        assert_eq!(table.get(64), None);
    }

    #[test]
    fn rejects_bad_sides() {
        assert_eq!(
            PermutationTable::identity(0),
            Err(NoiseError::InvalidTableSide(0))
        );
        assert!(PermutationTable::with_seed(MAX_TABLE_SIDE + 1, 0).is_err());
    }

    #[test]
    fn from_values_checks_bijection() {
        assert!(PermutationTable::from_values(2, vec![3, 1, 0, 2]).is_ok());
        assert!(matches!(
            PermutationTable::from_values(2, vec![0, 1, 1, 2]),
            Err(NoiseError::NotAPermutation { .. })
        ));
        assert!(matches!(
            PermutationTable::from_values(2, vec![0, 1, 2, 4]),
            Err(NoiseError::NotAPermutation { .. })
        ));
        assert!(matches!(
            PermutationTable::from_values(2, vec![0, 1, 2]),
            Err(NoiseError::NotAPermutation { .. })
        ));
    }
}
