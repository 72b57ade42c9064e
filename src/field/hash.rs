use crate::field::permutation::PermutationTable;

/// Deterministic value in `[0, 1)` for a lattice point and seed.
///
/// Coordinates are reduced modulo the table side, so points `side` cells
/// apart share a value. Once an octave's resolution outgrows the side this
/// aliasing shows up as repetition inside the tile; that is the resolution
/// ceiling of the field and is accepted as is.
#[inline]
pub fn positional_hash(table: &PermutationTable, x: i64, y: i64, seed: i64) -> f64 {
    let side = table.side() as i64;
    let len = table.len() as i64;
    // Seed is reduced first so large or negative seeds cannot overflow the sum.
    let linear = x.rem_euclid(side) + y.rem_euclid(side) * side + seed.rem_euclid(len);
    let index = linear.rem_euclid(len) as usize;
    table.values()[index] as f64 / len as f64
}
