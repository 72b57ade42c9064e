use crate::field::blend::{blend, blend_derivative, lerp};
use crate::field::hash::positional_hash;
use crate::field::permutation::PermutationTable;

/// Lattice settings for one layer of the fractal sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Octave {
    /// Lattice cells per axis across one tile.
    pub resolution: f64,
    pub amplitude: f64,
    pub seed: i64,
}

impl Octave {
    pub fn cell_size(&self, domain_width: f64, domain_height: f64) -> (f64, f64) {
        (
            domain_width / self.resolution,
            domain_height / self.resolution,
        )
    }
}

/// One octave's contribution. Slopes are with respect to the octave's
/// lattice coordinates, not domain units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OctaveSample {
    pub value: f64,
    pub slope_x: f64,
    pub slope_y: f64,
}

/// Blends the four hashed corners of the cell containing `(x, y)`.
///
/// The lattice wraps at the domain edge, so the result is periodic in
/// `domain_width` and `domain_height` over the whole real plane.
pub fn evaluate_octave(
    table: &PermutationTable,
    x: f64,
    y: f64,
    domain_width: f64,
    domain_height: f64,
    octave: &Octave,
) -> OctaveSample {
    let resolution = octave.resolution;
    let (cell_w, cell_h) = octave.cell_size(domain_width, domain_height);
    let cells = resolution.ceil();
    let side = table.side() as f64;

    let cx = wrap(x / cell_w, resolution);
    let cy = wrap(y / cell_h, resolution);
    let (tx, ty) = (cx.fract(), cy.fract());
    let (fx0, fy0) = (cx.floor(), cy.floor());

    // Corner arithmetic stays in f64 until reduced to the hash domain, so
    // lattices wider than i64 alias instead of overflowing.
    let x0 = lattice_index(fx0, side);
    let y0 = lattice_index(fy0, side);
    let x1 = lattice_index(next_corner(fx0, cells), side);
    let y1 = lattice_index(next_corner(fy0, cells), side);

    let seed = octave.seed;
    let ul = positional_hash(table, x0, y0, seed);
    let ur = positional_hash(table, x1, y0, seed);
    let bl = positional_hash(table, x0, y1, seed);
    let br = positional_hash(table, x1, y1, seed);

    let x_blend = blend(tx);
    let y_blend = blend(ty);

    // Rows first: value and y slope.
    let v0 = lerp(ul, ur, x_blend);
    let v1 = lerp(bl, br, x_blend);
    let value = lerp(v0, v1, y_blend) - 0.5;
    let slope_y = (v1 - v0) * blend_derivative(ty);

    // Columns: x slope.
    let s0 = lerp(ul, bl, y_blend);
    let s1 = lerp(ur, br, y_blend);
    let slope_x = (s1 - s0) * blend_derivative(tx);

    OctaveSample {
        value,
        slope_x,
        slope_y,
    }
}

/// Non-negative remainder in `[0, period)`.
#[inline]
fn wrap(v: f64, period: f64) -> f64 {
    let r = v.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs.
    if r >= period || !r.is_finite() {
        0.0
    } else {
        r
    }
}

/// Corner after `corner`, wrapping to 0 at the lattice edge.
#[inline]
fn next_corner(corner: f64, cells: f64) -> f64 {
    let next = corner + 1.0;
    if next >= cells {
        0.0
    } else {
        next
    }
}

/// Reduces a whole-number lattice coordinate into `[0, side)`.
#[inline]
fn lattice_index(corner: f64, side: f64) -> i64 {
    corner.rem_euclid(side) as i64
}
