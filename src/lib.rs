//! Tileable 2D fractal value noise that returns analytic partial derivatives
//! alongside each value.

pub mod field;
