pub mod matrix;
pub mod other;
pub mod polynomial;
pub mod polynomial_matrix;
pub mod traits;
pub mod zn;
