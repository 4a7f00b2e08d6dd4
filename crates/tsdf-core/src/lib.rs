pub mod fixed_precision;
pub mod solver;

pub use solver::{solve_linear_system, SINGULAR_PIVOT_EPSILON};

// Re-exports.
pub use approx;
pub use bytemuck;
pub use glam;
pub use static_assertions;
