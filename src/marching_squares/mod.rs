// Marching squares contour extraction over the occupancy grid
mod cases;
mod cell_context;
mod primitives;
mod types;
mod validator;

pub use cases::*;
pub use cell_context::*;
pub use primitives::*;
pub use types::*;
pub use validator::*;
