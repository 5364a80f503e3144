pub mod cells;
pub mod resolve;
pub mod single;
pub mod wavefront;

pub use cells::{Cell, GrowState, UNLABELED};
pub use resolve::{Candidate, resolve};
pub use wavefront::Propagation;
