pub mod bench;
pub mod error;
pub mod history;
pub mod maze;
pub mod metrics;
pub mod session;
pub mod solver;
pub mod time;

#[cfg(test)]
mod test_helpers;

pub use error::MazeError;
pub use maze::{Cell, Direction, Grid, Position, Walls};
pub use metrics::{Comparison, RunMetrics};
pub use session::Session;
pub use solver::{Solution, StepAction, StepEvent, StepSink, Strategy};
