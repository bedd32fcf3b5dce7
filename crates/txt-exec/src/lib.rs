pub mod process;
pub mod runner;

pub use process::{run, ProcessError};
pub use runner::{MockRunner, ProcessRunner, RecordedCall, SystemRunner};
