//! Output formatting for CLI.

mod progress;
mod summary;

pub use progress::ProgressBar;
pub use summary::SummaryWriter;
