mod package;
mod summary;
mod unit;

pub use package::{write_directory, write_zip};
pub use summary::{BatchSummary, FileSummary};
pub use unit::{target_path_for, ConvertedUnit};
