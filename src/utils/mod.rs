pub mod decimal;
mod io_utils;
pub mod math;
mod model;
mod readers;
mod region;
mod util;

pub use io_utils::create_writer;
pub use model::{ModelKind, QualityMode};
pub use readers::{open_table_reader, table_lines};
pub use region::GenomicRegion;
pub use util::{handle_error_and_exit, normalize_contig, parse_field, Result};
