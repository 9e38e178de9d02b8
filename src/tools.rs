//! Single-purpose read and table transforms.

pub mod fastq_filters;
pub use fastq_filters::*;

pub mod unmapped;
pub use unmapped::*;

pub mod regex_scan;
pub use regex_scan::*;

pub mod merge_table;
pub use merge_table::*;
