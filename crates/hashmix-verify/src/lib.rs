#![deny(missing_docs)]
#![doc = "Dump parsing and cross-implementation consistency checks for hashmix."]

pub mod compare;
pub mod directory;
pub mod dump;

pub use compare::{compare_dumps, Comparison, Mismatch, MismatchKind, Tolerance};
pub use directory::{check_directory, collect_runs, CheckReport, DumpFileName, PairReport, RunReport};
pub use dump::{parse_dump, Dump, Fields, Fixed, Record};
