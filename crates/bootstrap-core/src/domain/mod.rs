//! Domain model (launch ids, argument partitioning, classpath resolution).

pub mod args;
pub mod classpath;
pub mod ids;

pub use self::args::{LOAD_FLAG, LaunchArgs, USAGE};
pub use self::classpath::{ResolvedClasspath, archive_extension, is_archive, resolve_classpath};
pub use self::ids::LaunchId;
