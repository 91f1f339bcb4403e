pub mod info;
pub mod query;
pub mod top;

use nthmax::{NonNumericPolicy, NthMaxService, NthMaxServiceBuilder};
use std::path::PathBuf;

/// Build the query service from global CLI flags.
pub fn build_service(base_dir: Option<PathBuf>, skip_non_numeric: bool) -> NthMaxService {
    let mut builder = NthMaxServiceBuilder::new();

    if let Some(dir) = base_dir {
        builder = builder.base_dir(dir);
    }
    if skip_non_numeric {
        builder = builder.non_numeric(NonNumericPolicy::Skip);
    }

    builder.build()
}
