//! Library half of the `codebase` binary: logging setup and result rendering.

pub mod logging;
pub mod report;
