// Pure logic modules - no I/O imports allowed.

pub mod lock_policy;
pub mod projection;
pub mod range_toggle;
pub mod sorting;
