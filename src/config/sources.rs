pub(super) mod environment;
pub(super) mod explicit_file;
pub(super) mod global_file;
