//! Integration tests for result futures, executors and the rfut binary

mod cli_binary;
mod latch_threads;
mod main_loop_dispatch;
mod map_chains;
