#[path = "mod_memory.rs"]
mod memory_tests;
#[path = "mod_minisign.rs"]
mod minisign_tests;
