// Aggregates per-module suites; one directory per src module.
mod _support;
mod api;
mod container;
mod signer;
mod utils;
