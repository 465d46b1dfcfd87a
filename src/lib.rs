//! Rivista: a snapshot-driven listing and derivation engine for a small blog.
//!
//! One full snapshot of posts is fetched from the remote Post Store per page
//! lifecycle; filtering, pagination, aggregation and story selection are all
//! derived from that snapshot in memory without mutating it.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod util;
