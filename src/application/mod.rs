//! Application services layer: the derivation engine and its collaborator seams.

pub mod admin;
pub mod aggregates;
pub mod error;
pub mod feed;
pub mod filter;
pub mod pagination;
pub mod store;
