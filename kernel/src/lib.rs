//! Gridstep Kernel: the grid model and its deterministic support code.
//!
//! # API Surface
//!
//! - [`grid`] -- `Position`, `Grid`, `GridConfig` and the validity predicate
//! - [`maze`] -- random solvable obstacle sets and BFS reachability
//! - [`proof`] -- canonical JSON bytes and domain-separated content hashing
//!
//! # Module Dependency Direction
//!
//! `grid` ← `maze`, `proof` stands alone.
//!
//! The kernel knows nothing about search strategies. Everything above it
//! (`gridstep_search`, `gridstep_harness`) consumes a validated [`grid::Grid`].

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod grid;
pub mod maze;
pub mod proof;
