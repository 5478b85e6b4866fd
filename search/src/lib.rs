//! Gridstep Search: strategy-agnostic stepwise search over a grid.
//!
//! Every engine advances by exactly one unit of work per call and keeps all of
//! its state in plain owned containers, so a `clone()` is a complete,
//! independent snapshot. The harness builds undo on top of that.
//!
//! # Crate dependency graph
//!
//! ```text
//! gridstep_kernel  ←  gridstep_search  ←  gridstep_harness
//! (grid, maze, proof)  (frontier, engines)  (session, history, transcript)
//! ```
//!
//! # Key types
//!
//! - [`StepStrategy`](contract::StepStrategy): the one-step-per-call contract
//! - [`AStarState`](astar::AStarState): A* with Manhattan heuristic
//! - [`BidirectionalState`](bidirectional::BidirectionalState): alternating
//!   two-sided uniform-cost search
//! - [`ForwardChainingState`](forward_chaining::ForwardChainingState):
//!   reachability as production-rule deduction
//! - [`StrategyState`](state::StrategyState): the variant chosen at construction
//! - [`BestFirstFrontier`](frontier::BestFirstFrontier): min-priority frontier
//!   with creation-order tie-breaking

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod astar;
pub mod bidirectional;
pub mod contract;
pub mod error;
pub mod forward_chaining;
pub mod frontier;
pub mod node;
pub mod path;
pub mod policy;
pub mod state;
