//! # Sliding Puzzle Solver Library
//!
//! Decides whether an N×N sliding-tile puzzle can reach its goal and, when
//! it can, finds a shortest sequence of slides.
//!
//! ## Modules
//! - `board`: the immutable configuration (`Board`), its Hamming and
//!   Manhattan scores, twins and neighbors, and the `Move` directions.
//! - `solver`: the A* engine that races a board against its twin to prove
//!   unsolvability (`Solver`, `SolverOptions`).
//! - `error`: error types for construction, parsing and search.
//! - `utils`: parsing boards from their textual form.

pub mod board;
pub mod error;
pub mod solver;
pub mod utils;

pub use board::{Board, Move};
pub use error::{InvalidArrangement, ParseError, SolveError};
pub use solver::{Priority, Solver, SolverOptions};
