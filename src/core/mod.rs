//! Core board logic: grid, generator, matching, scoring, session, snapshot.
//!
//! Everything in here is deterministic and free of I/O; the terminal shell
//! and any other frontend drive it through `BoardSession` and observe it
//! through drained events.

pub mod board;
pub mod matches;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use board::Grid;
pub use matches::{find_all_matches, find_matches, MatchDescriptor};
pub use rng::{SimpleRng, TokenGenerator};
pub use scoring::{size_multiplier, ScoreState};
pub use session::{BoardEvent, BoardSession, Phase};
pub use snapshot::BoardSnapshot;
