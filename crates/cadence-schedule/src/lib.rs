//! # cadence-schedule
//!
//! Temporal scheduling of resource-bound operations.
//!
//! A [`Schedule`] is an ordered list of [`TimeSlot`]s. Each slot holds
//! operations that run at the same time, so no two of them share a
//! resource. The crate places operations into slots, answers structural
//! queries over the result, and merges or splits schedules.
//!
//! ## Features
//!
//! - **Insertion**: NEW, NEW_THEN_INLINE, INLINE and EARLIEST placement,
//!   range and frontier insertion, atomic batch edits
//! - **Queries**: next/previous use of resources, reachable frontiers,
//!   operations between frontiers, terminal-match checks
//! - **Merging**: slot-wise zip and sliding "tetris" concatenation
//! - **Partitioning**: independent resource sets and factorization
//!
//! ## Quick Start
//!
//! ```rust
//! use cadence_schedule::{InsertStrategy, Instruction, Schedule, ScheduleView};
//! use cadence_primitives::Resource;
//!
//! let mut schedule = Schedule::new();
//! schedule.append(Instruction::on_lines("h", &[0]), InsertStrategy::Earliest)?;
//! schedule.append(Instruction::on_lines("cz", &[0, 1]), InsertStrategy::Earliest)?;
//! schedule.append(Instruction::on_lines("x", &[2]), InsertStrategy::Earliest)?;
//!
//! assert_eq!(schedule.len(), 2);
//! assert_eq!(schedule.next_slot_operating_on(&[Resource::line(1)], 0, None)?, Some(1));
//! # Ok::<(), cadence_schedule::ScheduleError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod acceptance;
mod bucket_queue;
mod error;
mod footprint;
mod frontier;
mod frozen;
mod instruction;
mod merge;
mod mutation;
mod operation;
mod partition;
mod schedule;
mod strategy;
mod time_slot;
mod view;

pub use acceptance::Acceptance;
pub use bucket_queue::BucketPriorityQueue;
pub use error::{ScheduleError, ScheduleResult};
pub use footprint::KeyFootprint;
pub use frontier::Frontier;
pub use frozen::FrozenSchedule;
pub use instruction::Instruction;
pub use operation::{OpTree, Operation, RemapResources};
pub use schedule::Schedule;
pub use strategy::{Alignment, InsertStrategy};
pub use time_slot::TimeSlot;
pub use view::ScheduleView;
