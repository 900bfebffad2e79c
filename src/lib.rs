//! a cpu load item for status bars.
//!
//! this crate samples the kernel's cumulative cpu tick counters, derives
//! user/system/idle percentages from the delta between consecutive samples,
//! finds the process currently consuming the most cpu, and formats the lot
//! into a single update instruction for a status-bar process.

pub use self::{
    command::BarCommand,
    sampler::{Recording, Sampler},
    stat::{
        CpuId, CpuTime, Entry, EntryParseError, Kind, Measurement, Snapshot, StatReadError, UserHz,
    },
    tier::Tier,
    topproc::{TopProcess, TopProcessError},
};

/// the status-bar instruction string.
mod command;

/// the sampler and its two-state lifecycle.
mod sampler;

/// seams to the host: clocks, kernel statistics, process listings.
pub mod source;

/// kernel statistics facilities.
///
/// this file provides tools to interact with `/proc/stat`.
mod stat;

/// load-to-color thresholding.
mod tier;

/// top-process discovery and label derivation.
mod topproc;
