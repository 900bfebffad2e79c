use {
    crate::source::{Clock, StatsSource},
    std::{
        io::{self, BufRead, BufReader},
        num::ParseIntError,
        ops::{Deref, Not},
        str::FromStr,
        time::Instant,
    },
    thiserror::Error,
};

pub use self::{
    cpu_time::{CpuTime, Measurement},
    user_hz::UserHz,
};

mod cpu_time;
mod user_hz;


/// a snapshot of the system's cpu statistics at a moment in time.
///
/// only the aggregate "cpu" line is retained; the per-cpu "cpuN" lines are
/// parsed and discarded.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub system: CpuTime,
    pub time: Instant,
}

/// an entry in the `/proc/stat` kernel statistics table.
///
/// see `proc_stat(5)` for more information.
#[derive(Debug, Eq, PartialEq)]
pub enum Entry {
    /// how long the system as a whole (the "cpu" line) spent in each state.
    AllCpu { time: CpuTime },
    /// how long one cpu (a "cpuN" line) spent in each state.
    Cpu { id: CpuId, time: CpuTime },
    /// a counter that is recognized but not consumed.
    Other(Kind),
}

/// the non-cpu entry kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// pages paged in and out from disk.
    Page,
    /// swap pages brought in and out.
    Swap,
    /// interrupts serviced since boot.
    Intr,
    DiskIo,
    /// context switches since boot.
    Ctxt,
    /// boot time, in seconds since the epoch.
    Btime,
    /// forks since boot.
    Processes,
    /// processes currently runnable.
    ProcsRunning,
    /// processes currently blocked on i/o.
    ProcsBlocked,
    /// softirq counts, in total and per kind.
    SoftIrq,
}

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct CpuId(u8);

#[derive(Debug, Eq, Error, PartialEq)]
pub enum EntryParseError {
    #[error("unrecognized entry kind: {kind}")]
    UnrecognizedEntry { kind: String },
    #[error("invalid cpu id: {0}")]
    CpuIdParse(ParseIntError),
    #[error("invalid time value: {0}")]
    UserHzParse(ParseIntError),
    #[error("wrong number of cpu time columns")]
    CpuTime,
}

#[derive(Debug, Error)]
pub enum StatReadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Entry(#[from] EntryParseError),
    #[error("statistics contain no aggregate cpu entry")]
    MissingAggregate,
}

// === impl Snapshot ===

impl Snapshot {
    /// uses the given source to parse a snapshot of the cpu statistics.
    pub(crate) fn read(
        stats: &impl StatsSource,
        clock: &impl Clock,
    ) -> Result<Snapshot, StatReadError> {
        let time = clock.now();
        let reader = stats.open().map_err(StatReadError::Io)?;

        let mut system = None;
        for line in BufReader::new(reader).lines() {
            let line = line?;
            if let Entry::AllCpu { time: cpu } = line.parse::<Entry>()? {
                system.replace(cpu);
            }
        }

        system
            .ok_or(StatReadError::MissingAggregate)
            .map(|system| Snapshot { system, time })
    }
}

// === impl Entry ===

impl FromStr for Entry {
    type Err = EntryParseError;
    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let tokens = entry
            .split(' ')
            .filter(|t| t.is_empty().not())
            .collect::<Vec<_>>();
        let [label, tokens @ ..] = tokens.as_slice() else {
            return Err(EntryParseError::UnrecognizedEntry {
                kind: String::new(),
            });
        };

        // anything that is not a named counter must be a cpu line.
        if let Some(kind) = Kind::of(label) {
            return Ok(Self::Other(kind));
        }
        let id = CpuId::parse(label)?;

        let time = tokens
            .iter()
            .map(Deref::deref)
            .map(str::parse::<UserHz>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(EntryParseError::UserHzParse)
            .and_then(CpuTime::try_from)?;

        Ok(match id {
            Some(id) => Self::Cpu { id, time },
            None => Self::AllCpu { time },
        })
    }
}

// === impl Kind ===

impl Kind {
    /// matches a named counter label.
    fn of(label: &str) -> Option<Self> {
        match label {
            "page" => Some(Self::Page),
            "swap" => Some(Self::Swap),
            "intr" => Some(Self::Intr),
            "disk_io" => Some(Self::DiskIo),
            "ctxt" => Some(Self::Ctxt),
            "btime" => Some(Self::Btime),
            "processes" => Some(Self::Processes),
            "procs_running" => Some(Self::ProcsRunning),
            "procs_blocked" => Some(Self::ProcsBlocked),
            "softirq" => Some(Self::SoftIrq),
            _other => None,
        }
    }
}

// === impl CpuId ===

impl CpuId {
    /// parses a "cpu" or "cpuN" label.
    ///
    /// the bare aggregate label parses as `None`; a numbered label parses as
    /// that cpu's id.
    fn parse(label: &str) -> Result<Option<Self>, EntryParseError> {
        use EntryParseError::{CpuIdParse, UnrecognizedEntry};

        let suffix = label.strip_prefix("cpu").ok_or_else(|| UnrecognizedEntry {
            kind: label.to_owned(),
        })?;

        if suffix.is_empty() {
            return Ok(None);
        }

        suffix.parse::<u8>().map(Self).map(Some).map_err(CpuIdParse)
    }
}
