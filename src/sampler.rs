use {
    crate::{
        command::BarCommand,
        source::{Clock, ProcSource, ProcStatFile, PsCommand, StatsSource, SystemClock},
        stat::{Measurement, Snapshot, StatReadError},
        tier::Tier,
        topproc::TopProcess,
    },
    std::time::{Duration, Instant},
};

#[cfg(test)]
mod tests;

/// samples cpu load and formats status-bar updates.
///
/// failures never surface to the caller: a statistics read failure leaves the
/// previous command in place, and a process listing failure clears it. both
/// are logged, and the next scheduled call is the retry.
pub struct Sampler<C = SystemClock, S = ProcStatFile, P = PsCommand> {
    inner: Inner<C, S>,
    procs: P,
    command: String,
}

enum Inner<C, S> {
    Initialized {
        /// the clock being used to measure time.
        clock: C,
        /// the underlying source of kernel statistics.
        stats: S,
    },
    Running {
        /// the clock being used to measure time.
        clock: C,
        /// the underlying source of kernel statistics.
        stats: S,
        /// the last observed snapshot.
        last: Snapshot,
    },
}

/// a recording of the system's cpu load between two snapshots.
#[derive(Clone, Debug)]
pub struct Recording {
    /// when the recording began.
    pub start: Instant,
    /// when the recording ended.
    pub end: Instant,
    /// how the system's cpus spent the interval, in aggregate.
    pub cpu: Measurement,
}

/// === impl Sampler ===

impl<C: Default, S: Default, P: Default> Sampler<C, S, P> {
    /// creates a new [`Sampler`] over the default sources.
    pub fn new() -> Self {
        Self::with_sources(C::default(), S::default(), P::default())
    }
}

impl<C: Default, S: Default, P: Default> Default for Sampler<C, S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, S, P> Sampler<C, S, P> {
    /// creates a new [`Sampler`] over the given sources.
    pub fn with_sources(clock: C, stats: S, procs: P) -> Self {
        Self {
            inner: Inner::Initialized { clock, stats },
            procs,
            command: String::new(),
        }
    }

    /// the most recently formatted command.
    ///
    /// empty until two snapshots have been observed, and after a cycle whose
    /// process listing failed.
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl<C, S, P> Sampler<C, S, P>
where
    C: Clock + Default,
    S: StatsSource + Default,
    P: ProcSource,
{
    /// takes a snapshot and formats a status-bar update from the delta.
    pub fn update(&mut self) {
        let recording = match self.observe() {
            // a calibration pass; nothing to show yet.
            Ok(None) => {
                self.command.clear();
                return;
            }
            Ok(Some(recording)) => recording,
            Err(error) => {
                log::warn!("could not read cpu statistics: {error}");
                return;
            }
        };

        log::debug!(
            "observed {:.1}% load over {:?}",
            recording.cpu.load() * 100.0,
            recording.elapsed(),
        );

        // the snapshot baseline has already advanced; a listing failure only
        // costs this cycle's output.
        let top = match TopProcess::read(&self.procs) {
            Ok(top) => top,
            Err(error) => {
                log::warn!("could not determine top process: {error}");
                self.command.clear();
                return;
            }
        };

        let Recording { cpu, .. } = &recording;
        let load = cpu.load();
        let color = Tier::of(load).color();
        self.command = BarCommand {
            user: cpu.user_fraction(),
            system: cpu.system_fraction(),
            load,
            top: &top.label,
            color: &color,
        }
        .to_string();
    }

    /// returns a [`Recording`] of cpu time since this was last called.
    ///
    /// NB: by virtue of this being a comparison to the previous reading, this
    /// will return `Ok(None)` the first time it succeeds.
    fn observe(&mut self) -> Result<Option<Recording>, StatReadError> {
        let Self { inner, .. } = self;

        match inner {
            Inner::Initialized { clock, stats } => {
                let last = Snapshot::read(stats, clock)?;
                let clock = std::mem::take(clock);
                let stats = std::mem::take(stats);
                *inner = Inner::Running { clock, stats, last };
                Ok(None)
            }
            Inner::Running { clock, stats, last } => {
                let new = Snapshot::read(stats, clock)?;
                let prev = std::mem::replace(last, new.clone());
                let recording = Recording::new(prev, new);
                Ok(Some(recording))
            }
        }
    }
}

// === impl Recording ===

impl Recording {
    fn new(
        Snapshot {
            system: system_a,
            time: time_a,
        }: Snapshot,
        Snapshot {
            system: system_b,
            time: time_b,
        }: Snapshot,
    ) -> Recording {
        let cpu = Measurement::new(&system_a, &system_b);

        Self {
            start: time_a,
            end: time_b,
            cpu,
        }
    }

    /// the wall-clock window between the two snapshots.
    pub fn elapsed(&self) -> Duration {
        let Self { start, end, .. } = self;

        end.saturating_duration_since(*start)
    }
}
