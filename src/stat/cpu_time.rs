use super::*;

/// the ten time columns of a `/proc/stat` cpu entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CpuTime {
    /// time spent in user mode.
    pub user: UserHz,
    /// time spent in user mode with low priority (nice).
    pub nice: UserHz,
    /// time spent in system mode.
    pub system: UserHz,
    /// time spent in the idle task.
    pub idle: UserHz,
    /// time waiting for i/o to complete. not reliable.
    pub iowait: UserHz,
    /// time servicing interrupts.
    pub irq: UserHz,
    /// time servicing softirqs.
    pub softirq: UserHz,
    /// stolen time, spent in other operating systems when virtualized.
    pub steal: UserHz,
    /// time spent running guest virtual cpus.
    pub guest: UserHz,
    /// time spent running niced guest virtual cpus.
    pub guest_nice: UserHz,
}

/// the difference between two [`CpuTime`]s, in the categories that the load
/// formula is defined over.
///
/// nice ticks are parsed but do not participate; the busy fraction is the
/// user and system shares of `user + system + idle`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Measurement {
    /// user ticks elapsed between the two readings.
    user: UserHz,
    /// system ticks elapsed between the two readings.
    system: UserHz,
    /// idle ticks elapsed between the two readings.
    idle: UserHz,
}

// === impl Measurement ===

impl Measurement {
    pub fn new(a: &CpuTime, b: &CpuTime) -> Self {
        Self {
            user: b.user - a.user,
            system: b.system - a.system,
            idle: b.idle - a.idle,
        }
    }

    /// the share of elapsed ticks spent in user mode.
    pub fn user_fraction(&self) -> f64 {
        self.fraction(self.user)
    }

    /// the share of elapsed ticks spent in system mode.
    pub fn system_fraction(&self) -> f64 {
        self.fraction(self.system)
    }

    /// the share of elapsed ticks spent idle.
    pub fn idle_fraction(&self) -> f64 {
        self.fraction(self.idle)
    }

    /// the busy fraction: user and system time, taken together.
    pub fn load(&self) -> f64 {
        self.user_fraction() + self.system_fraction()
    }

    fn fraction(&self, part: UserHz) -> f64 {
        let total = self.total();

        // two identical readings elapse zero ticks; report an idle system
        // rather than dividing by zero.
        if total.is_zero() {
            return 0.0;
        }

        part / total
    }

    fn total(&self) -> UserHz {
        let Self { user, system, idle } = *self;

        user + system + idle
    }
}

// === impl CpuTime ===

impl TryFrom<Vec<UserHz>> for CpuTime {
    type Error = EntryParseError;
    fn try_from(times: Vec<UserHz>) -> Result<Self, Self::Error> {
        <_ as TryInto<[_; 10]>>::try_into(times)
            .map(Self::from)
            .map_err(|_| EntryParseError::CpuTime)
    }
}

impl From<[UserHz; 10]> for CpuTime {
    fn from(
        [
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
            guest,
            guest_nice,
        ]: [UserHz; 10],
    ) -> Self {
        Self {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
            guest,
            guest_nice,
        }
    }
}
