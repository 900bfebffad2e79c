use std::{
    cell::RefCell,
    collections::VecDeque,
    fs::File,
    io::{self, BufReader, Cursor, Read},
    process::Command,
    time::Instant,
};

pub use self::{clock::*, procs::*, stats::*};

mod clock {
    use super::*;

    pub trait Clock {
        fn now(&self) -> Instant;
    }

    #[derive(Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> Instant {
            Instant::now()
        }
    }

    /// a mock clock.
    #[derive(Default)]
    pub struct MockClock {
        times: RefCell<VecDeque<Instant>>,
    }

    impl Clock for MockClock {
        fn now(&self) -> Instant {
            let MockClock { times } = self;

            times
                .borrow_mut()
                .pop_front()
                .expect("mock times should not be empty")
        }
    }

    impl MockClock {
        pub fn new(times: impl IntoIterator<Item = Instant>) -> Self {
            let times = times.into_iter().collect::<VecDeque<_>>();
            Self {
                times: RefCell::new(times),
            }
        }
    }
}

/// abstracts over providers of kernel statistics.
mod stats {
    use super::*;

    /// a source of kernel statistics.
    pub trait StatsSource {
        /// returns a reader.
        fn open(&self) -> io::Result<impl Read>;
    }

    /// stats backed by `/proc/stat`.
    #[derive(Default)]
    pub struct ProcStatFile;

    /// a mock stat source.
    ///
    /// yields each queued result once, in order.
    #[derive(Default)]
    pub struct MockStatFile {
        stats: RefCell<VecDeque<io::Result<String>>>,
    }

    // === impl ProcStatFile ===

    impl StatsSource for ProcStatFile {
        fn open(&self) -> io::Result<impl Read> {
            File::open(Self::STAT).map(BufReader::new)
        }
    }

    impl ProcStatFile {
        const STAT: &str = "/proc/stat";
    }

    // === impl MockStatFile ===

    impl StatsSource for MockStatFile {
        fn open(&self) -> io::Result<impl Read> {
            let Self { stats } = self;

            stats
                .borrow_mut()
                .pop_front()
                .expect("mock stats should not be empty")
                .map(Cursor::new)
        }
    }

    impl MockStatFile {
        pub fn new(stats: impl IntoIterator<Item = io::Result<String>>) -> Self {
            let stats = stats.into_iter().collect::<VecDeque<_>>();
            Self {
                stats: RefCell::new(stats),
            }
        }
    }
}

/// abstracts over providers of the process listing.
mod procs {
    use super::*;

    /// a source of process listings, sorted descending by cpu usage.
    ///
    /// a listing is one header line followed by `pid pcpu comm` rows.
    pub trait ProcSource {
        /// returns a reader.
        fn open(&self) -> io::Result<impl Read>;
    }

    /// listings backed by `ps(1)`.
    #[derive(Default)]
    pub struct PsCommand;

    /// a mock process listing.
    ///
    /// yields each queued result once, in order.
    #[derive(Default)]
    pub struct MockPsCommand {
        listings: RefCell<VecDeque<io::Result<String>>>,
    }

    // === impl PsCommand ===

    impl ProcSource for PsCommand {
        fn open(&self) -> io::Result<impl Read> {
            // blocks until the listing completes.
            Command::new(Self::PROGRAM)
                .args(Self::ARGS)
                .output()
                .map(|output| Cursor::new(output.stdout))
        }
    }

    impl PsCommand {
        const PROGRAM: &str = "ps";
        const ARGS: [&str; 3] = ["-eo", "pid,pcpu,comm", "--sort=-pcpu"];
    }

    // === impl MockPsCommand ===

    impl ProcSource for MockPsCommand {
        fn open(&self) -> io::Result<impl Read> {
            let Self { listings } = self;

            listings
                .borrow_mut()
                .pop_front()
                .expect("mock listings should not be empty")
                .map(Cursor::new)
        }
    }

    impl MockPsCommand {
        pub fn new(listings: impl IntoIterator<Item = io::Result<String>>) -> Self {
            let listings = listings.into_iter().collect::<VecDeque<_>>();
            Self {
                listings: RefCell::new(listings),
            }
        }
    }
}
