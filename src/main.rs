//! a cpu load item for status bars.
//!
//! samples on a fixed interval and writes each formatted update instruction
//! to stdout, one per line, for the consumer to hand to the bar process.

use {
    cpubar::Sampler,
    std::{
        io::{self, Write},
        time::Duration,
    },
};

const INTERVAL: Duration = Duration::from_secs(1);

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut sampler: Sampler = Sampler::new();
    let mut stdout = io::stdout().lock();

    loop {
        sampler.update();

        // the first pass calibrates, and failed cycles publish nothing.
        let command = sampler.command();
        if !command.is_empty() {
            writeln!(stdout, "{command}")?;
            stdout.flush()?;
        }

        std::thread::sleep(INTERVAL);
    }
}
