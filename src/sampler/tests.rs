use {
    super::*,
    crate::source::{MockClock, MockPsCommand, MockStatFile},
    indoc::{formatdoc, indoc},
    std::io,
};

type MockSampler = Sampler<MockClock, MockStatFile, MockPsCommand>;

/// a statistics table whose aggregate line carries the given user, system,
/// and idle tick counts.
fn stats(user: u64, system: u64, idle: u64) -> io::Result<String> {
    Ok(formatdoc! {"
        cpu  {user} 0 {system} {idle} 0 0 0 0 0 0
        cpu0 {user} 0 {system} {idle} 0 0 0 0 0 0
        ctxt 115315
        btime 769041601
        procs_running 1
    "})
}

/// a process listing led by `firefox`.
fn listing() -> io::Result<String> {
    Ok(indoc! {"
            PID %CPU COMMAND
            312 42.0 firefox
              1  0.0 systemd
    "}
    .to_owned())
}

/// a clock yielding `n` strictly increasing times.
fn clock(n: u64) -> MockClock {
    let start = Instant::now();
    MockClock::new((0..n).map(|i| start + Duration::from_secs(i)))
}

#[test]
fn first_update_is_a_calibration_pass() {
    let mut sampler = MockSampler::with_sources(
        clock(1),
        MockStatFile::new([stats(100, 50, 850)]),
        MockPsCommand::new([]),
    );

    sampler.update();
    assert_eq!(sampler.command(), "");
}

#[test]
fn second_update_formats_the_delta() {
    let mut sampler = MockSampler::with_sources(
        clock(2),
        MockStatFile::new([stats(100, 50, 850), stats(150, 70, 900)]),
        MockPsCommand::new([listing()]),
    );

    sampler.update();
    sampler.update();

    // deltas {50, 20, 50} of a 120-tick window: 41.67% user, 16.67% system,
    // 58% overall. the color depends on the ambient environment.
    assert!(sampler.command().starts_with(
        "--push cpu.sys 16.67 --push cpu.user 41.67 \
         --set cpu.top label='firefox' \
         --set cpu.percent label=58% label.color="
    ));
}

#[test]
fn identical_snapshots_render_as_idle() {
    let mut sampler = MockSampler::with_sources(
        clock(2),
        MockStatFile::new([stats(100, 50, 850), stats(100, 50, 850)]),
        MockPsCommand::new([listing()]),
    );

    sampler.update();
    sampler.update();

    let command = sampler.command();
    assert!(command.starts_with("--push cpu.sys 0.00 --push cpu.user 0.00 "));
    assert!(command.contains("label=0%"));
}

#[test]
fn read_failure_preserves_command_and_baseline() {
    let mut sampler = MockSampler::with_sources(
        clock(4),
        MockStatFile::new([
            stats(100, 50, 850),
            stats(150, 70, 900),
            Err(io::Error::from(io::ErrorKind::PermissionDenied)),
            stats(250, 70, 1000),
        ]),
        MockPsCommand::new([listing(), listing()]),
    );

    sampler.update();
    sampler.update();
    let before = sampler.command().to_owned();

    // the failed cycle changes nothing.
    sampler.update();
    assert_eq!(sampler.command(), before);

    // the next delta is measured against the snapshot before the failure:
    // {100, 0, 100} of a 200-tick window is a 50% load.
    sampler.update();
    assert!(sampler.command().contains("label=50%"));
}

#[test]
fn listing_failure_clears_output_but_advances_baseline() {
    let mut sampler = MockSampler::with_sources(
        clock(3),
        MockStatFile::new([
            stats(100, 50, 850),
            stats(150, 70, 900),
            stats(250, 70, 1000),
        ]),
        MockPsCommand::new([
            Err(io::Error::from(io::ErrorKind::NotFound)),
            listing(),
        ]),
    );

    sampler.update();
    sampler.update();

    // no listing, no output for this cycle.
    assert_eq!(sampler.command(), "");

    // the baseline still advanced: the next delta spans {100, 0, 100}, not
    // the {150, 20, 150} it would had the failed cycle been discarded.
    sampler.update();
    let command = sampler.command();
    assert!(command.starts_with("--push cpu.sys 0.00 --push cpu.user 50.00 "));
    assert!(command.contains("label=50%"));
}

#[test]
fn first_read_failure_leaves_the_sampler_uncalibrated() {
    let mut sampler = MockSampler::with_sources(
        clock(3),
        MockStatFile::new([
            Err(io::Error::from(io::ErrorKind::PermissionDenied)),
            stats(100, 50, 850),
            stats(150, 70, 900),
        ]),
        MockPsCommand::new([listing()]),
    );

    // the failed read does not count as a calibration pass.
    sampler.update();
    sampler.update();
    assert_eq!(sampler.command(), "");

    sampler.update();
    assert!(sampler.command().contains("label=58%"));
}

#[test]
fn statistics_without_an_aggregate_line_are_a_read_failure() {
    let mut sampler = MockSampler::with_sources(
        clock(2),
        MockStatFile::new([Ok("cpu0 100 0 50 850 0 0 0 0 0 0\n".to_owned())]),
        MockPsCommand::new([]),
    );

    sampler.update();
    assert_eq!(sampler.command(), "");
}
