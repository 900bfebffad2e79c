use std::fmt::{self, Display};

/// one status-bar update instruction.
///
/// the token names (`cpu.sys`, `cpu.user`, `cpu.top`, `cpu.percent`) and the
/// trailing space are a compatibility contract with the bar process; they are
/// reproduced verbatim, not configurable.
#[derive(Clone, Debug, PartialEq)]
pub struct BarCommand<'a> {
    /// the user-mode busy fraction.
    pub user: f64,
    /// the system-mode busy fraction.
    pub system: f64,
    /// the overall busy fraction, user and system together.
    pub load: f64,
    /// the display label of the busiest process.
    pub top: &'a str,
    /// the color of the percent label.
    pub color: &'a str,
}

// === impl BarCommand ===

impl Display for BarCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            user,
            system,
            load,
            top,
            color,
        } = self;

        write!(
            f,
            "--push cpu.sys {:.2} \
             --push cpu.user {:.2} \
             --set cpu.top label='{}' \
             --set cpu.percent label={:.0}% label.color={} ",
            system * 100.0,
            user * 100.0,
            top,
            load * 100.0,
            color,
        )
    }
}
