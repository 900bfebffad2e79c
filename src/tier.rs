use std::env;

/// a display tier, bucketing the busy fraction into a color.
///
/// colors are read from the environment at render time, so the palette can
/// change without restarting the sampler.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tier {
    Red,
    Orange,
    Yellow,
    Label,
}

// === impl Tier ===

impl Tier {
    /// buckets a busy fraction.
    ///
    /// boundaries are inclusive at the lower bound: a load of exactly 0.70
    /// is red, not orange.
    pub fn of(load: f64) -> Self {
        if load >= 0.70 {
            Self::Red
        } else if load >= 0.30 {
            Self::Orange
        } else if load >= 0.10 {
            Self::Yellow
        } else {
            Self::Label
        }
    }

    /// the environment variable holding this tier's color.
    pub fn var(self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Orange => "ORANGE",
            Self::Yellow => "YELLOW",
            Self::Label => "LABEL_COLOR",
        }
    }

    /// this tier's color value.
    ///
    /// an unset variable yields an empty color string, not an error.
    pub fn color(self) -> String {
        env::var(self.var()).unwrap_or_default()
    }
}
