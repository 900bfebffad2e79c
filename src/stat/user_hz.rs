use std::{
    ops::{Add, Div, Sub},
    str::FromStr,
};

/// a quantity of clock ticks, in the kernel's USER_HZ unit.
///
/// tick counters are cumulative since boot and monotonically non-decreasing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UserHz(u64);

// === impl UserHz ===

impl UserHz {
    pub fn is_zero(self) -> bool {
        let Self(hz) = self;
        hz == 0
    }
}

impl FromStr for UserHz {
    type Err = <u64 as FromStr>::Err;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl Add for UserHz {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        let (Self(lhs), Self(rhs)) = (self, rhs);
        Self(lhs + rhs)
    }
}

impl Sub for UserHz {
    type Output = Self;
    /// subtraction wraps: counters should never decrease, and a regressed
    /// counter produces a garbage delta rather than a panic.
    fn sub(self, rhs: Self) -> Self::Output {
        let (Self(lhs), Self(rhs)) = (self, rhs);
        Self(lhs.wrapping_sub(rhs))
    }
}

impl Div for UserHz {
    type Output = f64;
    fn div(self, rhs: Self) -> Self::Output {
        let to_float = |Self(hz)| -> f64 { hz as f64 };
        let (lhs, rhs) = (to_float(self), to_float(rhs));

        lhs / rhs
    }
}
