use std::fmt;
use std::str::FromStr;

/// Whole-dollar amount. Purse balances and donations never carry cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dollars(u32);

impl Dollars {
    pub const ZERO: Dollars = Dollars(0);

    pub const fn new(value: u32) -> Self {
        Dollars(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Dollars)
    }
}

impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Parses the bare integer form used by select values (`"10"`, not `"$10"`).
impl FromStr for Dollars {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(Dollars)
    }
}
