
/// Letter grade derived from an (earned, total) point pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Grade a class by its absolute point deficit (`total - earned`).
    ///
    /// The thresholds are on points missed, not on a percentage, so a 95/100
    /// and a 995/1000 both grade as `A`.
    pub fn from_points(earned: i64, total: i64) -> Self {
        match total.saturating_sub(earned) {
            d if d <= 10 => Grade::A,
            d if d <= 20 => Grade::B,
            d if d <= 30 => Grade::C,
            d if d <= 40 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
