use serde::Serialize;

pub const HEALTHY_LBH: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthBand {
    Excellent,
    Good,
    NeedsImprovement,
}

impl HealthBand {
    pub fn from_lbh(lbh: f64) -> Self {
        if lbh >= 80.0 {
            HealthBand::Excellent
        } else if lbh >= HEALTHY_LBH {
            HealthBand::Good
        } else {
            HealthBand::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthBand::Excellent => "Excellent",
            HealthBand::Good => "Good",
            HealthBand::NeedsImprovement => "Needs Improvement",
        }
    }
}

pub fn band_order() -> &'static [HealthBand] {
    &[
        HealthBand::Excellent,
        HealthBand::Good,
        HealthBand::NeedsImprovement,
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    APlus,
    A,
    BPlus,
    B,
    CPlus,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_lbh(lbh: f64) -> Self {
        const STEPS: [(f64, Grade); 7] = [
            (90.0, Grade::APlus),
            (85.0, Grade::A),
            (80.0, Grade::BPlus),
            (75.0, Grade::B),
            (70.0, Grade::CPlus),
            (65.0, Grade::C),
            (60.0, Grade::D),
        ];
        STEPS
            .iter()
            .find(|(floor, _)| lbh >= *floor)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/bands.rs"]
mod tests;
