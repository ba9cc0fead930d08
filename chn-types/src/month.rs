use crate::{ChnError, ChnResult};

/// Месяц даты набора спектра.
///
/// В CHN месяц хранится только английской трёхбуквенной аббревиатурой
/// в верхнем регистре, независимо от локали.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Month {
    Jan = 1,
    Feb = 2,
    Mar = 3,
    Apr = 4,
    May = 5,
    Jun = 6,
    Jul = 7,
    Aug = 8,
    Sep = 9,
    Oct = 10,
    Nov = 11,
    Dec = 12,
}

impl Month {
    pub fn from_u8(v: u8) -> ChnResult<Self> {
        match v {
            1 => Ok(Month::Jan),
            2 => Ok(Month::Feb),
            3 => Ok(Month::Mar),
            4 => Ok(Month::Apr),
            5 => Ok(Month::May),
            6 => Ok(Month::Jun),
            7 => Ok(Month::Jul),
            8 => Ok(Month::Aug),
            9 => Ok(Month::Sep),
            10 => Ok(Month::Oct),
            11 => Ok(Month::Nov),
            12 => Ok(Month::Dec),
            _ => Err(ChnError::format(format!("month out of range: {v}"))),
        }
    }

    /// Трёхбуквенная аббревиатура (`JAN`..`DEC`).
    pub fn abbrev(&self) -> &'static [u8; 3] {
        match self {
            Month::Jan => b"JAN",
            Month::Feb => b"FEB",
            Month::Mar => b"MAR",
            Month::Apr => b"APR",
            Month::May => b"MAY",
            Month::Jun => b"JUN",
            Month::Jul => b"JUL",
            Month::Aug => b"AUG",
            Month::Sep => b"SEP",
            Month::Oct => b"OCT",
            Month::Nov => b"NOV",
            Month::Dec => b"DEC",
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        // аббревиатура всегда ASCII
        for &b in self.abbrev() {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}
