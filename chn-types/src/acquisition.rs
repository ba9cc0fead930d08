use crate::{ChnError, ChnResult, Month};

/// Длина токена даты `DD-MM-YYYY`.
pub const DATE_TOKEN_LEN: usize = 10;

/// Длина токена времени `HH:MM:SS`.
pub const TIME_TOKEN_LEN: usize = 8;

/// Длина закодированного поля даты/времени `DDMMMYY1HHMM`.
pub const DATE_TIME_FIELD_LEN: usize = 12;

/// Длина поля секунд.
pub const SECONDS_FIELD_LEN: usize = 2;

/// Дата и время начала набора спектра в кодировке CHN.
///
/// Поля хранятся как сырые ASCII байты, без разделителей.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionDate {
    /// `DD` + `MMM` + `YY` + `1` + `HH` + `MM`
    pub date_time: [u8; DATE_TIME_FIELD_LEN],
    /// `SS`
    pub seconds: [u8; SECONDS_FIELD_LEN],
    /// Месяц, разобранный из токена даты
    pub month: Month,
}

impl AcquisitionDate {
    /// Собирает дату из токенов `DD-MM-YYYY` и `HH:MM:SS`.
    ///
    /// Токены проверяются только по длине и по номеру месяца,
    /// остальные цифры копируются как есть.
    pub fn from_tokens(
        date: &str,
        time: &str,
    ) -> ChnResult<Self> {
        let dt = date.as_bytes();
        let tm = time.as_bytes();

        if dt.len() != DATE_TOKEN_LEN || tm.len() != TIME_TOKEN_LEN {
            return Err(ChnError::format(format!(
                "date/time format invalid: '{date} {time}'"
            )));
        }

        let month = std::str::from_utf8(&dt[3..5])
            .ok()
            .and_then(|s| s.parse::<u8>().ok())
            .unwrap_or(0);
        let month = Month::from_u8(month)?;

        let mut date_time = [0u8; DATE_TIME_FIELD_LEN];
        let mut off = 0;

        let parts: [&[u8]; 6] = [
            &dt[0..2],
            &month.abbrev()[..],
            &dt[8..10],
            &b"1"[..],
            &tm[0..2],
            &tm[3..5],
        ];

        for part in parts {
            date_time[off..off + part.len()].copy_from_slice(part);
            off += part.len();
        }

        let mut seconds = [0u8; SECONDS_FIELD_LEN];
        seconds.copy_from_slice(&tm[6..8]);

        Ok(Self {
            date_time,
            seconds,
            month,
        })
    }
}

impl std::fmt::Display for AcquisitionDate {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{} (sec {})",
            String::from_utf8_lossy(&self.date_time),
            String::from_utf8_lossy(&self.seconds)
        )
    }
}
