use crate::{AcquisitionDate, DATE_TIME_FIELD_LEN, SECONDS_FIELD_LEN};

/// Единица времени CHN: 1/50 секунды.
pub const TICKS_PER_SECOND: f64 = 50.0;

/// Переводит секунды в тики CHN с отбрасыванием дробной части.
///
/// Значение вне диапазона `i32` насыщается.
pub fn seconds_to_ticks(seconds: f32) -> i32 {
    (seconds as f64 * TICKS_PER_SECOND) as i32
}

/// Фиксированный заголовок CHN файла (32 байта на диске).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChnHeader {
    /// Номер MCA (всегда 1)
    pub mca_number: i16,
    /// Номер сегмента (всегда 1)
    pub segment: i16,
    /// Секунды времени начала, ASCII
    pub seconds: [u8; SECONDS_FIELD_LEN],
    /// Реальное время в тиках 1/50 с
    pub real_time_ticks: i32,
    /// Живое время в тиках 1/50 с
    pub live_time_ticks: i32,
    /// Дата/время начала `DDMMMYY1HHMM`, ASCII
    pub date_time: [u8; DATE_TIME_FIELD_LEN],
    /// Количество каналов спектра
    pub channel_count: u16,
}

impl ChnHeader {
    /// Creating a header from parsed report metadata.
    pub fn new(
        acquisition: &AcquisitionDate,
        live_time: f32,
        real_time: f32,
        channel_count: u16,
    ) -> Self {
        ChnHeader {
            mca_number: 1,
            segment: 1,
            seconds: acquisition.seconds,
            real_time_ticks: seconds_to_ticks(real_time),
            live_time_ticks: seconds_to_ticks(live_time),
            date_time: acquisition.date_time,
            channel_count,
        }
    }

    /// Живое время в секундах.
    pub fn live_time_secs(&self) -> f64 {
        self.live_time_ticks as f64 / TICKS_PER_SECOND
    }

    /// Реальное время в секундах.
    pub fn real_time_secs(&self) -> f64 {
        self.real_time_ticks as f64 / TICKS_PER_SECOND
    }
}
