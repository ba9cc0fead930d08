//! Разбор строк отчёта RPT.
//!
//! Строка 1 — дата и время начала набора, строки 2 и 3 — живое и
//! реальное время, далее — строки каналов `<индекс> <к1> <к2> ...`.

use byteorder::{LittleEndian, WriteBytesExt};
use chn_types::AcquisitionDate;

use crate::{
    error::{ChnError, ChnResult},
    format::{validate_channel_count, CHN_CHANNEL_SIZE, CHN_MAX_CHANNELS},
};

/// Обрезает пробелы, табуляции и переводы строк по краям.
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

/// Извлекает дату и время набора из первой строки отчёта.
///
/// Поля разделяются одиночными пробелами; токен даты — поле 2,
/// токен времени — поле 3.
pub fn parse_acquisition_date(line: &str) -> ChnResult<AcquisitionDate> {
    let items: Vec<&str> = trim_line(line).split(' ').collect();
    if items.len() < 4 {
        return Err(ChnError::format("acquisition date: missing items"));
    }

    AcquisitionDate::from_tokens(items[2], items[3])
}

/// Извлекает последнее поле строки как десятичное число.
///
/// Число разбирается с точностью `f32`.
pub fn parse_trailing_float(line: &str) -> ChnResult<f32> {
    let last = trim_line(line).split(' ').next_back().unwrap_or("");
    if last.is_empty() {
        return Err(ChnError::format("no valid decimal found"));
    }

    let value: f32 = last
        .parse()
        .map_err(|e| ChnError::format(format!("invalid decimal '{last}': {e}")))?;

    if !value.is_finite() {
        return Err(ChnError::format(format!("invalid decimal '{last}'")));
    }

    Ok(value)
}

/// Проверенный массив каналов, готовый к записи.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPayload {
    /// Количество каналов (степень двойки)
    pub count: u16,
    /// Каналы как u32 little-endian
    pub bytes: Vec<u8>,
}

/// Накопитель каналов из строк отчёта.
#[derive(Debug, Default)]
pub struct ChannelEncoder {
    payload: Vec<u8>,
    count: usize,
}

impl ChannelEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Разбирает одну строку каналов. Возвращает число добавленных каналов.
    ///
    /// Пустые строки и строки из одного индекса ничего не добавляют.
    pub fn absorb_line(
        &mut self,
        line: &str,
    ) -> ChnResult<usize> {
        let mut items = trim_line(line).split_whitespace();

        // первое поле — индекс группы каналов, в CHN не попадает
        if items.next().is_none() {
            return Ok(0);
        }

        let mut added = 0;
        for v in items {
            let ch: u32 = v
                .parse()
                .map_err(|e| ChnError::format(format!("invalid channel value '{v}': {e}")))?;

            if self.count >= CHN_MAX_CHANNELS {
                return Err(ChnError::validation(format!(
                    "too many channels (max {CHN_MAX_CHANNELS})"
                )));
            }

            self.payload.write_u32::<LittleEndian>(ch)?;
            self.count += 1;
            added += 1;
        }

        Ok(added)
    }

    /// Количество накопленных каналов.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Проверяет количество каналов и отдаёт массив.
    pub fn finish(self) -> ChnResult<ChannelPayload> {
        let count = validate_channel_count(self.count)?;

        debug_assert_eq!(self.payload.len(), self.count * CHN_CHANNEL_SIZE);

        Ok(ChannelPayload {
            count,
            bytes: self.payload,
        })
    }
}
