//! Структура файлов CHN
//!
//! Бинарный спектр: 32-байтный заголовок и массив каналов.
//! Все многобайтовые числа хранятся в порядке little-endian.
//!
//! | смещение | размер | поле                          |
//! |----------|--------|-------------------------------|
//! | 0        | 2      | маркер `-1`                   |
//! | 2        | 2      | номер MCA (`1`)               |
//! | 4        | 2      | номер сегмента (`1`)          |
//! | 6        | 2      | секунды начала, ASCII         |
//! | 8        | 4      | реальное время, тики 1/50 с   |
//! | 12       | 4      | живое время, тики 1/50 с      |
//! | 16       | 12     | `DDMMMYY1HHMM`, ASCII         |
//! | 28       | 2      | резерв (`0`)                  |
//! | 30       | 2      | количество каналов            |
//! | 32       | 4 * n  | значения каналов (u32)        |

use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use chn_types::{ChnHeader, DATE_TIME_FIELD_LEN, SECONDS_FIELD_LEN};

use crate::error::{ChnError, ChnResult};

/// Маркер начала CHN файла.
pub const CHN_SENTINEL: i16 = -1;

/// Размер фиксированного заголовка (32 байта).
pub const CHN_HEADER_SIZE: usize = 32;

/// Размер одного канала на диске.
pub const CHN_CHANNEL_SIZE: usize = 4;

/// Максимальное количество каналов, помещающееся в 16-битное поле
/// и являющееся степенью двойки.
pub const CHN_MAX_CHANNELS: usize = 32_768;

/// `true`, если `n` — ненулевая степень двойки.
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// Проверяет количество каналов и возвращает его в виде поля заголовка.
pub fn validate_channel_count(n: usize) -> ChnResult<u16> {
    if !is_power_of_two(n) {
        return Err(ChnError::validation(
            "number of channels is not a power of two",
        ));
    }

    if n > CHN_MAX_CHANNELS {
        return Err(ChnError::validation(format!(
            "too many channels: {n} (max {CHN_MAX_CHANNELS})"
        )));
    }

    Ok(n as u16)
}

/// Сериализация заголовка CHN.
pub trait ChnHeaderExt: Sized {
    /// Сериализация заголовка в 32 байта.
    fn serialize(&self) -> ChnResult<Vec<u8>>;

    /// Десериализация заголовка из 32 байт.
    fn deserialize(buf: &[u8; CHN_HEADER_SIZE]) -> ChnResult<Self>;
}

impl ChnHeaderExt for ChnHeader {
    fn serialize(&self) -> ChnResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(CHN_HEADER_SIZE);

        buf.write_i16::<LittleEndian>(CHN_SENTINEL)?;
        buf.write_i16::<LittleEndian>(self.mca_number)?;
        buf.write_i16::<LittleEndian>(self.segment)?;
        buf.write_all(&self.seconds)?;
        buf.write_i32::<LittleEndian>(self.real_time_ticks)?;
        buf.write_i32::<LittleEndian>(self.live_time_ticks)?;
        buf.write_all(&self.date_time)?;
        buf.write_i16::<LittleEndian>(0)?; // reserved
        buf.write_u16::<LittleEndian>(self.channel_count)?;

        debug_assert_eq!(buf.len(), CHN_HEADER_SIZE);

        Ok(buf)
    }

    fn deserialize(buf: &[u8; CHN_HEADER_SIZE]) -> ChnResult<Self> {
        let mut cur = Cursor::new(&buf[..]);

        let sentinel = cur.read_i16::<LittleEndian>()?;
        if sentinel != CHN_SENTINEL {
            return Err(ChnError::format(format!(
                "invalid CHN sentinel: {sentinel}"
            )));
        }

        let mca_number = cur.read_i16::<LittleEndian>()?;
        let segment = cur.read_i16::<LittleEndian>()?;

        let mut seconds = [0u8; SECONDS_FIELD_LEN];
        cur.read_exact(&mut seconds)?;

        let real_time_ticks = cur.read_i32::<LittleEndian>()?;
        let live_time_ticks = cur.read_i32::<LittleEndian>()?;

        let mut date_time = [0u8; DATE_TIME_FIELD_LEN];
        cur.read_exact(&mut date_time)?;

        let _reserved = cur.read_i16::<LittleEndian>()?;
        let channel_count = cur.read_u16::<LittleEndian>()?;

        Ok(ChnHeader {
            mca_number,
            segment,
            seconds,
            real_time_ticks,
            live_time_ticks,
            date_time,
            channel_count,
        })
    }
}

/// Склеивает заголовок и полезную нагрузку каналов в одну запись.
pub fn assemble_record(
    header: &ChnHeader,
    payload: &[u8],
) -> ChnResult<Vec<u8>> {
    let expected = header.channel_count as usize * CHN_CHANNEL_SIZE;
    if payload.len() != expected {
        return Err(ChnError::validation(format!(
            "channel payload is {} bytes, header declares {} channels",
            payload.len(),
            header.channel_count
        )));
    }

    let mut record = header.serialize()?;
    record.reserve_exact(payload.len());
    record.extend_from_slice(payload);

    Ok(record)
}
