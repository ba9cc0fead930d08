use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt};
use chn_types::{AcquisitionDate, ChnHeader};
use log::debug;

use crate::{
    error::{ChnError, ChnResult},
    format::{assemble_record, ChnHeaderExt, CHN_HEADER_SIZE},
    rpt::{parse_acquisition_date, parse_trailing_float, ChannelEncoder, ChannelPayload},
};

/// Этап чтения отчёта. Этапы проходятся строго по порядку.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStage {
    Header,
    LiveTime,
    RealTime,
    Channels,
}

/// Полностью разобранный и проверенный отчёт RPT.
#[derive(Debug, Clone)]
pub struct RptReport {
    pub acquisition: AcquisitionDate,
    /// Живое время, секунды
    pub live_time: f32,
    /// Реальное время, секунды
    pub real_time: f32,
    pub channels: ChannelPayload,
}

/// Потоковый читатель отчётов RPT.
///
/// Строки читаются как байты; не-UTF-8 байты в подписях заменяются
/// на U+FFFD и не мешают разбору ASCII-полей.
pub struct RptReader<R: Read> {
    reader: BufReader<R>,
    line_buf: Vec<u8>,
    line_no: usize,
}

/// Буферизованный писатель CHN записей.
pub struct ChnWriter<W: Write> {
    writer: BufWriter<W>,
    bytes_written: u64,
}

/// CHN запись, прочитанная обратно из байтового потока.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChnRecord {
    pub header: ChnHeader,
    pub channels: Vec<u32>,
}

/// Итог одной конвертации.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub channel_count: u16,
    pub bytes_written: u64,
    pub live_time_secs: f64,
    pub real_time_secs: f64,
    pub lines_read: usize,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl RptReport {
    /// Заголовок CHN для этого отчёта.
    pub fn header(&self) -> ChnHeader {
        ChnHeader::new(
            &self.acquisition,
            self.live_time,
            self.real_time,
            self.channels.count,
        )
    }
}

impl<R: Read> RptReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            line_buf: Vec::new(),
            line_no: 0,
        }
    }

    /// Количество прочитанных строк.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    /// Читает отчёт целиком: заголовок, два времени, каналы, проверка.
    ///
    /// Первая же ошибка прерывает чтение; строки после неё не читаются.
    pub fn read_report(&mut self) -> ChnResult<RptReport> {
        let line = self.require_line(ReadStage::Header)?;
        let acquisition =
            parse_acquisition_date(&line).map_err(|e| self.locate(e, ReadStage::Header))?;
        debug!("acquisition: {acquisition}");

        let line = self.require_line(ReadStage::LiveTime)?;
        let live_time =
            parse_trailing_float(&line).map_err(|e| self.locate(e, ReadStage::LiveTime))?;
        debug!("live time: {live_time} s");

        let line = self.require_line(ReadStage::RealTime)?;
        let real_time =
            parse_trailing_float(&line).map_err(|e| self.locate(e, ReadStage::RealTime))?;
        debug!("real time: {real_time} s");

        let mut encoder = ChannelEncoder::new();
        while let Some(line) = self.next_line()? {
            encoder
                .absorb_line(&line)
                .map_err(|e| self.locate(e, ReadStage::Channels))?;
        }
        debug!("channels: {} over {} lines", encoder.count(), self.line_no);

        let channels = encoder.finish()?;

        Ok(RptReport {
            acquisition,
            live_time,
            real_time,
            channels,
        })
    }

    fn next_line(&mut self) -> ChnResult<Option<String>> {
        self.line_buf.clear();
        if self.reader.read_until(b'\n', &mut self.line_buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        Ok(Some(String::from_utf8_lossy(&self.line_buf).into_owned()))
    }

    fn require_line(
        &mut self,
        stage: ReadStage,
    ) -> ChnResult<String> {
        self.next_line()?
            .ok_or_else(|| ChnError::format(format!("missing {stage} line")))
    }

    /// Добавляет номер строки к ошибкам формата.
    fn locate(
        &self,
        e: ChnError,
        stage: ReadStage,
    ) -> ChnError {
        match e {
            ChnError::Format(msg) => {
                ChnError::format(format!("line {} ({stage}): {msg}", self.line_no))
            }
            other => other,
        }
    }
}

impl<W: Write> ChnWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
            bytes_written: 0,
        }
    }

    /// Записывает заголовок и каналы одной записью.
    pub fn write_record(
        &mut self,
        header: &ChnHeader,
        payload: &[u8],
    ) -> ChnResult<u64> {
        let record = assemble_record(header, payload)?;

        self.writer.write_all(&record)?;
        self.bytes_written += record.len() as u64;

        Ok(record.len() as u64)
    }

    /// Записывает разобранный отчёт.
    pub fn write_report(
        &mut self,
        report: &RptReport,
    ) -> ChnResult<u64> {
        self.write_record(&report.header(), &report.channels.bytes)
    }

    /// Всего записано байт.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Сбрасывает буфер и возвращает внутренний поток.
    pub fn finish(mut self) -> ChnResult<W> {
        self.writer.flush()?;

        self.writer
            .into_inner()
            .map_err(|e| ChnError::Io(e.into_error()))
    }
}

impl ChnRecord {
    /// Читает заголовок и все объявленные в нём каналы.
    pub fn read_from<R: Read>(mut reader: R) -> ChnResult<Self> {
        let mut hdr_buf = [0u8; CHN_HEADER_SIZE];
        reader.read_exact(&mut hdr_buf).map_err(truncated("header"))?;

        let header = ChnHeader::deserialize(&hdr_buf)?;

        let mut channels = Vec::with_capacity(header.channel_count as usize);
        for _ in 0..header.channel_count {
            let ch = reader
                .read_u32::<LittleEndian>()
                .map_err(truncated("channel payload"))?;
            channels.push(ch);
        }

        Ok(Self { header, channels })
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for ReadStage {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ReadStage::Header => write!(f, "header"),
            ReadStage::LiveTime => write!(f, "live time"),
            ReadStage::RealTime => write!(f, "real time"),
            ReadStage::Channels => write!(f, "channels"),
        }
    }
}

impl std::fmt::Display for ConversionSummary {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{} channels, live {:.2} s, real {:.2} s, {} bytes from {} lines",
            self.channel_count,
            self.live_time_secs,
            self.real_time_secs,
            self.bytes_written,
            self.lines_read
        )
    }
}

fn truncated(what: &'static str) -> impl Fn(std::io::Error) -> ChnError {
    move |e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            ChnError::format(format!("truncated CHN {what}"))
        } else {
            ChnError::Io(e)
        }
    }
}

/// Конвертирует отчёт RPT из `input` в запись CHN в `output`.
///
/// В `output` ничего не пишется, пока отчёт не прочитан и не проверен.
pub fn convert<R: Read, W: Write>(
    input: R,
    output: W,
) -> ChnResult<ConversionSummary> {
    let mut reader = RptReader::new(input);
    let report = reader.read_report()?;

    let mut writer = ChnWriter::new(output);
    writer.write_report(&report)?;
    let bytes_written = writer.bytes_written();
    writer.finish()?;

    let header = report.header();

    Ok(ConversionSummary {
        channel_count: header.channel_count,
        bytes_written,
        live_time_secs: header.live_time_secs(),
        real_time_secs: header.real_time_secs(),
        lines_read: reader.lines_read(),
    })
}
