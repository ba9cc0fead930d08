use std::{
    fs::File,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Instant,
};

use chn_core::{error::ChnError, ChnWriter, ConversionSummary, RptReader};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::{ConvertConfig, ConvertError, ConvertResult};

/// Конвертация одного файла: RPT на входе, CHN на выходе.
pub struct ConversionPipeline {
    config: ConvertConfig,
}

impl ConversionPipeline {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// Запускает конвертацию.
    ///
    /// Выходной файл появляется только после успешного разбора, проверки
    /// и полной записи; при любой ошибке он не создаётся и не изменяется.
    pub fn run(&self) -> ConvertResult<ConversionSummary> {
        let cfg = &self.config;
        let started = Instant::now();

        // Отдельная проверка существования до открытия
        if let Err(e) = std::fs::metadata(&cfg.input_path) {
            return Err(match e.kind() {
                ErrorKind::NotFound => ConvertError::FileNotFound(cfg.input_path.clone()),
                _ => ConvertError::ReadInput {
                    path: cfg.input_path.clone(),
                    source: e,
                },
            });
        }

        let input = File::open(&cfg.input_path).map_err(|source| ConvertError::ReadInput {
            path: cfg.input_path.clone(),
            source,
        })?;

        let mut reader = RptReader::new(input);
        let report = reader.read_report()?;
        let header = report.header();

        debug!(
            "Parsed {:?}: {} lines, {} channels",
            cfg.input_path,
            reader.lines_read(),
            header.channel_count
        );

        let bytes_written = write_atomic(&cfg.output_path, |file| {
            let mut writer = ChnWriter::new(file);
            let n = writer.write_report(&report)?;
            writer.finish()?;
            Ok(n)
        })?;

        let summary = ConversionSummary {
            channel_count: header.channel_count,
            bytes_written,
            live_time_secs: header.live_time_secs(),
            real_time_secs: header.real_time_secs(),
            lines_read: reader.lines_read(),
        };

        info!(
            "Converted {:?} -> {:?}: {summary} in {:.1?}",
            cfg.input_path,
            cfg.output_path,
            started.elapsed()
        );

        Ok(summary)
    }
}

/// Пишет во временный файл рядом с `path` и переименовывает его в `path`
/// только после успешной записи и `fsync`. При ошибке временный файл
/// удаляется, а `path` остаётся нетронутым.
fn write_atomic<T>(
    path: &Path,
    write: impl FnOnce(&File) -> Result<T, ChnError>,
) -> ConvertResult<T> {
    let write_err = |source: std::io::Error| ConvertError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;

    let value = write(tmp.as_file()).map_err(|e| match e {
        ChnError::Io(source) => write_err(source),
        other => ConvertError::Chn(other),
    })?;

    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(value)
}
