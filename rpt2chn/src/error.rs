use std::path::PathBuf;

use thiserror::Error;

pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// Не задан обязательный аргумент
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    /// Входной файл не существует
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Ошибка открытия входного файла
    #[error("Cannot read {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Ошибка создания или записи выходного файла
    #[error("Cannot write {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Ошибка разбора RPT или сборки CHN
    #[error(transparent)]
    Chn(#[from] chn_types::ChnError),
}
