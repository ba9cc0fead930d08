use std::path::PathBuf;

use crate::{ConvertError, ConvertResult};

/// Конфигурация одной конвертации. Собирается один раз при старте.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Путь к входному .rpt файлу
    pub input_path: PathBuf,
    /// Путь к выходному .chn файлу
    pub output_path: PathBuf,
}

impl ConvertConfig {
    /// Создаёт конфигурацию, отклоняя пустые пути.
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> ConvertResult<Self> {
        let input_path = input_path.into();
        let output_path = output_path.into();

        if input_path.as_os_str().is_empty() {
            return Err(ConvertError::MissingArgument("--if".to_string()));
        }
        if output_path.as_os_str().is_empty() {
            return Err(ConvertError::MissingArgument("--of".to_string()));
        }

        Ok(Self {
            input_path,
            output_path,
        })
    }
}
