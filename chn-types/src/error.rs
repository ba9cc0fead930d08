use thiserror::Error;

/// Результат для операций разбора RPT и сборки CHN.
pub type ChnResult<T> = std::result::Result<T, ChnError>;

/// Типы ошибок конвертации RPT -> CHN.
#[derive(Debug, Error)]
pub enum ChnError {
    /// Строка отчёта не соответствует ожидаемой форме
    #[error("Format error: {0}")]
    Format(String),

    /// Нарушен инвариант спектра (количество каналов)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChnError {
    /// Удобные конструкторы
    pub fn format<S: Into<String>>(s: S) -> Self {
        Self::Format(s.into())
    }

    pub fn validation<S: Into<String>>(s: S) -> Self {
        Self::Validation(s.into())
    }

    /// `true` для ошибок формы входных строк.
    pub fn is_format(&self) -> bool {
        matches!(self, ChnError::Format(_))
    }

    /// `true` для нарушения инварианта количества каналов.
    pub fn is_validation(&self) -> bool {
        matches!(self, ChnError::Validation(_))
    }
}
