//! Библиотека конвертации RPT -> CHN
//!
//! Разбор текстовых отчётов спектрометра (RPT) и сборка бинарного
//! спектра фиксированной структуры (CHN).
//!
//! # Быстрый старт
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let input = BufReader::new(File::open("spectrum.rpt")?);
//! let mut output = Vec::new();
//! let summary = chn_core::convert(input, &mut output)?;
//!
//! assert_eq!(output.len() as u64, summary.bytes_written);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod format;
pub mod rpt;
pub mod serialization;

pub use chn_types as types;
pub use chn_types::error;
pub use format::*;
pub use rpt::*;
pub use serialization::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
