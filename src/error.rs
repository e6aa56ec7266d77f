use thiserror::Error as ThisError;

/// Printer failure codes.
///
/// Errors are sticky: the first one recorded on a [`Printer`] stays until
/// the printer is dropped or finalized, and later emissions continue
/// best-effort so generated code need not check after every primitive. The
/// root drivers report the sticky code as their final status.
///
/// [`Printer`]: crate::Printer
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum Error {
    #[error("bad input: header too short, identifier mismatch, or field name too long")]
    BadInput,

    #[error("deep recursion: table nesting exceeded the configured maximum")]
    DeepRecursion,

    #[error("overflow: output sink exhausted or buffer growth failed")]
    Overflow,
}
