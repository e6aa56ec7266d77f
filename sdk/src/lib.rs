//! flatjson-sdk
//!
//! Convenience layer over the core printer:
//!
//! - [`Options`] bundling the printer's formatting switches
//! - one-shot printing into a `Vec<u8>`, `String`, `io::Write`, or
//!   `serde_json::Value`
//! - the [`sample`] module, a hand-written stand-in for schema-compiler
//!   output used by the CLI, the example binary, and tests

use std::io::Write;

pub use flatjson::{Error, Printer, TableDescriptor, TablePrinter};

pub mod sample;

/// Formatting switches, applied to a fresh printer per one-shot call.
///
/// The default is compact standard JSON with default-valued scalar fields
/// omitted.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Spaces per nesting level; zero is compact.
    pub indent: usize,
    /// Bare identifiers instead of quoted names. Not standard JSON.
    pub unquote: bool,
    /// Numeric enum rendering.
    pub noenum: bool,
    /// Omit scalar fields equal to their schema default.
    pub skip_default: bool,
    /// Emit absent scalar fields as their schema default.
    pub force_default: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            indent: 0,
            unquote: false,
            noenum: false,
            skip_default: true,
            force_default: false,
        }
    }
}

impl Options {
    fn apply(&self, p: &mut Printer<'_>) {
        p.set_indent(self.indent);
        p.set_unquote(self.unquote);
        p.set_noenum(self.noenum);
        p.set_skip_default(self.skip_default);
        p.set_force_default(self.force_default);
    }
}

/// Print a table-rooted buffer into an owned byte vector, trailing newline
/// included.
pub fn print_to_vec(
    buf: &[u8],
    fid: Option<&[u8; 4]>,
    pf: TablePrinter,
    options: Options,
) -> Result<Vec<u8>, Error> {
    let mut p = Printer::dynamic(0);
    options.apply(&mut p);
    p.table_as_root(buf, fid, pf)?;
    p.finalize()
}

/// Print a table-rooted buffer into a `String`. Wire strings holding
/// invalid UTF-8 pass through the printer verbatim, so this reports
/// [`Error::BadInput`] when the result is not UTF-8; use [`print_to_vec`]
/// for lossless output.
pub fn print_to_string(
    buf: &[u8],
    fid: Option<&[u8; 4]>,
    pf: TablePrinter,
    options: Options,
) -> Result<String, Error> {
    String::from_utf8(print_to_vec(buf, fid, pf, options)?).map_err(|_| Error::BadInput)
}

/// Print a table-rooted buffer to a stream, returning the emitted byte
/// count.
pub fn print_to_writer(
    out: &mut dyn Write,
    buf: &[u8],
    fid: Option<&[u8; 4]>,
    pf: TablePrinter,
    options: Options,
) -> Result<usize, Error> {
    let mut p = Printer::stream(out);
    options.apply(&mut p);
    p.table_as_root(buf, fid, pf)
}

/// Print a table-rooted buffer and parse the result into a
/// `serde_json::Value`. Fails with [`Error::BadInput`] when the configured
/// options produce non-standard JSON, for example `unquote`.
pub fn print_to_value(
    buf: &[u8],
    fid: Option<&[u8; 4]>,
    pf: TablePrinter,
    options: Options,
) -> Result<serde_json::Value, Error> {
    let bytes = print_to_vec(buf, fid, pf, options)?;
    serde_json::from_slice(&bytes).map_err(|_| Error::BadInput)
}
