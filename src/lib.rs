//! Streaming JSON printer for FlatBuffers-encoded binary buffers.
//!
//! The printer walks a read-only wire buffer (tables, vtables, structs,
//! strings, vectors, tagged unions) and emits JSON text directly into a
//! buffered sink, without building intermediate values. Schema-specific
//! emitters, the kind a schema compiler generates, drive it through a small
//! vocabulary of field primitives, one call per field in declaration order.
//!
//! ```
//! use flatjson::{Printer, TableDescriptor};
//!
//! // What a schema compiler would emit for `table Point { x: int; }`.
//! fn print_point(p: &mut Printer<'_>, td: &mut TableDescriptor<'_>) {
//!     p.scalar_field::<i32>(td, 0, "x", 0);
//! }
//!
//! // root offset, vtable {vsize 6, tsize 8, field 0 at +4}, pad,
//! // table {soffset 8, x = 42}
//! let buf = [
//!     12, 0, 0, 0, 6, 0, 8, 0, 4, 0, 0, 0, 8, 0, 0, 0, 42, 0, 0, 0,
//! ];
//!
//! let mut p = Printer::dynamic(0);
//! p.table_as_root(&buf, None, print_point).unwrap();
//! assert_eq!(p.finalize().unwrap(), b"{\"x\":42}\n");
//! ```

pub mod context;
pub mod emit;
pub mod error;
pub mod root;
pub mod scalar;
pub mod table;

pub use context::Printer;
pub use error::Error;
pub use scalar::{Scalar, SymbolPrinter};
pub use table::{StructPrinter, TableDescriptor, TablePrinter};

pub use flatjson_wire as wire;

/// Maximum table nesting depth before `Error::DeepRecursion`.
pub const MAX_LEVELS: u32 = 100;

/// Bytes kept free past the flush threshold so that one indentation step and
/// one maximal scalar rendering never need a space check mid-emission.
pub const RESERVE: usize = 64;

/// Longest field name a union primitive will append `_type` to.
pub const NAME_LEN_MAX: usize = 100;

/// Internal buffer size for the stream sink.
pub const BUFFER_SIZE: usize = 4096;

/// Flush threshold for the stream sink.
pub const FLUSH_SIZE: usize = 2048;

/// Default initial size for the growable sink.
pub const DYN_BUFFER_SIZE: usize = 4096;
