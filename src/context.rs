use std::io::Write;

use crate::error::Error;
use crate::{BUFFER_SIZE, DYN_BUFFER_SIZE, FLUSH_SIZE, RESERVE};

/// Where flushed bytes go.
pub(crate) enum Sink<'a> {
    /// Drain `FLUSH_SIZE` chunks to a stream and compact the tail.
    Stream(&'a mut dyn Write),
    /// Caller-owned buffer; reaching the flush threshold is an overflow.
    Fixed,
    /// Owned buffer that doubles instead of draining.
    Dynamic,
}

/// Output storage, owned for the stream and growable sinks, borrowed for
/// the fixed sink.
pub(crate) enum Buffer<'a> {
    Owned(Vec<u8>),
    Borrowed(&'a mut [u8]),
}

impl Buffer<'_> {
    #[inline]
    pub(crate) fn bytes(&mut self) -> &mut [u8] {
        match self {
            Buffer::Owned(v) => v,
            Buffer::Borrowed(b) => b,
        }
    }

    #[inline]
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Owned(v) => v,
            Buffer::Borrowed(b) => b,
        }
    }
}

/// One JSON emission context.
///
/// A printer is bound to exactly one sink kind at construction and lives for
/// one emission sequence. The buffer is split at `flush_size`: anything the
/// emitters write below that threshold is guaranteed to fit, and at least
/// [`RESERVE`] bytes remain above it so small emissions (punctuation, one
/// scalar rendering) never check for space. Emitters of unbounded data
/// (strings, indentation runs, base64) chunk and flush instead.
///
/// A printer is not thread-safe; distinct printers are independent.
pub struct Printer<'a> {
    pub(crate) buf: Buffer<'a>,
    /// Write cursor into `buf`.
    pub(crate) p: usize,
    /// Flush threshold. `buf.len() - flush_size >= RESERVE` always holds.
    pub(crate) flush_size: usize,
    /// Bytes already drained to the sink.
    flushed: usize,
    pub(crate) level: usize,
    pub(crate) indent: usize,
    pub(crate) unquote: bool,
    pub(crate) noenum: bool,
    pub(crate) skip_default: bool,
    pub(crate) force_default: bool,
    pub(crate) error: Option<Error>,
    pub(crate) sink: Sink<'a>,
}

impl<'a> Printer<'a> {
    fn with_sink(buf: Buffer<'a>, flush_size: usize, sink: Sink<'a>) -> Printer<'a> {
        Printer {
            buf,
            p: 0,
            flush_size,
            flushed: 0,
            level: 0,
            indent: 0,
            unquote: false,
            noenum: false,
            skip_default: false,
            force_default: false,
            error: None,
            sink,
        }
    }

    /// Printer that drains to `out` in [`FLUSH_SIZE`] chunks.
    pub fn stream(out: &'a mut dyn Write) -> Printer<'a> {
        Printer::with_sink(
            Buffer::Owned(vec![0; BUFFER_SIZE]),
            FLUSH_SIZE,
            Sink::Stream(out),
        )
    }

    /// Printer over a caller-owned buffer. Output that does not fit below
    /// the flush threshold raises [`Error::Overflow`]. The buffer must be at
    /// least [`RESERVE`] bytes.
    pub fn fixed(buf: &'a mut [u8]) -> Result<Printer<'a>, Error> {
        if buf.len() < RESERVE {
            return Err(Error::Overflow);
        }
        let flush_size = buf.len() - RESERVE;
        Ok(Printer::with_sink(
            Buffer::Borrowed(buf),
            flush_size,
            Sink::Fixed,
        ))
    }

    /// Printer over an owned buffer that doubles on demand. An
    /// `initial_size` of zero selects [`DYN_BUFFER_SIZE`].
    pub fn dynamic(initial_size: usize) -> Printer<'static> {
        let size = if initial_size == 0 {
            DYN_BUFFER_SIZE
        } else {
            initial_size.max(RESERVE)
        };
        Printer::with_sink(Buffer::Owned(vec![0; size]), size - RESERVE, Sink::Dynamic)
    }

    /// Spaces per nesting level; zero emits compact JSON.
    pub fn set_indent(&mut self, spaces: usize) {
        self.indent = spaces;
    }

    /// Emit field names and enum symbols as bare identifiers. Not standard
    /// JSON.
    pub fn set_unquote(&mut self, unquote: bool) {
        self.unquote = unquote;
    }

    /// Render enums as raw numbers instead of symbols.
    pub fn set_noenum(&mut self, noenum: bool) {
        self.noenum = noenum;
    }

    /// Omit scalar fields whose value equals their schema default.
    pub fn set_skip_default(&mut self, skip: bool) {
        self.skip_default = skip;
    }

    /// Emit absent scalar fields as their schema default.
    pub fn set_force_default(&mut self, force: bool) {
        self.force_default = force;
    }

    /// The sticky error, if any primitive has failed.
    pub fn error(&self) -> Option<Error> {
        self.error
    }

    /// Bytes emitted so far, flushed and buffered.
    pub fn total(&self) -> usize {
        self.flushed + self.p
    }

    /// Current nesting level.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Adjust the nesting level around hand-driven output.
    pub fn add_level(&mut self, n: i32) {
        self.level = (self.level as i64 + n as i64) as usize;
    }

    /// The written, not yet drained portion of the buffer. For the fixed and
    /// growable sinks this is the whole output as long as no overflow
    /// occurred.
    pub fn output(&self) -> &[u8] {
        &self.buf.as_slice()[..self.p]
    }

    /// Consume a growable-sink printer and return the assembled output with
    /// exactly one trailing newline. Fails with the sticky error, or with
    /// [`Error::BadInput`] for other sink kinds.
    pub fn finalize(mut self) -> Result<Vec<u8>, Error> {
        if let Some(e) = self.error {
            return Err(e);
        }
        if !matches!(self.sink, Sink::Dynamic) {
            return Err(Error::BadInput);
        }
        if self.p == 0 || self.buf.as_slice()[self.p - 1] != b'\n' {
            let p = self.p;
            self.buf.bytes()[p] = b'\n';
            self.p += 1;
        }
        match self.buf {
            Buffer::Owned(mut v) => {
                v.truncate(self.p);
                Ok(v)
            }
            Buffer::Borrowed(_) => Err(Error::BadInput),
        }
    }

    /// Record `e` unless an earlier error is already set.
    pub(crate) fn set_error(&mut self, e: Error) {
        if self.error.is_none() {
            self.error = Some(e);
        }
    }

    /// Write one byte without a space check. Callers stay within the
    /// [`RESERVE`] window.
    #[inline]
    pub(crate) fn push(&mut self, c: u8) {
        let p = self.p;
        self.buf.bytes()[p] = c;
        self.p = p + 1;
    }

    /// Copy a short run without a space check. Callers stay within the
    /// [`RESERVE`] window.
    #[inline]
    pub(crate) fn put(&mut self, s: &[u8]) {
        let p = self.p;
        self.buf.bytes()[p..p + s.len()].copy_from_slice(s);
        self.p = p + s.len();
    }

    /// Flush if the cursor has crossed the threshold.
    pub(crate) fn flush_partial(&mut self) {
        if self.p >= self.flush_size {
            self.flush(false);
        }
    }

    /// Drain, grow, or overflow depending on the sink. With `all` set the
    /// stream sink drains everything buffered; otherwise it drains one
    /// `flush_size` chunk and keeps the tail.
    pub(crate) fn flush(&mut self, all: bool) {
        match self.sink {
            Sink::Stream(ref mut out) => {
                let failed;
                if !all && self.p >= self.flush_size {
                    let spill = self.p - self.flush_size;
                    let flush_size = self.flush_size;
                    let bytes = self.buf.bytes();
                    failed = out.write_all(&bytes[..flush_size]).is_err();
                    bytes.copy_within(flush_size..flush_size + spill, 0);
                    self.p = spill;
                    self.flushed += flush_size;
                } else {
                    let len = self.p;
                    failed = out.write_all(&self.buf.bytes()[..len]).is_err();
                    self.p = 0;
                    self.flushed += len;
                }
                if failed {
                    self.set_error(Error::Overflow);
                }
            }
            Sink::Fixed => {
                self.flushed += self.p;
                self.p = 0;
                self.set_error(Error::Overflow);
            }
            Sink::Dynamic => {
                if let Buffer::Owned(ref mut v) = self.buf {
                    let size = v.len();
                    if v.try_reserve_exact(size).is_err() {
                        self.p = 0;
                        self.set_error(Error::Overflow);
                    } else {
                        v.resize(size * 2, 0);
                        self.flush_size = size * 2 - RESERVE;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_buffers_below_the_reserve_are_rejected() {
        let mut small = [0u8; RESERVE - 1];
        assert!(Printer::fixed(&mut small).is_err());
        let mut exact = [0u8; RESERVE];
        assert!(Printer::fixed(&mut exact).is_ok());
    }

    #[test]
    fn dynamic_grows_past_its_initial_size() {
        let mut p = Printer::dynamic(RESERVE);
        let payload = vec![b'y'; 4 * RESERVE];
        p.write(&payload);
        assert!(p.error().is_none());
        assert_eq!(p.output(), payload.as_slice());
        assert_eq!(p.total(), payload.len());
    }

    #[test]
    fn first_error_wins() {
        let mut p = Printer::dynamic(0);
        p.set_error(Error::DeepRecursion);
        p.set_error(Error::Overflow);
        assert_eq!(p.error(), Some(Error::DeepRecursion));
    }

    #[test]
    fn total_counts_flushed_and_buffered_bytes() {
        let mut out = Vec::new();
        let mut p = Printer::stream(&mut out);
        let payload = vec![b'z'; FLUSH_SIZE + 10];
        p.write(&payload);
        assert_eq!(p.total(), payload.len());
    }

    #[test]
    fn finalize_requires_the_growable_sink() {
        let mut storage = [0u8; 2 * RESERVE];
        let p = Printer::fixed(&mut storage).unwrap();
        assert_eq!(p.finalize(), Err(Error::BadInput));
    }

    #[test]
    fn finalize_adds_a_single_newline() {
        let mut p = Printer::dynamic(0);
        p.write(b"{}");
        assert_eq!(p.finalize().unwrap(), b"{}\n");

        let mut p = Printer::dynamic(0);
        p.write(b"{}\n");
        assert_eq!(p.finalize().unwrap(), b"{}\n");
    }
}
