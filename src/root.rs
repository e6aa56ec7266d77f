use crate::context::{Printer, Sink};
use crate::error::Error;
use crate::table::{StructPrinter, TablePrinter};
use crate::wire;
use crate::MAX_LEVELS;

impl<'a> Printer<'a> {
    /// Reject buffers whose header cannot be trusted: too short to hold the
    /// root offset plus identifier, or carrying a different identifier than
    /// the one asked for. `None` (and an all-zero `fid`) skips the
    /// identifier comparison.
    pub(crate) fn accept_header(&mut self, buf: &[u8], fid: Option<&[u8; 4]>) -> bool {
        if buf.len() < wire::UOFFSET_SIZE + wire::IDENTIFIER_SIZE {
            self.set_error(Error::BadInput);
            return false;
        }
        if let Some(fid) = fid {
            if fid != &[0u8; 4] && wire::read_identifier(buf) != fid.as_slice() {
                self.set_error(Error::BadInput);
                return false;
            }
        }
        true
    }

    /// Print a whole buffer whose root object is a table, through the
    /// generated emitter `pf`. Returns the total bytes emitted, or the
    /// sticky error; for the stream sink all buffered output is drained
    /// before returning.
    pub fn table_as_root(
        &mut self,
        buf: &[u8],
        fid: Option<&[u8; 4]>,
        pf: TablePrinter,
    ) -> Result<usize, Error> {
        if !self.accept_header(buf, fid) {
            return Err(self.error.unwrap_or(Error::BadInput));
        }
        let root = wire::read_uoffset(buf, 0);
        self.print_table_object(buf, root, MAX_LEVELS, 0, pf);
        self.last_newline();
        if matches!(self.sink, Sink::Stream(_)) {
            self.flush(true);
        }
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.total()),
        }
    }

    /// Print a whole buffer whose root object is a struct.
    pub fn struct_as_root(
        &mut self,
        buf: &[u8],
        fid: Option<&[u8; 4]>,
        pf: StructPrinter,
    ) -> Result<usize, Error> {
        if !self.accept_header(buf, fid) {
            return Err(self.error.unwrap_or(Error::BadInput));
        }
        let root = wire::read_uoffset(buf, 0);
        self.start(b'{');
        pf(self, &buf[root..]);
        self.end(b'}', false);
        self.last_newline();
        if matches!(self.sink, Sink::Stream(_)) {
            self.flush(true);
        }
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.total()),
        }
    }
}
