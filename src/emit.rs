use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::engine::GeneralPurpose;
use base64::Engine;

use crate::context::Printer;
use crate::wire;

#[inline]
fn needs_escape(c: u8) -> bool {
    c < 0x20 || c == b'"' || c == b'\\'
}

/// Padded base64 output length for `n` input bytes.
#[inline]
fn base64_len(n: usize) -> usize {
    (n + 2) / 3 * 4
}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

impl<'a> Printer<'a> {
    /// Copy raw bytes, chunking and flushing whenever the run would cross
    /// the threshold.
    pub(crate) fn raw(&mut self, mut s: &[u8]) {
        if self.p + s.len() >= self.flush_size {
            if self.p >= self.flush_size {
                self.flush(false);
            }
            while self.p + s.len() >= self.flush_size {
                let k = self.flush_size - self.p;
                let p = self.p;
                self.buf.bytes()[p..p + k].copy_from_slice(&s[..k]);
                self.p += k;
                s = &s[k..];
                self.flush(false);
                if self.p >= self.flush_size {
                    // A sink too small to make progress; the overflow is
                    // already recorded.
                    return;
                }
            }
        }
        let p = self.p;
        self.buf.bytes()[p..p + s.len()].copy_from_slice(s);
        self.p += s.len();
    }

    /// Emit a JSON string literal. The input is scanned for bytes that
    /// require escaping; unescaped runs are copied in bulk. Bytes at or
    /// above 0x80 pass through verbatim, so invalid UTF-8 is preserved
    /// rather than rejected.
    pub(crate) fn json_string(&mut self, s: &[u8]) {
        self.push(b'"');
        let mut rest = s;
        loop {
            let k = rest
                .iter()
                .position(|&c| needs_escape(c))
                .unwrap_or(rest.len());
            self.raw(&rest[..k]);
            if k == rest.len() {
                break;
            }
            let c = rest[k];
            rest = &rest[k + 1..];
            self.push(b'\\');
            match c {
                b'"' => self.push(b'"'),
                b'\\' => self.push(b'\\'),
                b'\t' => self.push(b't'),
                0x0c => self.push(b'f'),
                b'\r' => self.push(b'r'),
                b'\n' => self.push(b'n'),
                0x08 => self.push(b'b'),
                _ => {
                    self.put(b"u00");
                    self.push(HEX_DIGITS[(c >> 4) as usize]);
                    self.push(HEX_DIGITS[(c & 15) as usize]);
                }
            }
        }
        self.push(b'"');
    }

    /// Emit a field name or enum symbol, quoted unless `unquote` is set.
    /// Symbols are short in the common case, so a single unchunked copy is
    /// tried first.
    pub(crate) fn symbol(&mut self, name: &[u8]) {
        if !self.unquote {
            self.push(b'"');
        }
        if self.p + name.len() < self.flush_size {
            let p = self.p;
            self.buf.bytes()[p..p + name.len()].copy_from_slice(name);
            self.p += name.len();
        } else {
            self.raw(name);
        }
        if !self.unquote {
            self.push(b'"');
        }
    }

    /// Newline, indent, symbol, colon, optional space. Precedes every field
    /// value.
    pub(crate) fn name(&mut self, name: &[u8]) {
        self.newline();
        self.symbol(name);
        self.push(b':');
        self.space();
    }

    /// One space in indented mode, nothing in compact mode.
    pub(crate) fn space(&mut self) {
        if self.indent > 0 {
            self.push(b' ');
        }
    }

    /// Line break position: newline plus indentation when indenting,
    /// otherwise just an opportunity to flush so buffer growth stays
    /// bounded.
    pub(crate) fn newline(&mut self) {
        if self.indent > 0 {
            self.push(b'\n');
            self.indent_run();
        } else {
            self.flush_partial();
        }
    }

    /// Trailing newline after the root object closes.
    pub(crate) fn last_newline(&mut self) {
        if self.indent > 0 && self.level == 0 {
            self.push(b'\n');
        }
        self.flush_partial();
    }

    /// Open a container and descend one level.
    pub(crate) fn start(&mut self, c: u8) {
        self.level += 1;
        self.push(c);
    }

    /// Close a container. Empty containers close on the same line; in
    /// compact mode this is also a flush opportunity.
    pub(crate) fn end(&mut self, c: u8, empty: bool) {
        if self.indent > 0 {
            self.level -= 1;
            if !empty {
                self.push(b'\n');
                self.indent_run();
            }
        } else {
            self.level -= 1;
            self.flush_partial();
        }
        self.push(c);
    }

    /// Emit `level * indent` spaces.
    pub(crate) fn indent_run(&mut self) {
        let k = self.level * self.indent;
        if self.p + k > self.flush_size {
            self.indent_slow(k);
        } else {
            let p = self.p;
            self.buf.bytes()[p..p + k].fill(b' ');
            self.p += k;
        }
    }

    fn indent_slow(&mut self, mut k: usize) {
        if self.p >= self.flush_size {
            self.flush(false);
        }
        let mut m = self.flush_size.saturating_sub(self.p);
        while k > m {
            let p = self.p;
            self.buf.bytes()[p..p + m].fill(b' ');
            self.p += m;
            k -= m;
            self.flush(false);
            if self.p >= self.flush_size {
                return;
            }
            m = self.flush_size - self.p;
        }
        let p = self.p;
        self.buf.bytes()[p..p + k].fill(b' ');
        self.p += k;
    }

    /// Emit the base64 rendering of the byte vector at `pos` as a quoted
    /// string. Chunks are carved as whole quads, three input bytes per four
    /// output bytes, so every chunk encodes without intermediate padding.
    pub(crate) fn base64_object(&mut self, buf: &[u8], pos: usize, urlsafe: bool) {
        let len = wire::read_scalar::<u32>(buf, pos) as usize;
        let start = pos + wire::UOFFSET_SIZE;
        let mut data = &buf[start..start + len];
        let engine: &GeneralPurpose = if urlsafe { &URL_SAFE } else { &STANDARD };

        self.push(b'"');
        if self.p + base64_len(data.len()) >= self.flush_size {
            self.flush(false);
        }
        while self.p + base64_len(data.len()) > self.flush_size {
            let quads = (self.flush_size.saturating_sub(self.p)) & !3usize;
            let n = quads / 4 * 3;
            if n == 0 || n >= data.len() {
                break;
            }
            let p = self.p;
            engine
                .encode_slice(&data[..n], &mut self.buf.bytes()[p..p + quads])
                .unwrap();
            self.p += quads;
            data = &data[n..];
            self.flush(false);
            if self.p >= self.flush_size {
                break;
            }
        }
        let needed = base64_len(data.len());
        if self.p + needed > self.flush_size {
            // No room to encode in place (tiny fixed buffer); fall back to
            // an owned rendering and let the chunked writer handle it.
            let s = engine.encode(data);
            self.raw(s.as_bytes());
        } else {
            let p = self.p;
            engine
                .encode_slice(data, &mut self.buf.bytes()[p..p + needed])
                .unwrap();
            self.p += needed;
        }
        self.push(b'"');
    }

    /// Escaped JSON string for hand-driven output around generated code.
    pub fn string(&mut self, s: &[u8]) {
        self.flush_partial();
        self.json_string(s);
    }

    /// Raw bytes for hand-driven output. Chunk-flushed, not escaped.
    pub fn write(&mut self, s: &[u8]) {
        self.raw(s);
    }

    /// One raw byte for hand-driven output.
    pub fn putc(&mut self, c: u8) {
        self.flush_partial();
        self.push(c);
    }

    /// Newline plus a flush opportunity, for hand-driven output.
    pub fn nl(&mut self) {
        self.push(b'\n');
        self.flush_partial();
    }

    /// Current indentation run, for hand-driven output.
    pub fn indent(&mut self) {
        self.indent_run();
    }

    /// Emit one enum symbol. Generated symbol printers call this for
    /// non-flag enums.
    pub fn enum_symbol(&mut self, symbol: &str) {
        self.symbol(symbol.as_bytes());
    }

    /// Opening or closing delimiter around a run of flag symbols. Quoted
    /// unless `unquote` is set; with the `quote-multiple-flags` feature a
    /// multi-flag run is quoted regardless.
    pub fn delimit_enum_flags(&mut self, multiple: bool) {
        let quote = if cfg!(feature = "quote-multiple-flags") {
            !self.unquote || multiple
        } else {
            !self.unquote
        };
        if quote {
            self.push(b'"');
        }
    }

    /// One flag symbol inside a delimited run, space-separated after the
    /// first.
    pub fn enum_flag(&mut self, count: usize, symbol: &str) {
        if count > 0 {
            self.push(b' ');
        }
        self.raw(symbol.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use crate::Printer;

    fn collect(f: impl FnOnce(&mut Printer<'static>)) -> Vec<u8> {
        let mut p = Printer::dynamic(0);
        f(&mut p);
        p.output().to_vec()
    }

    #[test]
    fn escapes() {
        let out = collect(|p| p.string(b"a\"b\\c\x01\n"));
        assert_eq!(out, b"\"a\\\"b\\\\c\\u0001\\n\"");
        assert_eq!(collect(|p| p.string(b"")), b"\"\"");
        assert_eq!(collect(|p| p.string(b"\t\r")), b"\"\\t\\r\"");
        assert_eq!(collect(|p| p.string(&[8, 12])), b"\"\\b\\f\"");
    }

    #[test]
    fn invalid_utf8_passes_through() {
        let out = collect(|p| p.string(&[b'a', 0xFF, b'b']));
        assert_eq!(out, [b'"', b'a', 0xFF, b'b', b'"']);
    }

    #[test]
    fn long_strings_chunk_through_the_threshold() {
        let payload = vec![b'x'; 3 * crate::DYN_BUFFER_SIZE];
        let out = collect(|p| p.string(&payload));
        assert_eq!(out.len(), payload.len() + 2);
        assert!(out[1..=payload.len()].iter().all(|&c| c == b'x'));
    }

    #[test]
    fn symbols_respect_unquote() {
        assert_eq!(collect(|p| p.symbol(b"name")), b"\"name\"");
        let out = collect(|p| {
            p.set_unquote(true);
            p.symbol(b"name");
        });
        assert_eq!(out, b"name");
    }

    #[test]
    fn flag_runs_are_space_separated() {
        let out = collect(|p| {
            p.delimit_enum_flags(true);
            p.enum_flag(0, "A");
            p.enum_flag(1, "B");
            p.delimit_enum_flags(true);
        });
        assert_eq!(out, b"\"A B\"");
    }

    #[test]
    fn indentation_tracks_level() {
        let out = collect(|p| {
            p.set_indent(3);
            p.add_level(2);
            p.newline();
        });
        assert_eq!(out, b"\n      ");
    }
}
