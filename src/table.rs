use crate::context::Printer;
use crate::error::Error;
use crate::scalar::{Scalar, SymbolPrinter};
use crate::wire;
use crate::NAME_LEN_MAX;

/// One table emitter, as generated by a schema compiler: issues field
/// primitives in declaration order against the descriptor it is handed.
pub type TablePrinter = fn(&mut Printer<'_>, &mut TableDescriptor<'_>);

/// One struct emitter: issues `*_struct_field` primitives against the
/// struct's base bytes.
pub type StructPrinter = fn(&mut Printer<'_>, &[u8]);

/// Resolved view of one table while its fields are being printed.
///
/// Built by the traversal engine from the table's signed vtable offset;
/// generated emitters receive it by reference and interact with it only
/// through the field primitives. `count` tracks how many fields have been
/// emitted so each primitive can place its own leading comma.
pub struct TableDescriptor<'b> {
    buf: &'b [u8],
    table: usize,
    vtable: usize,
    vsize: usize,
    ttl: u32,
    count: usize,
    union_type: u8,
}

impl<'b> TableDescriptor<'b> {
    /// The union discriminator this table was selected by, zero outside
    /// union emission. Generated union emitters dispatch on it.
    pub fn union_type(&self) -> u8 {
        self.union_type
    }

    pub(crate) fn buf(&self) -> &'b [u8] {
        self.buf
    }

    pub(crate) fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Position of the field with the given id, or `None` when absent. The
    /// vtable entry is bounds-checked against the vtable size; this is the
    /// only defense against malformed vtables.
    pub(crate) fn field(&self, id: usize) -> Option<usize> {
        let vo = (id + 2) * wire::VOFFSET_SIZE;
        if vo >= self.vsize {
            return None;
        }
        let off = wire::read_voffset(self.buf, self.vtable + vo);
        if off == 0 {
            return None;
        }
        Some(self.table + off as usize)
    }

    pub(crate) fn bump(&mut self) -> bool {
        let c = self.count;
        self.count += 1;
        c > 0
    }
}

impl<'a> Printer<'a> {
    /// Leading comma for every field after the first.
    pub(crate) fn comma(&mut self, td: &mut TableDescriptor<'_>) {
        if td.bump() {
            self.push(b',');
        }
    }

    /// Resolve the vtable of the table at `pos` and hand a descriptor to
    /// the generated emitter, enforcing the nesting budget.
    pub(crate) fn print_table_object(
        &mut self,
        buf: &[u8],
        pos: usize,
        ttl: u32,
        union_type: u8,
        pf: TablePrinter,
    ) {
        let ttl = ttl - 1;
        if ttl == 0 {
            self.set_error(Error::DeepRecursion);
            return;
        }
        self.start(b'{');
        let vtable = wire::vtable_at(buf, pos);
        let mut td = TableDescriptor {
            buf,
            table: pos,
            vtable,
            vsize: wire::read_voffset(buf, vtable) as usize,
            ttl,
            count: 0,
            union_type,
        };
        pf(self, &mut td);
        let empty = td.count == 0;
        self.end(b'}', empty);
    }

    /// String table field.
    pub fn string_field(&mut self, td: &mut TableDescriptor<'_>, id: usize, name: &str) {
        let Some(pos) = td.field(id) else { return };
        self.comma(td);
        self.name(name.as_bytes());
        self.string_object(td.buf(), wire::read_uoffset(td.buf(), pos));
    }

    /// Emit the length-prefixed string at `pos`. The declared length is
    /// authoritative; the trailing wire zero terminator is ignored.
    fn string_object(&mut self, buf: &[u8], pos: usize) {
        let len = wire::read_scalar::<u32>(buf, pos) as usize;
        let start = pos + wire::UOFFSET_SIZE;
        self.json_string(&buf[start..start + len]);
    }

    /// Vector of strings.
    pub fn string_vector_field(&mut self, td: &mut TableDescriptor<'_>, id: usize, name: &str) {
        let Some(pos) = td.field(id) else { return };
        self.comma(td);
        let vec = wire::read_uoffset(td.buf(), pos);
        let count = wire::read_scalar::<u32>(td.buf(), vec) as usize;
        let mut pos = vec + wire::UOFFSET_SIZE;
        self.name(name.as_bytes());
        self.start(b'[');
        for i in 0..count {
            if i > 0 {
                self.push(b',');
            }
            self.newline();
            self.string_object(td.buf(), wire::read_uoffset(td.buf(), pos));
            pos += wire::UOFFSET_SIZE;
        }
        self.end(b']', count == 0);
    }

    /// Nested table field. Recurses with the remaining nesting budget.
    pub fn table_field(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &str,
        pf: TablePrinter,
    ) {
        let Some(pos) = td.field(id) else { return };
        self.comma(td);
        self.name(name.as_bytes());
        let target = wire::read_uoffset(td.buf(), pos);
        self.print_table_object(td.buf(), target, td.ttl(), 0, pf);
    }

    /// Vector of tables.
    pub fn table_vector_field(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &str,
        pf: TablePrinter,
    ) {
        let Some(pos) = td.field(id) else { return };
        self.comma(td);
        let vec = wire::read_uoffset(td.buf(), pos);
        let count = wire::read_scalar::<u32>(td.buf(), vec) as usize;
        let mut pos = vec + wire::UOFFSET_SIZE;
        self.name(name.as_bytes());
        self.start(b'[');
        for i in 0..count {
            if i > 0 {
                self.push(b',');
            }
            let target = wire::read_uoffset(td.buf(), pos);
            self.print_table_object(td.buf(), target, td.ttl(), 0, pf);
            pos += wire::UOFFSET_SIZE;
        }
        self.end(b']', count == 0);
    }

    /// Inline struct table field.
    pub fn struct_field(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &str,
        pf: StructPrinter,
    ) {
        let Some(pos) = td.field(id) else { return };
        self.comma(td);
        self.name(name.as_bytes());
        self.start(b'{');
        pf(self, &td.buf()[pos..]);
        self.end(b'}', false);
    }

    /// Struct nested inside another struct, at a fixed offset from its
    /// base.
    pub fn embedded_struct_field(
        &mut self,
        index: usize,
        base: &[u8],
        offset: usize,
        name: &str,
        pf: StructPrinter,
    ) {
        if index > 0 {
            self.push(b',');
        }
        self.name(name.as_bytes());
        self.start(b'{');
        pf(self, &base[offset..]);
        self.end(b'}', false);
    }

    /// Vector of structs. `size` is the struct's wire size, the element
    /// stride.
    pub fn struct_vector_field(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &str,
        size: usize,
        pf: StructPrinter,
    ) {
        let Some(pos) = td.field(id) else { return };
        self.comma(td);
        let vec = wire::read_uoffset(td.buf(), pos);
        let count = wire::read_scalar::<u32>(td.buf(), vec) as usize;
        let mut pos = vec + wire::UOFFSET_SIZE;
        self.name(name.as_bytes());
        self.start(b'[');
        for i in 0..count {
            if i > 0 {
                self.push(b',');
            }
            self.newline();
            self.start(b'{');
            pf(self, &td.buf()[pos..]);
            self.end(b'}', false);
            pos += size;
        }
        self.end(b']', count == 0);
    }

    /// Union table field. The discriminator lives at the neighboring field
    /// id and is always emitted first under `<name>_type`; the value table
    /// follows only for a nonzero discriminator.
    pub fn union_field(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &str,
        ptf: SymbolPrinter<u8>,
        pf: TablePrinter,
    ) {
        if name.len() > NAME_LEN_MAX {
            self.set_error(Error::BadInput);
            return;
        }
        let (Some(pt), Some(pv)) = (td.field(id - 1), td.field(id)) else {
            return;
        };
        let utype: u8 = wire::read_scalar(td.buf(), pt);
        self.comma(td);
        self.newline();
        if !self.unquote {
            self.push(b'"');
        }
        self.raw(name.as_bytes());
        self.raw(b"_type");
        if !self.unquote {
            self.push(b'"');
        }
        self.push(b':');
        self.space();
        if self.noenum {
            utype.emit(self);
        } else {
            ptf(self, utype);
        }
        if utype != 0 {
            self.push(b',');
            self.name(name.as_bytes());
            let target = wire::read_uoffset(td.buf(), pv);
            self.print_table_object(td.buf(), target, td.ttl(), utype, pf);
        }
    }

    /// Vector of unions. The discriminator vector is emitted first under
    /// `<name>_type` through the enum-vector primitive; in the value vector
    /// a zero discriminator renders as `null`.
    pub fn union_vector_field(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &str,
        ptf: SymbolPrinter<u8>,
        pf: TablePrinter,
    ) {
        if name.len() > NAME_LEN_MAX {
            self.set_error(Error::BadInput);
            return;
        }
        let (Some(pt), Some(pv)) = (td.field(id - 1), td.field(id)) else {
            return;
        };
        let mut scratch = [0u8; NAME_LEN_MAX + 5];
        scratch[..name.len()].copy_from_slice(name.as_bytes());
        scratch[name.len()..name.len() + 5].copy_from_slice(b"_type");
        let split = name.len() + 5;
        self.enum_vector_field_raw::<u8>(td, id - 1, &scratch[..split], ptf);

        self.comma(td);
        let values = wire::read_uoffset(td.buf(), pv);
        let types = wire::read_uoffset(td.buf(), pt);
        let count = wire::read_scalar::<u32>(td.buf(), values) as usize;
        let mut vpos = values + wire::UOFFSET_SIZE;
        let mut tpos = types + wire::UOFFSET_SIZE;
        self.name(name.as_bytes());
        self.start(b'[');
        for i in 0..count {
            if i > 0 {
                self.push(b',');
            }
            let utype: u8 = wire::read_scalar(td.buf(), tpos);
            if utype != 0 {
                let target = wire::read_uoffset(td.buf(), vpos);
                self.print_table_object(td.buf(), target, td.ttl(), utype, pf);
            } else {
                self.put(b"null");
                self.flush_partial();
            }
            vpos += wire::UOFFSET_SIZE;
            tpos += 1;
        }
        self.end(b']', count == 0);
    }

    /// Byte vector rendered as a base64 string, standard or URL-safe
    /// alphabet, padded.
    pub fn uint8_vector_base64_field(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &str,
        urlsafe: bool,
    ) {
        let Some(pos) = td.field(id) else { return };
        self.comma(td);
        self.name(name.as_bytes());
        self.base64_object(td.buf(), wire::read_uoffset(td.buf(), pos), urlsafe);
    }

    /// Byte vector holding a complete sub-buffer, printed as a regular
    /// table object after its own header is validated.
    pub fn table_as_nested_root(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &str,
        fid: Option<&[u8; 4]>,
        pf: TablePrinter,
    ) {
        let Some(pos) = td.field(id) else { return };
        let vec = wire::read_uoffset(td.buf(), pos);
        let size = wire::read_scalar::<u32>(td.buf(), vec) as usize;
        let start = vec + wire::UOFFSET_SIZE;
        let nested = &td.buf()[start..start + size];
        if !self.accept_header(nested, fid) {
            return;
        }
        self.comma(td);
        self.name(name.as_bytes());
        let root = wire::read_uoffset(nested, 0);
        self.print_table_object(nested, root, td.ttl(), 0, pf);
    }

    /// Byte vector holding a complete sub-buffer whose root is a struct.
    pub fn struct_as_nested_root(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &str,
        fid: Option<&[u8; 4]>,
        pf: StructPrinter,
    ) {
        let Some(pos) = td.field(id) else { return };
        let vec = wire::read_uoffset(td.buf(), pos);
        let size = wire::read_scalar::<u32>(td.buf(), vec) as usize;
        let start = vec + wire::UOFFSET_SIZE;
        let nested = &td.buf()[start..start + size];
        if !self.accept_header(nested, fid) {
            return;
        }
        self.comma(td);
        self.name(name.as_bytes());
        self.start(b'{');
        let root = wire::read_uoffset(nested, 0);
        pf(self, &nested[root..]);
        self.end(b'}', false);
    }
}
