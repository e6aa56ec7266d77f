use crate::context::Printer;
use crate::table::TableDescriptor;
use crate::wire;

/// Renders one enum value as its symbol (or symbols, for flag enums).
/// Schema compilers generate one of these per enum.
pub type SymbolPrinter<T> = fn(&mut Printer<'_>, T);

/// The wire scalar set: every type that can appear as a table or struct
/// field value. Combines the little-endian read with the JSON rendering, so
/// the field primitives are generic over it and monomorphize per type.
pub trait Scalar: wire::Wire + PartialEq {
    /// Render the value. At most a few dozen bytes, always within the
    /// reserve window, so no space check is needed.
    fn emit(self, out: &mut Printer<'_>);
}

macro_rules! int_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            fn emit(self, out: &mut Printer<'_>) {
                let mut digits = itoa::Buffer::new();
                out.put(digits.format(self).as_bytes());
            }
        }
    )*};
}

int_scalar!(u8, u16, u32, u64, i8, i16, i32, i64);

impl Scalar for bool {
    fn emit(self, out: &mut Printer<'_>) {
        out.put(if self { b"true" as &[u8] } else { b"false" });
    }
}

#[cfg(not(feature = "hex-float"))]
impl Scalar for f32 {
    fn emit(self, out: &mut Printer<'_>) {
        let mut digits = ryu::Buffer::new();
        out.put(digits.format(self).as_bytes());
    }
}

#[cfg(not(feature = "hex-float"))]
impl Scalar for f64 {
    fn emit(self, out: &mut Printer<'_>) {
        let mut digits = ryu::Buffer::new();
        out.put(digits.format(self).as_bytes());
    }
}

#[cfg(feature = "hex-float")]
impl Scalar for f32 {
    fn emit(self, out: &mut Printer<'_>) {
        let mut tmp = [0u8; 32];
        let n = hex_double(self as f64, &mut tmp);
        out.put(&tmp[..n]);
    }
}

#[cfg(feature = "hex-float")]
impl Scalar for f64 {
    fn emit(self, out: &mut Printer<'_>) {
        let mut tmp = [0u8; 32];
        let n = hex_double(self, &mut tmp);
        out.put(&tmp[..n]);
    }
}

/// C99-style `%a` rendering: `0x1.<frac>p<exp>`, shortest fraction.
#[cfg(feature = "hex-float")]
fn hex_double(v: f64, buf: &mut [u8; 32]) -> usize {
    const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

    let bits = v.to_bits();
    let mut n = 0;
    if bits >> 63 != 0 {
        buf[n] = b'-';
        n += 1;
    }
    let exp = ((bits >> 52) & 0x7ff) as i64;
    let mut frac = bits & ((1u64 << 52) - 1);
    if exp == 0x7ff {
        let s: &[u8] = if frac != 0 { b"nan" } else { b"inf" };
        buf[n..n + s.len()].copy_from_slice(s);
        return n + s.len();
    }
    let (lead, e) = if exp == 0 {
        if frac == 0 {
            (b'0', 0)
        } else {
            (b'0', -1022)
        }
    } else {
        (b'1', exp - 1023)
    };
    buf[n] = b'0';
    buf[n + 1] = b'x';
    buf[n + 2] = lead;
    n += 3;
    if frac != 0 {
        buf[n] = b'.';
        n += 1;
        while frac != 0 {
            buf[n] = HEX_DIGITS[(frac >> 48) as usize & 0xf];
            n += 1;
            frac <<= 4;
        }
    }
    buf[n] = b'p';
    n += 1;
    if e >= 0 {
        buf[n] = b'+';
        n += 1;
    }
    let mut digits = itoa::Buffer::new();
    let s = digits.format(e);
    buf[n..n + s.len()].copy_from_slice(s.as_bytes());
    n + s.len()
}

impl<'a> Printer<'a> {
    /// Scalar table field. Absent fields emit nothing unless
    /// `force_default` is set; present fields equal to `default` emit
    /// nothing when `skip_default` is set.
    pub fn scalar_field<T: Scalar>(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &str,
        default: T,
    ) {
        let x = match td.field(id) {
            Some(pos) => {
                let x: T = wire::read_scalar(td.buf(), pos);
                if x == default && self.skip_default {
                    return;
                }
                x
            }
            None => {
                if !self.force_default {
                    return;
                }
                default
            }
        };
        self.comma(td);
        self.name(name.as_bytes());
        x.emit(self);
    }

    /// Enum table field: as [`scalar_field`], but the value rendering is
    /// delegated to the generated symbol printer unless `noenum` is set.
    ///
    /// [`scalar_field`]: Printer::scalar_field
    pub fn enum_field<T: Scalar>(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &str,
        default: T,
        sym: SymbolPrinter<T>,
    ) {
        let x = match td.field(id) {
            Some(pos) => {
                let x: T = wire::read_scalar(td.buf(), pos);
                if x == default && self.skip_default {
                    return;
                }
                x
            }
            None => {
                if !self.force_default {
                    return;
                }
                default
            }
        };
        self.comma(td);
        self.name(name.as_bytes());
        if self.noenum {
            x.emit(self);
        } else {
            sym(self, x);
        }
    }

    /// Vector of scalars.
    pub fn scalar_vector_field<T: Scalar>(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &str,
    ) {
        self.scalar_vector_field_raw::<T>(td, id, name.as_bytes());
    }

    pub(crate) fn scalar_vector_field_raw<T: Scalar>(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &[u8],
    ) {
        let Some(pos) = td.field(id) else { return };
        self.comma(td);
        let vec = wire::read_uoffset(td.buf(), pos);
        let count = wire::read_scalar::<u32>(td.buf(), vec) as usize;
        let mut pos = vec + wire::UOFFSET_SIZE;
        self.name(name);
        self.start(b'[');
        for i in 0..count {
            if i > 0 {
                self.push(b',');
            }
            self.newline();
            let x: T = wire::read_scalar(td.buf(), pos);
            x.emit(self);
            pos += T::SIZE;
        }
        self.end(b']', count == 0);
    }

    /// Vector of enums. Falls back to the numeric form when `noenum` is
    /// set.
    pub fn enum_vector_field<T: Scalar>(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &str,
        sym: SymbolPrinter<T>,
    ) {
        self.enum_vector_field_raw::<T>(td, id, name.as_bytes(), sym);
    }

    pub(crate) fn enum_vector_field_raw<T: Scalar>(
        &mut self,
        td: &mut TableDescriptor<'_>,
        id: usize,
        name: &[u8],
        sym: SymbolPrinter<T>,
    ) {
        if self.noenum {
            self.scalar_vector_field_raw::<T>(td, id, name);
            return;
        }
        let Some(pos) = td.field(id) else { return };
        self.comma(td);
        let vec = wire::read_uoffset(td.buf(), pos);
        let count = wire::read_scalar::<u32>(td.buf(), vec) as usize;
        let mut pos = vec + wire::UOFFSET_SIZE;
        self.name(name);
        self.start(b'[');
        for i in 0..count {
            if i > 0 {
                self.push(b',');
            }
            self.newline();
            let x: T = wire::read_scalar(td.buf(), pos);
            sym(self, x);
            pos += T::SIZE;
        }
        self.end(b']', count == 0);
    }

    /// Scalar struct field. Structs have no vtable; the field lives at a
    /// compile-time-known `offset` from `base`, and `index` carries the
    /// comma accounting the table descriptor would otherwise provide.
    pub fn scalar_struct_field<T: Scalar>(
        &mut self,
        index: usize,
        base: &[u8],
        offset: usize,
        name: &str,
    ) {
        let x: T = wire::read_scalar(base, offset);
        if index > 0 {
            self.push(b',');
        }
        self.name(name.as_bytes());
        x.emit(self);
    }

    /// Enum struct field.
    pub fn enum_struct_field<T: Scalar>(
        &mut self,
        index: usize,
        base: &[u8],
        offset: usize,
        name: &str,
        sym: SymbolPrinter<T>,
    ) {
        let x: T = wire::read_scalar(base, offset);
        if index > 0 {
            self.push(b',');
        }
        self.name(name.as_bytes());
        if self.noenum {
            x.emit(self);
        } else {
            sym(self, x);
        }
    }
}
