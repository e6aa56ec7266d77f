//! Hand-written emitters for a small demonstration schema, shaped exactly
//! like schema-compiler output: one printer function per enum, struct,
//! table, and union, each composed purely from the core field primitives
//! issued in declaration order.
//!
//! The schema, in IDL terms:
//!
//! ```text
//! enum Rank : ubyte { Rookie = 0, Sergeant = 1, Captain = 2 }
//! enum Perk : ubyte (bit_flags) { Swift = 1, Sturdy = 2, Sharp = 4 }
//! struct Vec2 { x: float; y: float; }
//! table Sword { name: string; damage: short = 10; }
//! union Weapon { Sword, Axe }
//! table Axe { weight: short = 3; }
//! table Creature {
//!     name: string;            // id 0
//!     hp: int = 100;           // id 1
//!     rank: Rank;              // id 2
//!     perks: Perk;             // id 3
//!     pos: Vec2;               // id 4
//!     waypoints: [ushort];     // id 5
//!     icon: [ubyte] (base64);  // id 6
//!     weapon: Weapon;          // ids 7 (type) and 8 (value)
//!     tags: [string];          // id 9
//!     arsenal: [Sword];        // id 10
//! }
//! root_type Creature;
//! file_identifier "CRTR";
//! ```

use flatjson::{Printer, Scalar, TableDescriptor};

/// File identifier carried by creature buffers.
pub const CREATURE_ID: &[u8; 4] = b"CRTR";

/// Wire size of the `Vec2` struct.
pub const VEC2_SIZE: usize = 8;

pub fn print_rank(p: &mut Printer<'_>, v: u8) {
    match v {
        0 => p.enum_symbol("Rookie"),
        1 => p.enum_symbol("Sergeant"),
        2 => p.enum_symbol("Captain"),
        _ => v.emit(p),
    }
}

pub fn print_perks(p: &mut Printer<'_>, v: u8) {
    let multiple = v.count_ones() > 1;
    p.delimit_enum_flags(multiple);
    let mut n = 0;
    if v & 1 != 0 {
        p.enum_flag(n, "Swift");
        n += 1;
    }
    if v & 2 != 0 {
        p.enum_flag(n, "Sturdy");
        n += 1;
    }
    if v & 4 != 0 {
        p.enum_flag(n, "Sharp");
    }
    p.delimit_enum_flags(multiple);
}

pub fn print_weapon_type(p: &mut Printer<'_>, v: u8) {
    match v {
        0 => p.enum_symbol("NONE"),
        1 => p.enum_symbol("Sword"),
        2 => p.enum_symbol("Axe"),
        _ => v.emit(p),
    }
}

pub fn print_vec2(p: &mut Printer<'_>, base: &[u8]) {
    p.scalar_struct_field::<f32>(0, base, 0, "x");
    p.scalar_struct_field::<f32>(1, base, 4, "y");
}

pub fn print_sword(p: &mut Printer<'_>, td: &mut TableDescriptor<'_>) {
    p.string_field(td, 0, "name");
    p.scalar_field::<i16>(td, 1, "damage", 10);
}

pub fn print_axe(p: &mut Printer<'_>, td: &mut TableDescriptor<'_>) {
    p.scalar_field::<i16>(td, 0, "weight", 3);
}

pub fn print_weapon(p: &mut Printer<'_>, td: &mut TableDescriptor<'_>) {
    match td.union_type() {
        1 => print_sword(p, td),
        2 => print_axe(p, td),
        _ => {}
    }
}

pub fn print_creature(p: &mut Printer<'_>, td: &mut TableDescriptor<'_>) {
    p.string_field(td, 0, "name");
    p.scalar_field::<i32>(td, 1, "hp", 100);
    p.enum_field::<u8>(td, 2, "rank", 0, print_rank);
    p.enum_field::<u8>(td, 3, "perks", 0, print_perks);
    p.struct_field(td, 4, "pos", print_vec2);
    p.scalar_vector_field::<u16>(td, 5, "waypoints");
    p.uint8_vector_base64_field(td, 6, "icon", false);
    p.union_field(td, 8, "weapon", print_weapon_type, print_weapon);
    p.string_vector_field(td, 9, "tags");
    p.table_vector_field(td, 10, "arsenal", print_sword);
}

/// A canned creature buffer: "Grendel", a Captain with two perks, a
/// position, three waypoints, a base64 icon, a Sword in the weapon union,
/// two tags, and one arsenal entry whose damage sits at the schema default.
///
/// Every position is listed so the layout can be checked against the wire
/// format by eye.
pub fn sample_creature() -> Vec<u8> {
    vec![
        // 0: root offset to the Creature table
        36, 0, 0, 0, //
        // 4: file identifier
        b'C', b'R', b'T', b'R', //
        // 8: Creature vtable: vsize 26, tsize 48, then field offsets for
        // ids 0..10
        26, 0, 48, 0, //
        4, 0, // id 0  name       at table +4
        8, 0, // id 1  hp         at +8
        12, 0, // id 2  rank       at +12
        13, 0, // id 3  perks      at +13
        16, 0, // id 4  pos        at +16
        24, 0, // id 5  waypoints  at +24
        28, 0, // id 6  icon       at +28
        32, 0, // id 7  weapon type at +32
        36, 0, // id 8  weapon     at +36
        40, 0, // id 9  tags       at +40
        44, 0, // id 10 arsenal    at +44
        // 34: pad
        0, 0, //
        // 36: Creature table: soffset 28 back to the vtable at 8
        28, 0, 0, 0, //
        // 40: name, uoffset 64 to the string at 104
        64, 0, 0, 0, //
        // 44: hp = 300
        44, 1, 0, 0, //
        // 48: rank = Captain, perks = Swift|Sharp, pad
        2, 5, 0, 0, //
        // 52: pos = (1.5, -2.0)
        0, 0, 0xC0, 0x3F, //
        0, 0, 0, 0xC0, //
        // 60: waypoints, uoffset 24 to the vector at 84
        24, 0, 0, 0, //
        // 64: icon, uoffset 32 to the vector at 96
        32, 0, 0, 0, //
        // 68: weapon type = Sword, pad
        1, 0, 0, 0, //
        // 72: weapon, uoffset 52 to the Sword table at 124
        52, 0, 0, 0, //
        // 76: tags, uoffset 72 to the vector at 148
        72, 0, 0, 0, //
        // 80: arsenal, uoffset 104 to the vector at 184
        104, 0, 0, 0, //
        // 84: waypoints vector: count 3, [7, 8, 9], pad
        3, 0, 0, 0, //
        7, 0, 8, 0, 9, 0, 0, 0, //
        // 96: icon vector: count 4, bytes
        4, 0, 0, 0, //
        0xDE, 0xAD, 0xBE, 0xEF, //
        // 104: name string: len 7, "Grendel", terminator
        7, 0, 0, 0, //
        b'G', b'r', b'e', b'n', b'd', b'e', b'l', 0, //
        // 116: Sword vtable: vsize 8, tsize 10, name at +4, damage at +8
        8, 0, 10, 0, 4, 0, 8, 0, //
        // 124: weapon Sword table: soffset 8 back to the vtable at 116
        8, 0, 0, 0, //
        // 128: sword name, uoffset 8 to the string at 136
        8, 0, 0, 0, //
        // 132: damage = 12, pad
        12, 0, 0, 0, //
        // 136: sword name string: len 4, "Edge", terminator, pad
        4, 0, 0, 0, //
        b'E', b'd', b'g', b'e', 0, 0, 0, 0, //
        // 148: tags vector: count 2, two string offsets
        2, 0, 0, 0, //
        8, 0, 0, 0, // element 0 at 152, uoffset 8 to 160
        16, 0, 0, 0, // element 1 at 156, uoffset 16 to 172
        // 160: "boss", terminator, pad
        4, 0, 0, 0, //
        b'b', b'o', b's', b's', 0, 0, 0, 0, //
        // 172: "night", terminator, pad
        5, 0, 0, 0, //
        b'n', b'i', b'g', b'h', b't', 0, 0, 0, //
        // 184: arsenal vector: count 1, one table offset
        1, 0, 0, 0, //
        4, 0, 0, 0, // element 0 at 188, uoffset 4 to 192
        // 192: arsenal Sword table: soffset 76 back to the vtable at 116
        76, 0, 0, 0, //
        // 196: name, uoffset 8 to the string at 204
        8, 0, 0, 0, //
        // 200: damage = 10, the schema default, pad
        10, 0, 0, 0, //
        // 204: "Spare", terminator, pad
        5, 0, 0, 0, //
        b'S', b'p', b'a', b'r', b'e', 0, 0, 0, //
    ]
}
