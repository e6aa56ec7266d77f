// example/src/main.rs

use flatjson::{Error, Printer};
use flatjson_sdk::sample::{print_creature, sample_creature, CREATURE_ID};
use flatjson_sdk::{print_to_string, Options};

fn main() -> Result<(), Error> {
    // A wire buffer as some other process would hand it to us. The sample
    // module plays the role of generated code for its schema.
    let buf = sample_creature();

    // One-shot: compact standard JSON, defaults skipped.
    let compact = print_to_string(&buf, Some(CREATURE_ID), print_creature, Options::default())?;
    println!("compact ({} bytes):", compact.len());
    println!("{}", compact);

    // One-shot again, indented, with numeric enums.
    let pretty = print_to_string(
        &buf,
        Some(CREATURE_ID),
        print_creature,
        Options {
            indent: 2,
            noenum: true,
            ..Options::default()
        },
    )?;
    println!("indented, numeric enums:");
    println!("{}", pretty);

    // Driving the printer directly: stream sink, unquoted identifiers.
    let mut out = Vec::new();
    {
        let mut p = Printer::stream(&mut out);
        p.set_indent(4);
        p.set_unquote(true);
        let total = p.table_as_root(&buf, Some(CREATURE_ID), print_creature)?;
        println!("streamed {} bytes with unquoted names:", total);
    }
    println!("{}", String::from_utf8_lossy(&out));

    Ok(())
}
