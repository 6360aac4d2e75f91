//! Fixed-width identifier table printed after the listing

use std::fmt::Write;

use crate::codegen::generator::GeneratorOutput;

const NAME_WIDTH: usize = 16;
const TYPE_WIDTH: usize = 10;
const NUMBER_WIDTH: usize = 8;

pub fn identifier_table(output: &GeneratorOutput) -> String {
    let mut table = String::new();
    let _ = writeln!(
        table,
        "{:<nw$}{:<tw$}{:>w$}{:>w$}",
        "IDENTIFIER",
        "TYPE",
        "OFFSET",
        "SIZE",
        nw = NAME_WIDTH,
        tw = TYPE_WIDTH,
        w = NUMBER_WIDTH
    );

    for entry in output.entries() {
        let _ = writeln!(
            table,
            "{:<nw$}{:<tw$}{:>w$}{:>w$}",
            entry.name,
            entry.kind.as_str(),
            entry.offset,
            entry.size,
            nw = NAME_WIDTH,
            tw = TYPE_WIDTH,
            w = NUMBER_WIDTH
        );
    }

    table
}
