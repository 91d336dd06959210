use std::collections::BTreeMap;
use std::io;

use exprlog::{div_rem, log, log_array, log_matrix, Prefix, Queue, Stack};

/// Logs a sample of every record shape with all prefixes switched on.
fn main() -> io::Result<()> {
    exprlog::set_prefixes(Prefix::all());

    let i = 1;
    let s = "s";
    log!(i, s, i + 1);

    let a = [0, 1, 2];
    log_array!(a, 3);

    let m = [[11, 12], [21, 22]];
    log_matrix!(m, 2, 2);

    let stack: Stack<_> = (0..3).rev().collect();
    let queue: Queue<_> = (1..=5).collect();
    let ages = BTreeMap::from([("ada", 36), ("alan", 41)]);
    exprlog::set_prefixes(Prefix::FILE | Prefix::LINE);
    log!(stack, queue, ages, div_rem(17, 5));

    exprlog::global().sink().flush()
}
