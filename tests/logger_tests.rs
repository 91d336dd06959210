use exprlog::{
    div_rem, log_array_to, log_matrix_to, log_to, Logger, Loggable, Prefix, Queue,
    SharedBuffer, Sink, Stack, Terminator,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::thread;

fn capture(prefixes: Prefix) -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .prefixes(prefixes)
        .sink(Sink::new(buffer.clone()))
        .build();
    (logger, buffer)
}

struct CustInsOp {
    value: i32,
}

impl Loggable for CustInsOp {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "<CustInsOp: {}>", self.value)
    }
}

#[test]
fn test_single_value() {
    let (logger, buffer) = capture(Prefix::NONE);
    let i = 1;
    log_to!(logger; i);
    assert_eq!(buffer.contents(), "i = 1\n");
}

#[test]
fn test_two_values() {
    let (logger, buffer) = capture(Prefix::NONE);
    let s = "s";
    let i = 1;
    log_to!(logger; i, s);
    assert_eq!(buffer.contents(), "i = 1, s = \"s\"\n");
}

#[test]
fn test_second_value_extends_first() {
    let (logger, buffer) = capture(Prefix::NONE);
    let a = 4u64;
    let b = 'b';

    log_to!(logger; a);
    let single = buffer.take();
    log_to!(logger; a, b);
    let pair = buffer.take();

    let expected = format!("{}, b = 'b'\n", single.trim_end_matches('\n'));
    assert_eq!(pair, expected);
}

#[test]
fn test_expression_text_is_captured() {
    let (logger, buffer) = capture(Prefix::NONE);
    let a = 1;
    let c = 7u32;
    let g = &a;
    log_to!(logger; *g, a + 2, 0, "j", c as i64 - 8);
    assert_eq!(
        buffer.contents(),
        "*g = 1, a + 2 = 3, 0 = 0, \"j\" = \"j\", c as i64 - 8 = -1\n"
    );
}

#[test]
fn test_sixteen_values() {
    let (logger, buffer) = capture(Prefix::NONE);
    let (a, b, c, d, e, f, g, h) = (1, 2, 3, 4, 5, 6, 7, 8);
    log_to!(logger; a, b, c, d, e, f, g, h, a, b, c, d, e, f, g, h);

    let line = buffer.contents();
    assert_eq!(line.matches(" = ").count(), 16);
    assert!(line.starts_with("a = 1, b = 2"));
    assert!(line.ends_with("g = 7, h = 8\n"));
}

#[test]
fn test_mixed_types() {
    let (logger, buffer) = capture(Prefix::NONE);
    let a = 1;
    let b = "hej";
    let e = true;
    let f = String::from("asdsa");
    let h = CustInsOp { value: 5 };
    let none: Option<i32> = None;
    log_to!(logger; a, b, e, f, h, none);
    assert_eq!(
        buffer.contents(),
        "a = 1, b = \"hej\", e = true, f = \"asdsa\", h = <CustInsOp: 5>, none = None\n"
    );
}

#[test]
fn test_file_and_line_prefix() {
    let (logger, buffer) = capture(Prefix::FILE | Prefix::LINE);
    let i = 1;
    let line = line!(); log_to!(logger; i);
    assert_eq!(buffer.contents(), format!("logger_tests.rs:{}: i = 1\n", line));
}

#[test]
fn test_function_prefix() {
    let (logger, buffer) = capture(Prefix::FUNCTION);
    let i = 1;
    log_to!(logger; i);
    assert_eq!(buffer.contents(), "test_function_prefix(): i = 1\n");
}

#[test]
fn test_function_prefix_inside_closure() {
    let (logger, buffer) = capture(Prefix::FUNCTION);
    let run = |x: i32| log_to!(logger; x);
    run(3);
    assert_eq!(buffer.contents(), "test_function_prefix_inside_closure(): x = 3\n");
}

#[test]
fn test_type_name_prefix() {
    let (logger, buffer) = capture(Prefix::TYPE_NAME);
    let i = 1i32;
    let f = 2.5f64;
    let s = String::from("s");
    let p: *const i32 = &i;
    log_to!(logger; i, f, s);
    log_to!(logger; p);

    let out = buffer.contents();
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("i32 i = 1, f64 f = 2.5, String s = \"s\""));
    assert!(lines.next().unwrap().starts_with("const i32* p = 0x"));
}

#[test]
fn test_output_disabled_writes_nothing() {
    let (logger, buffer) = capture(Prefix::all());
    let i = 1;
    let a = [1, 2];
    let m = [[1]];

    logger.config().set_output_enabled(false);
    log_to!(logger; i);
    log_array_to!(logger; a, 2);
    log_matrix_to!(logger; m, 1, 1);
    assert!(buffer.is_empty());

    logger.config().set_output_enabled(true);
    logger.config().set_prefixes(Prefix::NONE);
    log_to!(logger; i);
    assert_eq!(buffer.contents(), "i = 1\n");
}

#[test]
fn test_disabled_output_skips_evaluation() {
    let (logger, buffer) = capture(Prefix::NONE);
    logger.config().set_output_enabled(false);

    let mut calls = 0;
    let mut bump = || {
        calls += 1;
        calls
    };
    log_to!(logger; bump());
    assert_eq!(calls, 0);
    assert!(buffer.is_empty());
}

#[test]
fn test_color_brackets_every_record() {
    let (logger, buffer) = capture(Prefix::NONE);
    logger.config().set_color_enabled(true);
    let i = 1;
    let a = [0];
    let m = [[0]];
    log_to!(logger; i);
    log_array_to!(logger; a, 1);
    log_matrix_to!(logger; m, 1, 1);

    for line in buffer.contents().lines() {
        assert!(line.starts_with("\x1b[0;31m"), "missing color start: {line:?}");
        assert!(line.ends_with("\x1b[0m"), "missing color end: {line:?}");
    }
    assert_eq!(buffer.contents().lines().count(), 3);
}

#[test]
fn test_array() {
    let (logger, buffer) = capture(Prefix::NONE);
    let a = [0, 1, 2];
    log_array_to!(logger; a, 3);
    assert_eq!(buffer.contents(), "a = {0, 1, 2}\n");
}

#[test]
fn test_array_prefix_of_region() {
    let (logger, buffer) = capture(Prefix::NONE);
    let v = vec!["x", "y", "z"];
    let empty: [i32; 0] = [];
    log_array_to!(logger; v, 2);
    log_array_to!(logger; empty, 0);
    log_array_to!(logger; v, 0);
    assert_eq!(buffer.contents(), "v = {\"x\", \"y\"}\nempty = {}\nv = {}\n");
}

#[test]
fn test_array_through_slice_reference() {
    let (logger, buffer) = capture(Prefix::NONE);
    let data = [1.5, 2.5, 3.5];
    let tail: &[f64] = &data[1..];
    log_array_to!(logger; tail, tail.len());
    assert_eq!(buffer.contents(), "tail = {2.5, 3.5}\n");
}

#[test]
#[should_panic]
fn test_array_length_past_region_panics() {
    let (logger, _buffer) = capture(Prefix::NONE);
    let a = [0, 1];
    log_array_to!(logger; a, 3);
}

#[test]
fn test_matrix() {
    let (logger, buffer) = capture(Prefix::NONE);
    let m = [[11, 12], [21, 22]];
    log_matrix_to!(logger; m, 2, 2);
    assert_eq!(
        buffer.contents(),
        "m: [0,0] = 11, [0,1] = 12, [1,0] = 21, [1,1] = 22\n"
    );
}

#[test]
fn test_matrix_zero_dimension() {
    let (logger, buffer) = capture(Prefix::NONE);
    let m = [[1, 2], [3, 4]];
    log_matrix_to!(logger; m, 0, 2);
    log_matrix_to!(logger; m, 2, 0);
    assert_eq!(buffer.contents(), "m: {}\nm: {}\n");
}

#[test]
fn test_matrix_row_major_order() {
    let (logger, buffer) = capture(Prefix::NONE);
    let grid: Vec<Vec<char>> = vec![vec!['a', 'b', 'c'], vec!['d', 'e', 'f']];
    log_matrix_to!(logger; grid, 3, 2);
    assert_eq!(
        buffer.contents(),
        "grid: [0,0] = 'a', [0,1] = 'b', [0,2] = 'c', [1,0] = 'd', [1,1] = 'e', [1,2] = 'f'\n"
    );
}

#[test]
fn test_array_and_matrix_type_tags() {
    let (logger, buffer) = capture(Prefix::TYPE_NAME);
    let a = [1u8, 2];
    let m = [[1i64]];
    log_array_to!(logger; a, 2);
    log_matrix_to!(logger; m, 1, 1);
    assert_eq!(buffer.contents(), "u8[] a = {1, 2}\ni64[][] m: [0,0] = 1\n");
}

#[test]
fn test_stack() {
    let (logger, buffer) = capture(Prefix::NONE);
    let mut stack = Stack::new();
    stack.push(2);
    stack.push(1);
    stack.push(0);
    log_to!(logger; stack);

    let mut one = Stack::new();
    one.push(0);
    log_to!(logger; one);
    assert_eq!(buffer.contents(), "stack = {0, ...}\none = {0}\n");
}

#[test]
fn test_queue_and_map() {
    let (logger, buffer) = capture(Prefix::NONE);
    let q: Queue<i32> = (1..=3).collect();
    let scores = BTreeMap::from([("a", 1.5), ("b", 2.0)]);
    log_to!(logger; q, scores);
    assert_eq!(
        buffer.contents(),
        "q = {1, ..., 3}, scores = {\"a\": 1.5, \"b\": 2}\n"
    );
}

#[test]
fn test_div_rem_value() {
    let (logger, buffer) = capture(Prefix::NONE);
    log_to!(logger; div_rem(17, 5));
    assert_eq!(buffer.contents(), "div_rem(17, 5) = {quot = 3, rem = 2}\n");
}

#[test]
fn test_custom_terminator() {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .prefixes(Prefix::NONE)
        .terminator(Terminator::new(" end\n", false))
        .sink(Sink::new(buffer.clone()))
        .build();
    let i = 1;
    let a = [0, 1];
    let m = [[0, 1], [2, 3]];
    log_to!(logger; i);
    log_array_to!(logger; a, 2);
    log_matrix_to!(logger; m, 2, 2);
    assert_eq!(
        buffer.contents(),
        "i = 1 end\na = {0, 1} end\nm: [0,0] = 0, [0,1] = 1, [1,0] = 2, [1,1] = 3 end\n"
    );
}

#[test]
fn test_numbers_parse_back() {
    let (logger, buffer) = capture(Prefix::NONE);
    let x = -0.1f64 / 3.0;
    let n = i64::MIN;
    log_to!(logger; x);
    log_to!(logger; n);

    let out = buffer.contents();
    let mut lines = out.lines();
    let parsed_x: f64 = lines.next().unwrap().strip_prefix("x = ").unwrap().parse().unwrap();
    let parsed_n: i64 = lines.next().unwrap().strip_prefix("n = ").unwrap().parse().unwrap();
    assert_eq!(parsed_x, x);
    assert_eq!(parsed_n, n);
}

#[test]
fn test_records_from_threads_stay_whole() {
    let (logger, buffer) = capture(Prefix::THREAD);
    let logger = Arc::new(logger);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..100 {
                    log_to!(logger; t, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let out = buffer.contents();
    assert_eq!(out.lines().count(), 400);
    for line in out.lines() {
        assert!(line.starts_with("TID: "), "unexpected line {line:?}");
        assert!(line.contains(": t = "), "unexpected line {line:?}");
    }
}

#[test]
fn test_failing_sink_truncates_record() {
    struct Partial {
        inner: SharedBuffer,
        budget: usize,
    }

    impl std::io::Write for Partial {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.budget == 0 {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "full"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            std::io::Write::write(&mut self.inner, &buf[..n])
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let partial = SharedBuffer::new();
    let logger = Logger::builder()
        .prefixes(Prefix::NONE)
        .sink(Sink::new(Partial {
            inner: partial.clone(),
            budget: 4,
        }))
        .build();
    let i = 1;
    let j = 2;
    log_to!(logger; i);
    log_to!(logger; j);
    assert_eq!(partial.contents(), "i = ");

    let working = SharedBuffer::new();
    logger.sink().redirect(Box::new(working.clone()));
    log_to!(logger; j);
    assert_eq!(working.contents(), "j = 2\n");
    assert_eq!(partial.contents(), "i = ");
}
