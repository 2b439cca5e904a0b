mod helpers;

use helpers::{display_string, print_to_string, write_string};
use matches::assert_matches;
use wapiti::printer::error::PrintError;
use wapiti::printer::{Mode, Printer};
use wapiti::settings;
use wapiti::value::port::{Direction, Port};
use wapiti::value::Value;

#[test]
fn test_write_and_display_terminate_on_nested_structures() {
    let mut v = Value::fixnum(0);
    for i in 0..100 {
        v = if i % 2 == 0 {
            Value::proper_list(vec![v])
        } else {
            Value::vector(vec![v])
        };
    }

    assert!(!write_string(&v).is_empty());
    assert!(!display_string(&v).is_empty());
}

#[test]
fn test_write_atoms_round_trip() {
    // the escaped form reads back as the original content
    assert_eq!(write_string(&Value::string("a\"b\\")), "\"a\\\"b\\\\\"");
    assert_eq!(write_string(&Value::fixnum(42)), "42");
    assert_eq!(write_string(&Value::character('\n')), "#\\newline");
}

#[test]
fn test_length_truncation() {
    let mut printer = Printer::default();

    let list = Value::proper_list((0..10).map(Value::fixnum).collect());
    assert_eq!(
        print_to_string(&mut printer, &list, Mode::Write, -1, 3),
        "(0 1 2 ...)"
    );

    let vector = Value::vector((0..5).map(Value::fixnum).collect());
    assert_eq!(
        print_to_string(&mut printer, &vector, Mode::Write, -1, 3),
        "#(0 1 2 ...)"
    );
}

#[test]
fn test_depth_truncation() {
    let mut printer = Printer::default();
    let nested = Value::proper_list(vec![Value::proper_list(vec![Value::proper_list(vec![
        Value::fixnum(1),
    ])])]);

    assert_eq!(print_to_string(&mut printer, &nested, Mode::Write, 1, -1), "(&)");
    assert_eq!(print_to_string(&mut printer, &nested, Mode::Write, 0, -1), "&");
}

#[test]
fn test_quote_abbreviation() {
    let quoted = Value::proper_list(vec![
        Value::symbol("quote"),
        Value::proper_list(vec![Value::symbol("a"), Value::symbol("b")]),
    ]);

    assert_eq!(write_string(&quoted), "'(a b)");
}

#[test]
fn test_dotted_tail() {
    let pair = Value::cons(Value::fixnum(1), Value::fixnum(3));
    assert_eq!(write_string(&pair), "(1 . 3)");
}

#[test]
fn test_memory_port_round_trip() {
    let mut printer = Printer::default();
    let port = Port::memory();

    printer
        .display(&Value::string("hello"), Some(&port))
        .unwrap();

    assert_eq!(printer.output_string(&port).unwrap(), "hello");
    assert_eq!(printer.output_string(&port).unwrap(), "");
}

#[test]
fn test_single_byte_writes_equal_bulk_write() {
    let mut printer = Printer::default();
    let text: String = "abcdefghij".repeat(20);

    let one_at_a_time = Port::memory();
    for c in text.chars() {
        printer.write_char(c, Some(&one_at_a_time)).unwrap();
    }

    let bulk = Port::memory();
    printer
        .display(&Value::string(text.as_str()), Some(&bulk))
        .unwrap();

    assert_eq!(
        printer.output_string(&one_at_a_time).unwrap(),
        printer.output_string(&bulk).unwrap()
    );
}

#[test]
fn test_closed_port_is_rejected() {
    let mut printer = Printer::default();
    let port = Port::memory();
    port.close();

    assert_matches!(
        printer.write(&Value::fixnum(1), Some(&port)),
        Err(PrintError::ClosedPort(_))
    );
    assert_matches!(
        printer.write_char('x', Some(&port)),
        Err(PrintError::ClosedPort(_))
    );
    assert_matches!(printer.flush(Some(&port)), Err(PrintError::ClosedPort(_)));
    assert_matches!(
        printer.output_string(&port),
        Err(PrintError::ClosedPort(_))
    );
}

#[test]
fn test_discard_output_keeps_memory_buffer_and_honors_port_guards() {
    let mut printer = Printer::default();
    let port = Port::memory();

    // memory ports have nothing buffered outside the buffer itself
    printer.display(&Value::string("kept"), Some(&port)).unwrap();
    printer.discard_output(Some(&port)).unwrap();
    assert_eq!(printer.output_string(&port).unwrap(), "kept");

    port.close();
    assert_matches!(
        printer.discard_output(Some(&port)),
        Err(PrintError::ClosedPort(_))
    );

    let input = Port::file("in.scm", Box::new(std::io::sink()), Direction::Input);
    assert_matches!(
        printer.discard_output(Some(&input)),
        Err(PrintError::NotAnOutputPort(_))
    );
}

#[test]
fn test_input_port_is_rejected() {
    let mut printer = Printer::default();
    let port = Port::file("in.scm", Box::new(std::io::sink()), Direction::Input);

    assert_matches!(
        printer.write(&Value::fixnum(1), Some(&port)),
        Err(PrintError::NotAnOutputPort(_))
    );
}

#[test]
fn test_default_port_is_the_current_output() {
    let mut printer = Printer::default();
    let port = Port::memory();
    printer.set_current_output(port.clone());

    printer.write(&Value::symbol("out"), None).unwrap();
    printer.newline(None).unwrap();

    assert_eq!(printer.output_string(&port).unwrap(), "out\n");
}

#[test]
fn test_print_line_terminates_and_flushes() {
    let mut printer = Printer::default();
    let port = Port::memory();

    printer
        .print_line(&Value::string("done"), Some(&port))
        .unwrap();

    assert_eq!(printer.output_string(&port).unwrap(), "\"done\"\n");
}

#[test]
fn test_configured_budgets_apply_to_write() {
    let mut printer = Printer::default();
    printer
        .settings_mut()
        .define(settings::PRINT_LENGTH, Value::fixnum(2));

    let port = Port::memory();
    let list = Value::proper_list((0..10).map(Value::fixnum).collect());
    printer.write(&list, Some(&port)).unwrap();

    assert_eq!(printer.output_string(&port).unwrap(), "(0 1 ...)");
}

#[test]
fn test_non_fixnum_budget_falls_back_to_default() {
    let mut printer = Printer::default();
    printer
        .settings_mut()
        .define(settings::PRINT_DEPTH, Value::string("deep"));

    let port = Port::memory();
    let nested = Value::proper_list(vec![Value::proper_list(vec![Value::fixnum(1)])]);
    printer.write(&nested, Some(&port)).unwrap();

    assert_eq!(printer.output_string(&port).unwrap(), "((1))");
}

#[test]
fn test_write_failure_reports_the_port() {
    struct FailingWriter;

    impl std::io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "device full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let mut printer = Printer::default();
    let port = Port::file("flaky.log", Box::new(FailingWriter), Direction::Output);

    let result = printer.write(&Value::fixnum(1), Some(&port));
    match result {
        Err(PrintError::WriteError(port_repr, reason)) => {
            assert!(port_repr.contains("flaky.log"));
            assert!(reason.contains("device full"));
        }
        other => panic!("expected a write error, got {:?}", other),
    }
}
