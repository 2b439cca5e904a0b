use wapiti::printer::{Mode, Printer};
use wapiti::value::port::Port;
use wapiti::value::Value;

pub fn print_to_string(printer: &mut Printer, v: &Value, mode: Mode, depth: i64, length: i64) -> String {
    let port = Port::memory();
    printer.print(v, &port, mode, depth, length).unwrap();
    port.take_output_string().unwrap()
}

pub fn write_string(v: &Value) -> String {
    let mut printer = Printer::default();
    print_to_string(&mut printer, v, Mode::Write, -1, -1)
}

pub fn display_string(v: &Value) -> String {
    let mut printer = Printer::default();
    print_to_string(&mut printer, v, Mode::Display, -1, -1)
}
