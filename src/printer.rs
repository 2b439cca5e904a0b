pub mod error;
pub mod escape;
pub mod extension;
pub mod format;

use crate::gc::Roots;
use crate::settings::Settings;
use crate::value::number;
use crate::value::port::Port;
use crate::value::{Symbol, Value};
use error::Result;
use extension::ExtensionTable;
use std::io;
use std::rc::Rc;

/// The two textual policies a value can be rendered under.
///
/// `Write` produces the machine readable form: strings are quoted, special
/// characters escaped, so that the result reads back unambiguously.
/// `Display` produces the human readable form with none of that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Write,
    Display,
}

impl Mode {
    #[inline]
    pub fn is_raw(self) -> bool {
        matches!(self, Mode::Display)
    }
}

/// The printer context.
///
/// Owns everything the serializer needs across calls: the collector-facing
/// root set, the configuration variables, the extension dispatch table, the
/// current default output port and the reason of the most recent failed
/// write (rendered by the `~e`/`~E` format directives).
pub struct Printer {
    roots: Roots,
    settings: Settings,
    extensions: ExtensionTable,
    current_output: Port,
    saved_reason: Option<String>,
}

impl Printer {
    pub fn new(current_output: Port) -> Self {
        Self {
            roots: Roots::new(),
            settings: Settings::default(),
            extensions: ExtensionTable::new(),
            current_output,
            saved_reason: None,
        }
    }

    pub fn roots(&self) -> &Roots {
        &self.roots
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn current_output(&self) -> Port {
        self.current_output.clone()
    }

    pub fn set_current_output(&mut self, port: Port) {
        self.current_output = port;
    }

    pub fn register_extension<F>(&mut self, id: crate::value::ExtensionId, callback: F)
    where
        F: Fn(&mut Printer, &Value, &Port, Mode, i64, i64) -> Result<()> + 'static,
    {
        self.extensions.register(id, Rc::new(callback));
    }

    //
    // Entry points
    //

    /// Serialize `v` in write mode onto `port`, or the current output port
    /// if none is given. Budgets come from the configuration variables.
    pub fn write(&mut self, v: &Value, port: Option<&Port>) -> Result<()> {
        let port = self.resolve(port);
        self.print_default(v, &port, Mode::Write)
    }

    /// Serialize `v` in display mode.
    pub fn display(&mut self, v: &Value, port: Option<&Port>) -> Result<()> {
        let port = self.resolve(port);
        self.print_default(v, &port, Mode::Display)
    }

    pub fn write_char(&mut self, c: char, port: Option<&Port>) -> Result<()> {
        let port = self.resolve(port);
        self.print_default(&Value::Char(c), &port, Mode::Display)
    }

    pub fn newline(&mut self, port: Option<&Port>) -> Result<()> {
        self.write_char('\n', port)
    }

    /// Write `v`, terminate the line and flush.
    pub fn print_line(&mut self, v: &Value, port: Option<&Port>) -> Result<()> {
        let port = self.resolve(port);
        let _port_root = self.roots.pin(&Value::Port(port.clone()));

        self.print_default(v, &port, Mode::Write)?;
        self.emit_char(&port, '\n')?;
        self.flush(Some(&port))
    }

    /// Serialize with the configured depth and length budgets, guarding the
    /// port first.
    pub fn print_default(&mut self, v: &Value, port: &Port, mode: Mode) -> Result<()> {
        self.check_output_port(port)?;
        let depth = self.settings.print_depth();
        let length = self.settings.print_length();
        self.print(v, port, mode, depth, length)
    }

    pub fn flush(&mut self, port: Option<&Port>) -> Result<()> {
        let port = self.resolve(port);
        self.check_output_port(&port)?;
        port.flush().map_err(|e| self.write_failed(&port, e))
    }

    /// Drop buffered-but-unwritten bytes, best effort. A no-op for memory
    /// ports.
    pub fn discard_output(&mut self, port: Option<&Port>) -> Result<()> {
        let port = self.resolve(port);
        self.check_output_port(&port)?;
        port.discard();
        Ok(())
    }

    /// Take everything written to a memory port so far, leaving it
    /// logically empty.
    pub fn output_string(&mut self, port: &Port) -> Result<String> {
        self.check_output_port(port)?;
        let _port_root = self.roots.pin(&Value::Port(port.clone()));

        port.take_output_string()
            .ok_or_else(|| error::wrong_type("string output port", port_repr(port)))
    }

    /// The write mode text of a value, for error payloads that name the
    /// offending value. Best effort: whatever was produced before a failure
    /// is returned as-is.
    pub(crate) fn value_repr(&mut self, v: &Value) -> String {
        let port = Port::memory();
        let depth = self.settings.print_depth();
        let length = self.settings.print_length();

        let _ = self.print(v, &port, Mode::Write, depth, length);
        port.take_output_string().unwrap_or_default()
    }

    //
    // The serializer core
    //

    /// Serialize one value. `depth` and `length` below zero mean unbounded;
    /// a depth of zero prints the truncation marker instead of descending
    /// into a compound structure, and at most `length` elements are printed
    /// per sequence level before an ellipsis cuts the sequence short.
    pub fn print(&mut self, v: &Value, port: &Port, mode: Mode, depth: i64, length: i64) -> Result<()> {
        let _roots = self.roots.pin2(&Value::Port(port.clone()), v);

        match v {
            Value::Null => self.emit_str(port, "()"),
            Value::Fixnum(n) => self.emit_str(port, &number::fixnum_to_text(*n)),
            Value::Bignum(n) => self.emit_str(port, &number::integer_to_text(n)),
            Value::Flonum(n) => self.emit_str(port, &number::float_to_text(*n)),
            Value::Bool(true) => self.emit_str(port, "#t"),
            Value::Bool(false) => self.emit_str(port, "#f"),
            Value::Unbound => self.emit_str(port, "#[unbound]"),
            Value::Special => self.emit_str(port, "#[special]"),
            Value::EndOfFile => self.emit_str(port, "#[end-of-file]"),
            Value::Char(c) => {
                if mode.is_raw() {
                    self.emit_char(port, *c)
                } else {
                    self.emit_str(port, &escape::char_literal(*c))
                }
            }
            Value::Symbol(sym) => self.print_symbol(sym, port, mode),
            Value::String(s) => {
                let content = s.to_owned();
                self.print_string(&content, port, mode)
            }
            Value::Pair(_) => self.print_list(v, port, mode, depth, length),
            Value::Vector(_) => self.print_vector(v, port, mode, depth, length),
            Value::Environment(env) => {
                self.emit_fmt(port, format_args!("#[environment {}]", env.identity()))
            }
            Value::Primitive(p) => self.emit_fmt(port, format_args!("#[primitive {}]", p.name)),
            Value::Compound(c) => {
                if c.name.is_null() {
                    self.emit_fmt(port, format_args!("#[compound {}]", identity(c)))
                } else {
                    let name = c.name.clone();
                    self.emit_str(port, "#[compound ")?;
                    self.print(&name, port, mode, depth, length)?;
                    self.emit_char(port, ']')
                }
            }
            Value::ControlPoint(cp) => {
                self.emit_fmt(port, format_args!("#[control-point {}]", identity(cp)))
            }
            Value::Promise(p) => self.emit_fmt(port, format_args!("#[promise {}]", identity(p))),
            Value::Port(p) => {
                let repr = port_repr(p);
                self.emit_str(port, &repr)
            }
            Value::Autoload(a) => {
                let files = a.files.clone();
                self.emit_str(port, "#[autoload ")?;
                self.print(&files, port, mode, depth, length)?;
                self.emit_char(port, ']')
            }
            Value::Macro(m) => {
                if m.name.is_null() {
                    self.emit_fmt(port, format_args!("#[macro {}]", identity(m)))
                } else {
                    let name = m.name.clone();
                    self.emit_str(port, "#[macro ")?;
                    self.print(&name, port, mode, depth, length)?;
                    self.emit_char(port, ']')
                }
            }
            // left behind by the collector mid-relocation; reaching one here
            // means the collector and the runtime disagree about liveness
            Value::BrokenHeart => self.emit_str(port, "!!broken-heart!!"),
            Value::Extension(ext) => match self.extensions.lookup(ext.id) {
                Some(callback) => callback.as_ref()(self, v, port, mode, depth, length),
                None => panic!(
                    "bad type in print: no callback registered for extension category {}",
                    ext.id.0
                ),
            },
        }
    }

    fn print_symbol(&mut self, sym: &Symbol, port: &Port, mode: Mode) -> Result<()> {
        if mode.is_raw() {
            self.emit_str(port, sym.as_str())
        } else {
            let escaped = escape::escape_symbol(sym.as_str());
            self.emit_str(port, &escaped)
        }
    }

    fn print_string(&mut self, content: &str, port: &Port, mode: Mode) -> Result<()> {
        if mode.is_raw() {
            // one bulk write of the untouched content
            self.emit_str(port, content)
        } else {
            let escaped = escape::escape_string(content);
            self.emit_str(port, &escaped)
        }
    }

    fn print_list(&mut self, list: &Value, port: &Port, mode: Mode, depth: i64, length: i64) -> Result<()> {
        if depth == 0 {
            return self.emit_char(port, '&');
        }

        let _roots = self.roots.pin2(&Value::Port(port.clone()), list);

        if let Some((prefix, quoted)) = reader_abbreviation(list) {
            self.emit_str(port, prefix)?;
            return self.print(&quoted, port, mode, dec(depth), length);
        }

        self.emit_char(port, '(')?;

        let mut rest = list.clone();
        let mut printed: i64 = 0;
        while let Value::Pair(cell) = rest {
            if length >= 0 && printed >= length {
                self.emit_str(port, "...")?;
                break;
            }

            let pair = cell.to_owned();
            self.print(&pair.car, port, mode, dec(depth), length)?;
            printed += 1;

            match pair.cdr {
                Value::Null => break,
                tail @ Value::Pair(_) => {
                    self.emit_char(port, ' ')?;
                    rest = tail;
                }
                tail => {
                    // improper list: print the dotted tail and close early
                    self.emit_str(port, " . ")?;
                    self.print(&tail, port, mode, dec(depth), length)?;
                    break;
                }
            }
        }

        self.emit_char(port, ')')
    }

    fn print_vector(&mut self, vec: &Value, port: &Port, mode: Mode, depth: i64, length: i64) -> Result<()> {
        if depth == 0 {
            return self.emit_char(port, '&');
        }

        let _roots = self.roots.pin2(&Value::Port(port.clone()), vec);

        let elements = match vec {
            Value::Vector(elements) => elements.to_owned(),
            _ => unreachable!("print_vector called with a non-vector"),
        };

        self.emit_str(port, "#(")?;
        for (i, e) in elements.iter().enumerate() {
            if i > 0 {
                self.emit_char(port, ' ')?;
            }
            if length >= 0 && (i as i64) >= length {
                self.emit_str(port, "...")?;
                break;
            }
            self.print(e, port, mode, dec(depth), length)?;
        }
        self.emit_char(port, ')')
    }

    //
    // Emission layers
    //

    fn emit_char(&mut self, port: &Port, c: char) -> Result<()> {
        let mut buf = [0u8; 4];
        let encoded = c.encode_utf8(&mut buf);
        port.write_bytes(encoded.as_bytes())
            .map_err(|e| self.write_failed(port, e))
    }

    fn emit_str(&mut self, port: &Port, s: &str) -> Result<()> {
        port.write_bytes(s.as_bytes())
            .map_err(|e| self.write_failed(port, e))
    }

    /// The printf layer: renders computed text once, then hands it to the
    /// raw emission layer so backend selection lives in one place.
    fn emit_fmt(&mut self, port: &Port, args: std::fmt::Arguments) -> Result<()> {
        let text = args.to_string();
        self.emit_str(port, &text)
    }

    fn write_failed(&mut self, port: &Port, err: io::Error) -> error::PrintError {
        let reason = err.to_string();
        self.saved_reason = Some(reason.clone());
        error::write_error(port_repr(port), reason)
    }

    fn check_output_port(&self, port: &Port) -> Result<()> {
        if !port.is_open() {
            return Err(error::closed_port(port_repr(port)));
        }
        if !port.direction().is_output() {
            return Err(error::not_an_output_port(port_repr(port)));
        }
        Ok(())
    }

    fn resolve(&self, port: Option<&Port>) -> Port {
        match port {
            Some(p) => p.clone(),
            None => self.current_output.clone(),
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(Port::stdout())
    }
}

/// The printed form of a port, shared between the serializer and the error
/// messages that name an offending port.
fn port_repr(port: &Port) -> String {
    let kind = if port.is_memory() { "string" } else { "file" };
    match port.name() {
        Some(name) => format!(
            "#[{}-{}-port {}]",
            kind,
            port.direction().name(),
            escape::escape_string(&name)
        ),
        None => format!(
            "#[{}-{}-port {}]",
            kind,
            port.direction().name(),
            port.identity()
        ),
    }
}

fn identity<T>(rc: &Rc<T>) -> usize {
    Rc::as_ptr(rc) as usize
}

/// Budgets below zero stay unbounded, everything else pays one level per
/// descent.
#[inline]
fn dec(budget: i64) -> i64 {
    if budget < 0 {
        budget
    } else {
        budget - 1
    }
}

/// Detects the two-element lists the reader abbreviates: `(quote x)` and
/// friends, printed as `'x` and friends.
fn reader_abbreviation(list: &Value) -> Option<(&'static str, Value)> {
    if let Value::Pair(cell) = list {
        let pair = cell.to_owned();
        if let Value::Pair(second_cell) = &pair.cdr {
            let second = second_cell.to_owned();
            if second.cdr.is_null() {
                if let Value::Symbol(sym) = &pair.car {
                    let prefix = match sym.as_str() {
                        "quote" => "'",
                        "quasiquote" => "`",
                        "unquote" => ",",
                        "unquote-splicing" => ",@",
                        _ => return None,
                    };
                    return Some((prefix, second.car));
                }
            }
        }
    }
    None
}
