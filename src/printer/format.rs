use super::error::{self, Result};
use super::{Mode, Printer};
use crate::value::port::Port;
use crate::value::Value;

/// Where `format` sends its output: the current default output port, an
/// explicit open output port, or nowhere visible, in which case the
/// produced text is returned to the caller.
pub enum Destination {
    Default,
    Text,
    Port(Port),
}

impl Printer {
    /// Interpret a format template against a positional argument list.
    ///
    /// Directives are introduced by `~`:
    /// `~~` a literal tilde, `~%` a newline, `~s` the next argument in
    /// write mode, `~a` the next argument in display mode, `~c` the next
    /// argument as a raw character, `~e`/`~E` the most recent write
    /// failure's reason. Any other byte after `~` is emitted literally; a
    /// bare `~` at the end of the template is dropped.
    ///
    /// Returns the produced text for `Destination::Text`, `None` otherwise.
    pub fn format(
        &mut self,
        destination: Destination,
        template: &str,
        args: &[Value],
    ) -> Result<Option<String>> {
        log::trace!("format {:?} with {} argument(s)", template, args.len());

        match destination {
            Destination::Default => {
                let port = self.current_output();
                self.run_template(&port, template, args)?;
                Ok(None)
            }
            Destination::Port(port) => {
                self.check_output_port(&port)?;
                self.run_template(&port, template, args)?;
                Ok(None)
            }
            Destination::Text => {
                let port = Port::memory();
                self.run_template(&port, template, args)?;
                Ok(Some(self.output_string(&port)?))
            }
        }
    }

    fn run_template(&mut self, port: &Port, template: &str, args: &[Value]) -> Result<()> {
        let _port_root = self.roots.pin(&Value::Port(port.clone()));

        let mut chars = template.chars();
        let mut cursor = 0;

        while let Some(c) = chars.next() {
            if c != '~' {
                self.emit_char(port, c)?;
                continue;
            }

            let directive = match chars.next() {
                Some(d) => d,
                // a bare trailing tilde has nothing left to consume
                None => break,
            };

            match directive {
                '~' => self.emit_char(port, '~')?,
                '%' => self.emit_char(port, '\n')?,
                'e' | 'E' => self.print_saved_reason(port, directive == 'E')?,
                's' | 'a' | 'c' => {
                    let arg = match args.get(cursor) {
                        Some(arg) => arg,
                        None => return Err(error::too_few_arguments(template)),
                    };
                    cursor += 1;

                    match directive {
                        's' => {
                            let depth = self.settings.print_depth();
                            let length = self.settings.print_length();
                            self.print(arg, port, Mode::Write, depth, length)?
                        }
                        'a' => {
                            let depth = self.settings.print_depth();
                            let length = self.settings.print_length();
                            self.print(arg, port, Mode::Display, depth, length)?
                        }
                        'c' => match arg {
                            Value::Char(c) => self.emit_char(port, *c)?,
                            other => {
                                let repr = self.value_repr(other);
                                return Err(error::wrong_type("character", repr));
                            }
                        },
                        _ => unreachable!(),
                    }
                }
                // not a documented directive; fall back to the byte itself
                other => self.emit_char(port, other)?,
            }
        }

        Ok(())
    }

    /// Renders the reason of the most recent failed write as a display mode
    /// string, lower-casing the first letter unless `preserve_case`.
    fn print_saved_reason(&mut self, port: &Port, preserve_case: bool) -> Result<()> {
        let reason = self
            .saved_reason
            .clone()
            .unwrap_or_else(|| String::from("no error"));

        let text = if preserve_case {
            reason
        } else {
            let mut chars = reason.chars();
            match chars.next() {
                Some(first) => {
                    let mut lowered: String = first.to_lowercase().collect();
                    lowered.push_str(chars.as_str());
                    lowered
                }
                None => String::new(),
            }
        };

        let message = Value::string(text);
        self.print(&message, port, Mode::Display, 0, 0)
    }
}
