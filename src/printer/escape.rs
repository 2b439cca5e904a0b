use std::collections::HashSet;

/// The printable encodings of characters, strings and symbols.
///
/// These are pure functions over the value's content; the serializer and the
/// port renderer emit whatever comes back. Write mode uses them, display
/// mode bypasses them entirely.

lazy_static! {
    // characters that read back as something else unless prefixed with a
    // backslash inside a symbol
    static ref SYMBOL_ESCAPES: HashSet<char> = "\\;#()'`,\". \t\n".chars().collect();
}

/// A character is emitted verbatim only if it falls into the printable
/// ascii range; everything else gets an escape form.
pub fn is_printable(c: char) -> bool {
    c >= ' ' && (c as u32) < 0x7f
}

/// The `#\...` literal for a character: a mnemonic name where one exists,
/// the character itself when printable, a three digit octal escape
/// otherwise.
pub fn char_literal(c: char) -> String {
    match c {
        ' ' => String::from("#\\space"),
        '\t' => String::from("#\\tab"),
        '\n' => String::from("#\\newline"),
        '\r' => String::from("#\\return"),
        '\u{c}' => String::from("#\\formfeed"),
        '\u{8}' => String::from("#\\backspace"),
        c if c > ' ' && (c as u32) < 0x7f => format!("#\\{}", c),
        c => {
            let mut out = String::from("#\\");
            for byte in encode(c).iter() {
                out.push_str(&format!("{:03o}", byte));
            }
            out
        }
    }
}

/// The backslash escape used for control and high characters inside strings
/// and symbols. Characters beyond ascii escape every byte of their utf-8
/// encoding separately, keeping each octal group at three digits.
pub fn special(c: char) -> String {
    match c {
        '\u{8}' => String::from("\\b"),
        '\t' => String::from("\\t"),
        '\r' => String::from("\\r"),
        '\n' => String::from("\\n"),
        c => {
            let mut out = String::new();
            for byte in encode(c).iter() {
                out.push_str(&format!("\\{:03o}", byte));
            }
            out
        }
    }
}

fn encode(c: char) -> Vec<u8> {
    let mut buf = [0u8; 4];
    c.encode_utf8(&mut buf).as_bytes().to_vec()
}

/// The write mode encoding of a symbol's name.
pub fn escape_symbol(name: &str) -> String {
    let mut out = String::new();

    for c in name.chars() {
        if SYMBOL_ESCAPES.contains(&c) {
            out.push('\\');
            out.push(c);
        } else if is_printable(c) {
            out.push(c);
        } else {
            out.push_str(&special(c));
        }
    }

    out
}

/// The write mode encoding of a string's content, double quotes included.
pub fn escape_string(content: &str) -> String {
    let mut out = String::from("\"");

    for c in content.chars() {
        if c == '\\' || c == '"' {
            out.push('\\');
        }
        if is_printable(c) {
            out.push(c);
        } else {
            out.push_str(&special(c));
        }
    }

    out.push('"');
    out
}
