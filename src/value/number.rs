use rug::Integer;

/// Canonical decimal digit strings for the numeric categories.
///
/// The printer treats these as opaque services: whatever comes back is
/// emitted verbatim. Flonum rendering is the shortest representation that
/// round-trips through the reader, with the scheme spellings for the
/// non-finite values.

pub fn fixnum_to_text(v: i64) -> String {
    format!("{}", v)
}

pub fn integer_to_text(v: &Integer) -> String {
    v.to_string_radix(10)
}

pub fn float_to_text(v: f64) -> String {
    if v.is_nan() {
        String::from("+nan.0")
    } else if v == f64::INFINITY {
        String::from("+inf.0")
    } else if v == f64::NEG_INFINITY {
        String::from("-inf.0")
    } else {
        format!("{}", v)
    }
}
