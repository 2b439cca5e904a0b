use crate::value::Value;
use rustc_hash::FxHashMap;

pub const PRINT_DEPTH: &str = "print-depth";
pub const PRINT_LENGTH: &str = "print-length";

pub const DEFAULT_PRINT_DEPTH: i64 = 20;
pub const DEFAULT_PRINT_LENGTH: i64 = 1000;

/// Process wide configuration variables.
///
/// The hosting environment may rebind these to any value, which is why they
/// are stored as full runtime values. Lookups that expect an integer fall
/// back to the built-in defaults when a variable holds something else.
#[derive(Debug)]
pub struct Settings {
    vars: FxHashMap<String, Value>,
}

impl Settings {
    pub fn new() -> Self {
        Self {
            vars: FxHashMap::default(),
        }
    }

    pub fn define(&mut self, name: impl Into<String>, v: Value) {
        self.vars.insert(name.into(), v);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.vars.get(name) {
            Some(Value::Fixnum(n)) => Some(*n),
            _ => None,
        }
    }

    /// Maximum nesting depth the serializer descends into, `< 0` meaning
    /// unbounded.
    pub fn print_depth(&self) -> i64 {
        self.get_int(PRINT_DEPTH).unwrap_or(DEFAULT_PRINT_DEPTH)
    }

    /// Maximum number of elements printed per sequence level, `< 0` meaning
    /// unbounded.
    pub fn print_length(&self) -> i64 {
        self.get_int(PRINT_LENGTH).unwrap_or(DEFAULT_PRINT_LENGTH)
    }
}

impl Default for Settings {
    fn default() -> Settings {
        let mut settings = Settings::new();

        settings.define(PRINT_DEPTH, Value::Fixnum(DEFAULT_PRINT_DEPTH));
        settings.define(PRINT_LENGTH, Value::Fixnum(DEFAULT_PRINT_LENGTH));

        settings
    }
}
