#[cfg(test)]
pub mod arbitrary;
pub mod number;
pub mod port;
pub mod reference;

use port::Port;
use reference::Reference;
use std::any::Any;
use std::rc::Rc;

#[repr(transparent)]
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single cons cell. Lists are chains of these and may be improper,
/// i.e. end in something other than the empty list.
#[derive(Debug, Clone)]
pub struct Pair {
    pub car: Value,
    pub cdr: Value,
}

/// An environment frame. The printer only ever renders its identity, but the
/// bindings are what the rest of the runtime keeps in here.
#[derive(Debug, Clone)]
pub struct Environment {
    pub bindings: Vec<(Symbol, Value)>,
}

#[derive(Debug)]
pub struct Primitive {
    pub name: String,
}

/// A closure. `name` is the empty list for anonymous procedures.
#[derive(Debug)]
pub struct Compound {
    pub name: Value,
}

/// A first-class continuation. The captured stack lives outside of this
/// subsystem; printing only needs the object's identity.
#[derive(Debug)]
pub struct ControlPoint;

#[derive(Debug)]
pub struct Promise;

/// Describes files that will be loaded on first reference. `files` is a
/// list value.
#[derive(Debug)]
pub struct Autoload {
    pub files: Value,
}

/// A macro transformer. `name` is the empty list when anonymous.
#[derive(Debug)]
pub struct Macro {
    pub name: Value,
}

/// Identifies a runtime-extensible object category. The hosting runtime
/// hands these out when it defines new object kinds and registers a print
/// callback for each of them.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct ExtensionId(pub u32);

/// An object of an extension-defined category. The payload is opaque to the
/// printer; the registered callback for `id` knows what is inside.
#[derive(Clone)]
pub struct Extension {
    pub id: ExtensionId,
    pub data: Rc<dyn Any>,
}

impl std::fmt::Debug for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extension").field("id", &self.id).finish()
    }
}

// Scheme values as the printer sees them. Every category the runtime can
// produce shows up here; categories it grows later come in through the
// Extension variant.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Fixnum(i64),
    Bignum(Rc<rug::Integer>),
    Flonum(f64),
    Bool(bool),
    Unbound,
    Special,
    Char(char),
    Symbol(Symbol),
    Pair(Reference<Pair>),
    Environment(Reference<Environment>),
    String(Reference<String>),
    Vector(Reference<Vec<Value>>),
    Primitive(Rc<Primitive>),
    Compound(Rc<Compound>),
    ControlPoint(Rc<ControlPoint>),
    Promise(Rc<Promise>),
    Port(Port),
    EndOfFile,
    Autoload(Rc<Autoload>),
    Macro(Rc<Macro>),
    BrokenHeart,
    Extension(Extension),
}

impl Value {
    pub fn boolean(v: bool) -> Value {
        Self::Bool(v)
    }

    pub fn fixnum(v: i64) -> Value {
        Self::Fixnum(v)
    }

    pub fn bignum(v: rug::Integer) -> Value {
        Self::Bignum(Rc::new(v))
    }

    pub fn flonum(v: f64) -> Value {
        Self::Flonum(v)
    }

    pub fn character(c: char) -> Value {
        Self::Char(c)
    }

    pub fn symbol(name: impl Into<String>) -> Value {
        Self::Symbol(Symbol(name.into()))
    }

    pub fn string(s: impl Into<String>) -> Value {
        Self::String(Reference::new(s.into()))
    }

    pub fn cons(car: Value, cdr: Value) -> Value {
        Self::Pair(Reference::new(Pair { car, cdr }))
    }

    pub fn proper_list(elements: Vec<Value>) -> Value {
        let mut ls = Value::Null;
        for e in elements.into_iter().rev() {
            ls = Value::cons(e, ls);
        }
        ls
    }

    pub fn improper_list(elements: Vec<Value>, tail: Value) -> Value {
        let mut ls = tail;
        for e in elements.into_iter().rev() {
            ls = Value::cons(e, ls);
        }
        ls
    }

    pub fn vector(elements: Vec<Value>) -> Value {
        Self::Vector(Reference::new(elements))
    }

    pub fn environment() -> Value {
        Self::Environment(Reference::new(Environment {
            bindings: Vec::new(),
        }))
    }

    pub fn primitive(name: impl Into<String>) -> Value {
        Self::Primitive(Rc::new(Primitive { name: name.into() }))
    }

    /// An anonymous compound procedure; use `named_compound` for one that
    /// carries its definition name.
    pub fn compound() -> Value {
        Self::Compound(Rc::new(Compound { name: Value::Null }))
    }

    pub fn named_compound(name: Value) -> Value {
        Self::Compound(Rc::new(Compound { name }))
    }

    pub fn control_point() -> Value {
        Self::ControlPoint(Rc::new(ControlPoint))
    }

    pub fn promise() -> Value {
        Self::Promise(Rc::new(Promise))
    }

    pub fn autoload(files: Value) -> Value {
        Self::Autoload(Rc::new(Autoload { files }))
    }

    pub fn macro_transformer() -> Value {
        Self::Macro(Rc::new(Macro { name: Value::Null }))
    }

    pub fn named_macro(name: Value) -> Value {
        Self::Macro(Rc::new(Macro { name }))
    }

    pub fn extension(id: ExtensionId, data: Rc<dyn Any>) -> Value {
        Self::Extension(Extension { id, data })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_))
    }
}
