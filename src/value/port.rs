use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Minimum number of bytes a memory buffer grows by, so that repeated
/// single-character writes do not reallocate every time.
pub const STRING_GROW_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
    InputOutput,
}

impl Direction {
    pub fn is_output(self) -> bool {
        matches!(self, Direction::Output | Direction::InputOutput)
    }

    pub fn is_input(self) -> bool {
        matches!(self, Direction::Input | Direction::InputOutput)
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Output => "output",
            Direction::Input => "input",
            Direction::InputOutput => "input-output",
        }
    }
}

pub enum Backend {
    /// An OS level stream. `name` is what the port prints as.
    File {
        name: String,
        stream: Box<dyn Write>,
    },
    /// A growable byte buffer; `cursor` is the write position and
    /// `buffer.len()` the physical capacity.
    Memory { buffer: Vec<u8>, cursor: usize },
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::File { name, .. } => f.debug_struct("File").field("name", name).finish(),
            Backend::Memory { buffer, cursor } => f
                .debug_struct("Memory")
                .field("cursor", cursor)
                .field("capacity", &buffer.len())
                .finish(),
        }
    }
}

#[derive(Debug)]
pub struct PortState {
    pub open: bool,
    pub direction: Direction,
    pub backend: Backend,
}

/// An output destination.
///
/// Ports are first class values: the same handle is both written through by
/// the emission layers and printed like any other object, so the state is a
/// shared place.
#[derive(Clone)]
pub struct Port(Rc<RefCell<PortState>>);

impl Port {
    /// Open a fresh in-memory output port.
    pub fn memory() -> Self {
        Self(Rc::new(RefCell::new(PortState {
            open: true,
            direction: Direction::Output,
            backend: Backend::Memory {
                buffer: Vec::new(),
                cursor: 0,
            },
        })))
    }

    /// Wrap an OS stream. `name` is the display name the port prints as.
    pub fn file(name: impl Into<String>, stream: Box<dyn Write>, direction: Direction) -> Self {
        Self(Rc::new(RefCell::new(PortState {
            open: true,
            direction,
            backend: Backend::File {
                name: name.into(),
                stream,
            },
        })))
    }

    pub fn stdout() -> Self {
        Self::file("stdout", Box::new(io::stdout()), Direction::Output)
    }

    /// Observe an external close. This subsystem never finalizes a port, it
    /// only refuses to write through one that has been closed.
    pub fn close(&self) {
        self.0.borrow_mut().open = false;
    }

    pub fn is_open(&self) -> bool {
        self.0.borrow().open
    }

    pub fn direction(&self) -> Direction {
        self.0.borrow().direction
    }

    pub fn is_memory(&self) -> bool {
        matches!(self.0.borrow().backend, Backend::Memory { .. })
    }

    /// The display name of a file backed port.
    pub fn name(&self) -> Option<String> {
        match &self.0.borrow().backend {
            Backend::File { name, .. } => Some(name.clone()),
            Backend::Memory { .. } => None,
        }
    }

    /// See `Reference::identity`.
    pub fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    /// Append a contiguous byte run, growing the memory backend on demand.
    pub fn write_bytes(&self, buf: &[u8]) -> io::Result<()> {
        match &mut self.0.borrow_mut().backend {
            Backend::Memory { buffer, cursor } => {
                let free = buffer.len() - *cursor;
                if free < buf.len() {
                    let mut grow = buf.len() - free;
                    if grow < STRING_GROW_SIZE {
                        grow = STRING_GROW_SIZE;
                    }
                    log::trace!("growing output string by {} to {}", grow, buffer.len() + grow);
                    buffer.resize(buffer.len() + grow, 0);
                }
                buffer[*cursor..*cursor + buf.len()].copy_from_slice(buf);
                *cursor += buf.len();
                Ok(())
            }
            Backend::File { stream, .. } => stream.write_all(buf),
        }
    }

    /// Force buffered bytes to their destination. A no-op for memory ports.
    pub fn flush(&self) -> io::Result<()> {
        match &mut self.0.borrow_mut().backend {
            Backend::Memory { .. } => Ok(()),
            Backend::File { stream, .. } => stream.flush(),
        }
    }

    /// Drop buffered-but-unwritten bytes, best effort. The boxed stream
    /// exposes no purge facility, so for file ports this drops nothing;
    /// that is explicitly not an error.
    pub fn discard(&self) {}

    /// All bytes written so far, leaving the buffer logically empty. `None`
    /// for file backed ports, which keep no buffer to take from.
    pub fn take_output_string(&self) -> Option<String> {
        match &mut self.0.borrow_mut().backend {
            Backend::Memory { buffer, cursor } => {
                let text = String::from_utf8_lossy(&buffer[..*cursor]).into_owned();
                *cursor = 0;
                Some(text)
            }
            Backend::File { .. } => None,
        }
    }
}

impl PartialEq for Port {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.0.borrow();
        f.debug_struct("Port")
            .field("open", &state.open)
            .field("direction", &state.direction)
            .field("backend", &state.backend)
            .finish()
    }
}
