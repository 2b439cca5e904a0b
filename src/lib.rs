extern crate thiserror;

#[macro_use]
extern crate lazy_static;

pub mod gc;
pub mod printer;
pub mod settings;
pub mod value;

#[cfg(test)]
#[macro_use]
extern crate matches;

#[cfg(test)]
extern crate quickcheck;

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
