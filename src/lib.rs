mod deps;
mod key;
mod memoizer;
mod record;
mod scope;

pub use deps::{Dep, Deps};
pub use key::{FloatKey, Key, Token};
pub use memoizer::Memoizer;
pub use scope::Scope;

pub use memoscope_macros::memo;
