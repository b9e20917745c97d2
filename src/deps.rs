use crate::key::Token;
use std::{any::Any, fmt, rc::Rc};

/// A single dependency value.
///
/// Primitives are compared by value, objects by identity. Floats use
/// SameValue semantics: `0.0` and `-0.0` differ, `NaN` equals itself.
#[derive(Clone)]
pub enum Dep {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Token(Token),
    /// An arbitrary shared object, compared by allocation address.
    Obj(Rc<dyn Any>),
}

impl Dep {
    pub(crate) fn same_value(&self, other: &Dep) -> bool {
        match (self, other) {
            (Dep::Int(a), Dep::Int(b)) => a == b,
            (Dep::Float(a), Dep::Float(b)) => a.to_bits() == b.to_bits(),
            (Dep::Bool(a), Dep::Bool(b)) => a == b,
            (Dep::Str(a), Dep::Str(b)) => a == b,
            (Dep::Token(a), Dep::Token(b)) => a == b,
            // Can't compare trait ptrs directly; cast away the vtable first.
            (Dep::Obj(a), Dep::Obj(b)) => {
                Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Dep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dep::Int(v) => write!(f, "Int({v})"),
            Dep::Float(v) => write!(f, "Float({v})"),
            Dep::Bool(v) => write!(f, "Bool({v})"),
            Dep::Str(v) => write!(f, "Str({v:?})"),
            Dep::Token(v) => write!(f, "Token({v:?})"),
            Dep::Obj(v) => write!(f, "Obj({:p})", Rc::as_ptr(v)),
        }
    }
}

impl From<i64> for Dep {
    fn from(value: i64) -> Self {
        Dep::Int(value)
    }
}

impl From<i32> for Dep {
    fn from(value: i32) -> Self {
        Dep::Int(value as i64)
    }
}

impl From<u32> for Dep {
    fn from(value: u32) -> Self {
        Dep::Int(value as i64)
    }
}

impl From<f64> for Dep {
    fn from(value: f64) -> Self {
        Dep::Float(value)
    }
}

impl From<f32> for Dep {
    fn from(value: f32) -> Self {
        Dep::Float(value as f64)
    }
}

impl From<bool> for Dep {
    fn from(value: bool) -> Self {
        Dep::Bool(value)
    }
}

impl From<&str> for Dep {
    fn from(value: &str) -> Self {
        Dep::Str(value.to_owned())
    }
}

impl From<String> for Dep {
    fn from(value: String) -> Self {
        Dep::Str(value)
    }
}

impl From<Token> for Dep {
    fn from(value: Token) -> Self {
        Dep::Token(value)
    }
}

impl<T: Any> From<Rc<T>> for Dep {
    fn from(value: Rc<T>) -> Self {
        Dep::Obj(value)
    }
}

impl From<Rc<dyn Any>> for Dep {
    fn from(value: Rc<dyn Any>) -> Self {
        Dep::Obj(value)
    }
}

/// An ordered dependency sequence.
#[derive(Clone, Debug, Default)]
pub struct Deps(Vec<Dep>);

impl Deps {
    /// The shared zero-dependency default. Allocates nothing.
    pub const NONE: Deps = Deps(Vec::new());

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a record computed from `self` is still valid for `next`.
    ///
    /// Elements are compared with SameValue semantics over the overlapping
    /// prefix only. If no element of that prefix mismatches, the sequences
    /// count as equal *regardless of any length difference*. A call site that
    /// grows its dependency list therefore keeps its cached value as long as
    /// the old elements still match. Kept for compatibility with the
    /// hook-style check this mirrors; callers are trusted to keep the list
    /// length stable per call site.
    pub(crate) fn matches(&self, next: &Deps) -> bool {
        self.0
            .iter()
            .zip(next.0.iter())
            .all(|(prev, next)| prev.same_value(next))
    }
}

impl From<Vec<Dep>> for Deps {
    fn from(deps: Vec<Dep>) -> Self {
        Deps(deps)
    }
}

impl FromIterator<Dep> for Deps {
    fn from_iter<I: IntoIterator<Item = Dep>>(iter: I) -> Self {
        Deps(iter.into_iter().collect())
    }
}

/// Builds a [`Deps`] from heterogeneous values via `From<_> for Dep`.
#[macro_export]
macro_rules! deps {
    () => { $crate::Deps::NONE };
    ($($dep:expr),+ $(,)?) => {
        $crate::Deps::from(vec![$($crate::Dep::from($dep)),+])
    };
}
