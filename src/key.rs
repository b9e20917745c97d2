use std::sync::atomic::{AtomicU64, Ordering};

/// A discriminator that namespaces memoized slots within one owner.
///
/// Keys are compared by value. Floats are keyed by their IEEE bit pattern, so
/// `0.0` and `-0.0` are distinct keys and `NaN` is a usable key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Sentinel used by the unkeyed operations when the caller omits a key.
    Unkeyed,
    Str(String),
    Int(i64),
    Float(FloatKey),
    Bool(bool),
    Token(Token),
}

/// An `f64` frozen into its bit pattern so it can be hashed and compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FloatKey(u64);

impl FloatKey {
    pub fn value(&self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// A process-unique atom. Every `Token::new()` is distinct from all others.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token(u64);

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

impl Token {
    pub fn new() -> Token {
        Token(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::new()
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_owned())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<u32> for Key {
    fn from(value: u32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Key::Float(FloatKey(value.to_bits()))
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Key::Bool(value)
    }
}

impl From<Token> for Key {
    fn from(value: Token) -> Self {
        Key::Token(value)
    }
}
