use proc_macro::TokenStream;

mod memo;

/// `memo!(scope, key, |a, b| expr)`
///
/// Expands to a `memo_with_deps` call on `scope` whose dependency sequence
/// is built from the named captures `a, b`, which are cloned into the
/// producer closure.
#[proc_macro]
pub fn memo(input: TokenStream) -> TokenStream {
    memo::memo(input)
}
