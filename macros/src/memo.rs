use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse2,
    punctuated::Punctuated,
    Expr, Ident, Result, Token,
};

struct Memo {
    scope: Expr,
    key: Expr,
    args: Vec<Ident>,
    body: Expr,
}

impl Parse for Memo {
    fn parse(input: ParseStream) -> Result<Self> {
        let scope = input.parse()?;
        input.parse::<Token![,]>()?;
        let key = input.parse()?;
        input.parse::<Token![,]>()?;
        input.parse::<Token! {|}>()?;
        let args = Punctuated::<Ident, Token![,]>::parse_separated_nonempty(input)?;
        input.parse::<Token! {|}>()?;
        let body = input.parse()?;
        Ok(Memo {
            scope,
            key,
            args: args.into_iter().collect(),
            body,
        })
    }
}

pub fn memo(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let output = expand(input.into());
    proc_macro::TokenStream::from(output)
}

fn expand(input: TokenStream) -> TokenStream {
    let memo: Memo = parse2(input).unwrap();
    let identifiers: Vec<_> = memo.args.iter().collect();
    let scope = &memo.scope;
    let key = &memo.key;
    let body = &memo.body;

    quote! {
        {
            #(let #identifiers = #identifiers.clone();)*
            #scope.memo_with_deps(
                #key,
                ::std::iter::FromIterator::from_iter([
                    #(::std::convert::Into::into(#identifiers.clone())),*
                ]),
                move || #body,
            )
        }
    }
}
