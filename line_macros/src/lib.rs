#![allow(clippy::large_enum_variant)]

extern crate proc_macro;

use proc_macro::TokenStream;

mod define_object_id;

#[proc_macro]
pub fn object_ids(input: TokenStream) -> TokenStream {
    define_object_id::object_ids(input)
}

mod define_validated;

#[proc_macro]
pub fn define_validated(input: TokenStream) -> TokenStream {
    define_validated::define_validated(input)
}
