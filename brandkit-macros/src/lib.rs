mod initializer;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `BKInitializer` implementation for a table identifier enum.
///
/// The enum must carry a `Table` variant. When `seed = <Model>` is given the
/// table is seeded inside the migration transaction with whatever the
/// `seed_data` function returns.
///
/// ```ignore
/// #[derive(DeriveIden, Initializer)]
/// #[initializer(order = INIT_ORDER, create_table = create_table, seed = NewRow, seed_data = rows)]
/// pub enum MyTable { Table, Id, UpdatedAt }
/// ```
#[proc_macro_derive(Initializer, attributes(initializer))]
pub fn derive_initializer(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match initializer::expand_derive_initializer(input) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
