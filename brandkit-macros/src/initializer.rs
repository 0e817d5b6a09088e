use darling::FromAttributes;
use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Result};

/// Attribute arguments for `#[initializer(...)]`
#[derive(FromAttributes, Debug)]
#[darling(attributes(initializer))]
struct InitializerOpts {
    /// Table name override, defaults to the snake-cased enum name
    name: Option<String>,
    /// Migration order, lower runs first
    order: Option<syn::Path>,
    /// `fn(DatabaseBackend) -> TableCreateStatement`
    create_table: syn::Path,
    /// `fn(DatabaseBackend) -> Option<Vec<IndexCreateStatement>>`
    create_indexes: Option<syn::Path>,
    /// Seed row type implementing `SeedableTrait`
    seed: Option<syn::Path>,
    /// `async fn() -> Result<Option<Vec<Seed>>, DbErr>`
    seed_data: Option<syn::Path>,
}

pub(crate) fn expand_derive_initializer(input: DeriveInput) -> Result<TokenStream> {
    let enum_data = match &input.data {
        Data::Enum(enum_data) => enum_data,
        _ => {
            return Err(Error::new_spanned(
                &input,
                "Initializer can only be derived for table identifier enums",
            ))
        }
    };

    if !enum_data.variants.iter().any(|v| v.ident == "Table") {
        return Err(Error::new_spanned(
            &input,
            "Initializer requires a `Table` variant",
        ));
    }

    let opts = InitializerOpts::from_attributes(&input.attrs)
        .map_err(|e| Error::new_spanned(&input, e.to_string()))?;

    if opts.seed_data.is_some() && opts.seed.is_none() {
        return Err(Error::new_spanned(
            &input,
            "`seed_data` needs a `seed = <Model>` type",
        ));
    }

    let ident = &input.ident;
    let name = opts
        .name
        .clone()
        .unwrap_or_else(|| ident.to_string().to_snake_case());
    let order = opts
        .order
        .as_ref()
        .map(|p| quote!(#p))
        .unwrap_or_else(|| quote!(0));
    let has_update_col = enum_data.variants.iter().any(|v| v.ident == "UpdatedAt");
    let create_table_fn = &opts.create_table;
    let create_indexes_impl = match &opts.create_indexes {
        Some(create_fn) => quote!(#create_fn(backend)),
        None => quote! {
            let _ = backend;
            None
        },
    };

    let (seeder_impl, seeding_body) = match &opts.seed {
        Some(model) => {
            let get_seed_data = match &opts.seed_data {
                Some(get_fn) => quote!(#get_fn().await),
                None => quote!(Ok(None)),
            };
            (
                quote! {
                    #[async_trait::async_trait]
                    impl crate::initializer::DataSeederTrait<#model> for #ident {
                        async fn get_seed_data(&self) -> Result<Option<Vec<#model>>, sea_orm::DbErr> {
                            #get_seed_data
                        }
                    }

                    impl crate::initializer::SeedableInitializerTrait<#model> for #ident {}
                },
                quote! {
                    <Self as crate::initializer::SeedableInitializerTrait<#model>>::seed_data(self, transaction).await
                },
            )
        }
        None => (quote!(), quote!(Ok(()))),
    };

    Ok(quote! {
        #seeder_impl

        #[async_trait::async_trait]
        impl crate::initializer::BKInitializer for #ident {
            fn order(&self) -> i32 {
                #order
            }

            fn name(&self) -> &str {
                #name
            }

            fn has_update_col(&self) -> bool {
                #has_update_col
            }

            fn to_create_table_stmt(
                &self,
                backend: sea_orm::DatabaseBackend,
            ) -> sea_orm::sea_query::TableCreateStatement {
                #create_table_fn(backend)
            }

            fn to_drop_table_stmt(
                &self,
                _: sea_orm::DatabaseBackend,
            ) -> sea_orm::sea_query::TableDropStatement {
                sea_orm::sea_query::Table::drop()
                    .table(Self::Table)
                    .if_exists()
                    .to_owned()
            }

            fn to_create_indexes_stmt(
                &self,
                backend: sea_orm::DatabaseBackend,
            ) -> Option<Vec<sea_orm::sea_query::IndexCreateStatement>> {
                #create_indexes_impl
            }

            async fn seeding_data(
                &self,
                transaction: &sea_orm::DatabaseTransaction,
            ) -> Result<(), sea_orm::DbErr> {
                #seeding_body
            }
        }
    })
}
