//! Utility functions for procedural macros

use syn::Type;

/// Check if a type is an Option<T>
///
/// Accepts both the bare `Option<T>` form and fully qualified paths such as
/// `std::option::Option<T>`.
pub fn is_option_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| {
                segment.ident == "Option"
                    && matches!(segment.arguments, syn::PathArguments::AngleBracketed(_))
            }),
        Type::Group(group) => is_option_type(&group.elem),
        Type::Paren(paren) => is_option_type(&paren.elem),
        _ => false,
    }
}
