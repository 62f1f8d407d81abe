//! Open field maps and the traits shared by all records

use serde_json::Value;

/// Source fields of an open record, in source order
pub type FieldMap = serde_json::Map<String, Value>;

/// A record that carries its original source fields
pub trait Record: Sized {
    /// Rebuild the record, deriving its typed keys from the fields
    fn from_fields(fields: FieldMap) -> Self;

    /// The original fields
    fn fields(&self) -> &FieldMap;

    /// One original field
    fn field(&self, name: &str) -> Option<&Value> {
        self.fields().get(name)
    }
}

/// The fixed set of fields an enrichment adds to a record
///
/// Implemented through `#[derive(FieldSet)]`.
pub trait FieldSet {
    /// Serialized names of every added field
    const FIELD_NAMES: &'static [&'static str];
    /// Literal identifying the source of the added fields, if any
    const PROVENANCE: Option<&'static str>;

    /// Names of the added fields that are currently null
    fn null_fields(&self) -> Vec<&'static str>;
}

/// Implement `Serialize` and `From<FieldMap>` for open records
///
/// Open records serialize as exactly their original fields, so derived keys
/// never leak into the output.
macro_rules! open_record {
    ($($ty:ty),+ $(,)?) => {$(
        impl ::serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                ::serde::Serialize::serialize(
                    $crate::models::Record::fields(self),
                    serializer,
                )
            }
        }

        impl ::std::convert::From<$crate::models::FieldMap> for $ty {
            fn from(fields: $crate::models::FieldMap) -> Self {
                <$ty as $crate::models::Record>::from_fields(fields)
            }
        }
    )+};
}

pub(crate) use open_record;
