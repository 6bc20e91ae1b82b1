//! Fixed-field records
//!
//! A record is a native structure whose fields can be enumerated, read and
//! overwritten, but never added or removed. Native structs opt in with
//! [`impl_record!`](crate::impl_record); [`FieldRecord`] covers records
//! whose field set is only known at runtime.

use std::any::Any;
use std::fmt;

use super::errors::{FieldError, FieldResult};
use super::types::Value;

/// Introspection over a fixed set of named fields.
pub trait Record: Any + fmt::Debug + Send + Sync {
    /// Name of the concrete record type, for diagnostics.
    fn type_name(&self) -> &str;

    /// Field names in declaration order.
    fn field_names(&self) -> Vec<String>;

    /// Reads a field. `None` if the record has no such field.
    fn get_field(&self, name: &str) -> Option<Value>;

    /// Overwrites an existing field.
    ///
    /// # Errors
    ///
    /// `UnknownField` if the field does not exist, `Incompatible` if the
    /// value cannot be stored without coercion.
    fn set_field(&mut self, name: &str, value: Value) -> FieldResult<()>;

    /// Returns true if the record declares this field.
    fn has_field(&self, name: &str) -> bool {
        self.field_names().iter().any(|field| field == name)
    }

    /// A default-initialized instance of the same record type.
    fn new_instance(&self) -> Box<dyn Record>;

    fn clone_record(&self) -> Box<dyn Record>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl Clone for Box<dyn Record> {
    fn clone(&self) -> Self {
        self.clone_record()
    }
}

impl dyn Record {
    /// Returns true if the record is a `T`.
    pub fn is<T: Record>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Record>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// A record whose field set is fixed when it is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRecord {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl FieldRecord {
    /// Creates a record with the given fields, in order.
    pub fn new<K, I>(type_name: impl Into<String>, fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut record = Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        };
        for (name, value) in fields {
            let name = name.into();
            match record.fields.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => record.fields.push((name, value)),
            }
        }
        record
    }

    /// Creates a record whose fields are all null.
    pub fn with_fields(type_name: impl Into<String>, names: &[&str]) -> Self {
        Self::new(type_name, names.iter().map(|name| (*name, Value::Null)))
    }
}

impl Record for FieldRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|(name, _)| name.clone()).collect()
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.clone())
    }

    fn set_field(&mut self, name: &str, value: Value) -> FieldResult<()> {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => {
                slot.1 = value;
                Ok(())
            }
            None => Err(FieldError::unknown_field(&self.type_name, name)),
        }
    }

    fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    fn new_instance(&self) -> Box<dyn Record> {
        Box::new(Self {
            type_name: self.type_name.clone(),
            fields: self
                .fields
                .iter()
                .map(|(name, _)| (name.clone(), Value::Null))
                .collect(),
        })
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Implements [`Record`], [`ToValue`](crate::value::ToValue) and
/// [`FromValue`](crate::value::FromValue) for a struct.
///
/// The struct must implement `Clone + Default`, and every listed field must
/// implement `ToValue + FromValue`.
///
/// ```ignore
/// #[derive(Debug, Clone, Default)]
/// struct Address { city: String, zip: Option<String> }
/// anyshape::impl_record!(Address { city, zip });
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::value::Record for $ty {
            fn type_name(&self) -> &str {
                stringify!($ty)
            }

            fn field_names(&self) -> ::std::vec::Vec<::std::string::String> {
                ::std::vec![$(::std::string::String::from(stringify!($field))),*]
            }

            fn get_field(&self, name: &str) -> ::std::option::Option<$crate::value::Value> {
                match name {
                    $(stringify!($field) => ::std::option::Option::Some(
                        $crate::value::ToValue::to_value(&self.$field),
                    ),)*
                    _ => ::std::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn set_field(
                &mut self,
                name: &str,
                value: $crate::value::Value,
            ) -> $crate::value::FieldResult<()> {
                match name {
                    $(stringify!($field) => {
                        self.$field = $crate::value::FromValue::from_value(value)?;
                        ::std::result::Result::Ok(())
                    })*
                    _ => ::std::result::Result::Err(
                        $crate::value::FieldError::unknown_field(stringify!($ty), name),
                    ),
                }
            }

            fn new_instance(&self) -> ::std::boxed::Box<dyn $crate::value::Record> {
                ::std::boxed::Box::new(<$ty as ::std::default::Default>::default())
            }

            fn clone_record(&self) -> ::std::boxed::Box<dyn $crate::value::Record> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }

        impl $crate::value::ToValue for $ty {
            fn to_value(&self) -> $crate::value::Value {
                $crate::value::Value::Record(::std::boxed::Box::new(
                    ::std::clone::Clone::clone(self),
                ))
            }
        }

        impl $crate::value::FromValue for $ty {
            fn from_value(value: $crate::value::Value) -> $crate::value::FieldResult<Self> {
                $crate::mapper::record_from_value::<$ty>(value)
            }
        }
    };
}
