//! Named field access for conversion routines
//!
//! Conversion routines copy fields between versions of a kind without
//! hard-coding every struct. [`FieldAccessor`] exposes a struct's fields by
//! name as `Any`; [`field_ptr`] and [`field_ref`] add the type check.
//! Implementations are generated with [`impl_field_accessor!`].
//!
//! [`impl_field_accessor!`]: crate::impl_field_accessor

use std::any::Any;

use crate::error::{Error, Result};

/// Access to a value's fields by name
pub trait FieldAccessor {
    /// Names of all accessible fields, in declaration order
    fn field_names(&self) -> &'static [&'static str];

    /// Borrow the field called `name`
    fn field(&self, name: &str) -> Option<&dyn Any>;

    /// Mutably borrow the field called `name`
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Any>;
}

/// Mutable reference to field `name` of `value`, typed as `T`
///
/// # Errors
///
/// Returns [`Error::FieldAccess`] if the field does not exist or is not a `T`.
pub fn field_ptr<'a, T, V>(value: &'a mut V, name: &str) -> Result<&'a mut T>
where
    T: Any,
    V: FieldAccessor + ?Sized,
{
    let field = value
        .field_mut(name)
        .ok_or_else(|| Error::field_access(format!("couldn't find {} field", name)))?;
    field.downcast_mut::<T>().ok_or_else(|| {
        Error::field_access(format!(
            "couldn't assign/convert field {} to {}",
            name,
            std::any::type_name::<T>()
        ))
    })
}

/// Shared reference to field `name` of `value`, typed as `T`
///
/// # Errors
///
/// Returns [`Error::FieldAccess`] if the field does not exist or is not a `T`.
pub fn field_ref<'a, T, V>(value: &'a V, name: &str) -> Result<&'a T>
where
    T: Any,
    V: FieldAccessor + ?Sized,
{
    let field = value
        .field(name)
        .ok_or_else(|| Error::field_access(format!("couldn't find {} field", name)))?;
    field.downcast_ref::<T>().ok_or_else(|| {
        Error::field_access(format!(
            "couldn't assign/convert field {} to {}",
            name,
            std::any::type_name::<T>()
        ))
    })
}

/// Reset `value` to its zero value
pub fn set_zero_value<T: Default>(value: &mut T) {
    *value = T::default();
}

/// Implement [`FieldAccessor`] for a struct by listing its fields
///
/// ```
/// use polycodec_core::field::{field_ptr, FieldAccessor};
/// use polycodec_core::impl_field_accessor;
///
/// struct Pod {
///     name: String,
///     replicas: i32,
/// }
/// impl_field_accessor!(Pod { name, replicas });
///
/// let mut pod = Pod { name: "web".into(), replicas: 1 };
/// *field_ptr::<i32, _>(&mut pod, "replicas").unwrap() = 3;
/// assert_eq!(pod.replicas, 3);
/// assert_eq!(pod.field_names(), &["name", "replicas"]);
/// ```
#[macro_export]
macro_rules! impl_field_accessor {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::field::FieldAccessor for $ty {
            fn field_names(&self) -> &'static [&'static str] {
                &[$(stringify!($field)),*]
            }

            fn field(&self, name: &str) -> Option<&dyn ::std::any::Any> {
                match name {
                    $(stringify!($field) => Some(&self.$field as &dyn ::std::any::Any),)*
                    _ => None,
                }
            }

            fn field_mut(&mut self, name: &str) -> Option<&mut dyn ::std::any::Any> {
                match name {
                    $(stringify!($field) => Some(&mut self.$field as &mut dyn ::std::any::Any),)*
                    _ => None,
                }
            }
        }
    };
}
