//! Opaque object handles
//!
//! An [`Object`] is any structured value whose kind and version are only known
//! at runtime. Callers hold objects as `Box<dyn Object>` and ask a type source
//! what they are; concrete types are recovered by downcasting.
//!
//! Every `Any + Debug + Clone + Send + Sync` type is an object, so domain
//! types need no registration here.

use crate::envelope::Envelope;
use std::any::Any;
use std::fmt;

/// An opaque handle to a structured domain value
pub trait Object: Any + fmt::Debug + Send + Sync {
    /// Borrow as `Any` for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrow as `Any` for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Convert into `Any` for owned downcasting
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;

    /// Name of the concrete Rust type, used in error messages
    fn type_name(&self) -> &'static str;

    /// Independent copy of this object
    fn clone_object(&self) -> Box<dyn Object>;
}

impl<T> Object for T
where
    T: Any + fmt::Debug + Clone + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn clone_object(&self) -> Box<dyn Object> {
        Box::new(self.clone())
    }
}

impl dyn Object {
    /// True if the concrete type is `T`
    pub fn is<T: Object>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcast to `&T`
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcast to `&mut T`
    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Downcast an owned object, handing it back unchanged on mismatch
    pub fn downcast<T: Object>(self: Box<Self>) -> Result<Box<T>, Box<dyn Object>> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.into_any().downcast::<T>() {
            Ok(concrete) => Ok(concrete),
            Err(_) => unreachable!("type checked above"),
        }
    }

    /// True if this object is an undecoded [`Envelope`]
    pub fn is_envelope(&self) -> bool {
        self.is::<Envelope>()
    }

    /// Borrow as an [`Envelope`]
    pub fn as_envelope(&self) -> Option<&Envelope> {
        self.downcast_ref::<Envelope>()
    }

    /// Mutably borrow as an [`Envelope`]
    pub fn as_envelope_mut(&mut self) -> Option<&mut Envelope> {
        self.downcast_mut::<Envelope>()
    }
}
