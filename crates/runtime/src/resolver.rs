//! Kind resolution over a single type source
//!
//! A [`TypeSource`] answers "what kind is this" and "is it unversioned" as
//! two separate questions. [`KindResolver`] asks both and refuses to return a
//! kind without its unversioned status.

use polycodec_core::{Error, Object, ResolvedKind, Result, TypeSource, Typer};
use tracing::warn;

/// Consolidated kind + unversioned lookup over one [`TypeSource`]
#[derive(Debug, Clone)]
pub struct KindResolver<S> {
    source: S,
}

impl<S: TypeSource> KindResolver<S> {
    /// Wrap `source`
    pub fn new(source: S) -> Self {
        KindResolver { source }
    }

    /// The wrapped source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Kind/version and unversioned status of `obj`
    ///
    /// # Errors
    ///
    /// Propagates the source's kind lookup failure. Returns
    /// [`Error::TyperContractViolation`] if the source found a kind but cannot
    /// tell whether the object is unversioned.
    pub fn resolve(&self, obj: &dyn Object) -> Result<ResolvedKind> {
        let kind = self.source.kind_of(obj)?;
        let Some(unversioned) = self.source.is_unversioned(obj) else {
            warn!(
                target: "polycodec::typer",
                type_name = obj.type_name(),
                kind = %kind,
                "Type source reported a kind but no unversioned status"
            );
            return Err(Error::typer_contract_violation(obj.type_name()));
        };
        Ok(ResolvedKind { kind, unversioned })
    }
}

impl<S: TypeSource> Typer for KindResolver<S> {
    fn object_kind(&self, obj: &dyn Object) -> Result<ResolvedKind> {
        self.resolve(obj)
    }
}
