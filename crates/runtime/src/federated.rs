//! Federation of independently owned type sources
//!
//! Registries are additive: each one knows some kinds and nothing about the
//! others. [`FederatedTyper`] consults them in a fixed order so results are
//! reproducible. Lookups stop at the first source that answers; later sources
//! are only asked when earlier ones fail.

use std::fmt;
use std::sync::Arc;

use polycodec_core::{Error, KindVersion, Object, Result, TypeSource};
use tracing::trace;

/// Ordered list of type sources acting as one
#[derive(Clone, Default)]
pub struct FederatedTyper {
    sources: Vec<Arc<dyn TypeSource>>,
}

impl FederatedTyper {
    /// Federate `sources`, highest priority first
    pub fn new(sources: Vec<Arc<dyn TypeSource>>) -> Self {
        FederatedTyper { sources }
    }

    /// Append `source` at the lowest priority
    pub fn push(&mut self, source: Arc<dyn TypeSource>) {
        self.sources.push(source);
    }

    /// Builder form of [`FederatedTyper::push`]
    pub fn with_source(mut self, source: Arc<dyn TypeSource>) -> Self {
        self.push(source);
        self
    }

    /// Number of federated sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True if no source is federated
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Run `lookup` against each source until one succeeds
    ///
    /// Returns the last error if every source fails.
    fn first_success<T>(
        &self,
        obj: &dyn Object,
        lookup: impl Fn(&dyn TypeSource) -> Result<T>,
    ) -> Result<T> {
        let mut last_err = None;
        for (index, source) in self.sources.iter().enumerate() {
            match lookup(&**source) {
                Ok(found) => return Ok(found),
                Err(e) => {
                    trace!(
                        target: "polycodec::typer",
                        source = index,
                        error = %e,
                        "Type source could not identify object"
                    );
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| Error::type_not_registered(obj.type_name())))
    }
}

impl TypeSource for FederatedTyper {
    fn kind_of(&self, obj: &dyn Object) -> Result<KindVersion> {
        self.first_success(obj, |source| source.kind_of(obj))
    }

    fn kinds_of(&self, obj: &dyn Object) -> Result<Vec<KindVersion>> {
        self.first_success(obj, |source| source.kinds_of(obj))
    }

    fn recognizes(&self, kind: &KindVersion) -> bool {
        self.sources.iter().any(|source| source.recognizes(kind))
    }

    fn is_unversioned(&self, obj: &dyn Object) -> Option<bool> {
        self.sources
            .iter()
            .find_map(|source| source.is_unversioned(obj))
    }
}

impl fmt::Debug for FederatedTyper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FederatedTyper")
            .field("sources", &self.sources.len())
            .finish()
    }
}
