//! Batch-wide type cache shared by all files.

use std::sync::Arc;

use lst_ir::TypeId;
use parking_lot::{RwLock, RwLockReadGuard};

use crate::interner::{shape_kind, warn_if_reshaped, TypeInterner};
use crate::signature::SignatureBuilder;
use crate::{InternError, TypeArena, TypeShape, TypeSource};

/// Name of the root class that `? extends` bounds normalize away.
pub const DEFAULT_TOP_TYPE: &str = "java.lang.Object";

/// Interning options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternConfig {
    /// Fully qualified name of the top type. `? extends <top>` is written `?`.
    pub top_type: String,
}

impl Default for InternConfig {
    fn default() -> Self {
        InternConfig {
            top_type: DEFAULT_TOP_TYPE.to_owned(),
        }
    }
}

impl InternConfig {
    #[must_use]
    pub fn with_top_type(mut self, top_type: impl Into<String>) -> Self {
        self.top_type = top_type.into();
        self
    }
}

/// Thread-safe handle to one batch's [`TypeArena`].
///
/// Cloning shares the arena. Lookups of already-interned signatures take a
/// read lock; a miss takes the write lock for the whole top-level resolution,
/// so reserving a class and filling it are never observed half done and the
/// first writer of a signature wins.
#[derive(Clone, Debug)]
pub struct SharedTypeCache {
    arena: Arc<RwLock<TypeArena>>,
    config: Arc<InternConfig>,
}

impl Default for SharedTypeCache {
    fn default() -> Self {
        Self::new(InternConfig::default())
    }
}

impl SharedTypeCache {
    pub fn new(config: InternConfig) -> Self {
        SharedTypeCache {
            arena: Arc::new(RwLock::new(TypeArena::new())),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &InternConfig {
        &self.config
    }

    /// Intern `ty` from `source`.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn resolve<S: TypeSource>(&self, source: &S, ty: &S::Type) -> Result<TypeId, InternError> {
        let shape = source.shape(ty);
        match shape {
            TypeShape::Primitive(kind) => return Ok(TypeId::primitive(kind)),
            TypeShape::Unknown => return Ok(TypeId::UNKNOWN),
            _ => {}
        }

        // Fast path: already interned
        let signature = SignatureBuilder::new(source, &self.config.top_type).signature(ty);
        {
            let arena = self.arena.read();
            if let Some(id) = arena.expect_kind(&signature, shape_kind(&shape))? {
                if let TypeShape::Class(class) = &shape {
                    warn_if_reshaped(&arena, id, class);
                }
                return Ok(id);
            }
        }

        // Slow path: resolve under the write lock
        let mut arena = self.arena.write();
        let id = TypeInterner::new(source, &mut arena, &self.config.top_type).resolve(ty)?;
        tracing::trace!(%signature, ?id, "interned");
        Ok(id)
    }

    /// Read access to the arena, e.g. to format or compare types.
    pub fn read(&self) -> RwLockReadGuard<'_, TypeArena> {
        self.arena.read()
    }

    pub fn signature(&self, id: TypeId) -> String {
        self.arena.read().signature(id).to_owned()
    }

    pub fn format_type(&self, id: TypeId) -> String {
        self.arena.read().format_type(id)
    }

    /// Copy of the arena as it is now.
    pub fn snapshot(&self) -> TypeArena {
        self.arena.read().clone()
    }

    pub fn len(&self) -> usize {
        self.arena.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.read().is_empty()
    }
}
