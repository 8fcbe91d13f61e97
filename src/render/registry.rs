//! Unit registry: maps blocks to render units, including host-registered
//! custom block renderers.

use crate::block::{Block, BlockData, BlockKind};
use crate::theme::Theme;

use super::unit::RenderUnit;
use super::units::create_builtin;

/// Constructor for a custom render unit.
pub type UnitCtor = Box<dyn Fn(&Block, &Theme) -> Box<dyn RenderUnit> + Send>;

/// Creates render units for blocks.
///
/// Built-in kinds resolve statically. Custom blocks resolve by registration
/// index: a parser's custom patterns and a registry's custom constructors
/// are registered in the same order, so the pattern index recorded in
/// [`BlockData::Custom`] selects the constructor. A custom block with no
/// matching registration renders as a plain paragraph.
#[derive(Default)]
pub struct UnitRegistry {
    custom: Vec<UnitCtor>,
}

impl UnitRegistry {
    /// An empty registry with only built-in kinds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom unit constructor. Returns its registration index,
    /// which must line up with the corresponding parser pattern's index.
    pub fn register_custom(&mut self, ctor: UnitCtor) -> usize {
        self.custom.push(ctor);
        self.custom.len() - 1
    }

    /// Number of custom registrations.
    #[must_use]
    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }

    /// Build a unit for `block`.
    pub fn create(&self, block: &Block, theme: &Theme) -> Box<dyn RenderUnit> {
        if block.kind == BlockKind::Custom {
            if let BlockData::Custom {
                pattern: Some(index),
            } = block.data
            {
                if let Some(ctor) = self.custom.get(index) {
                    return ctor(block, theme);
                }
            }
        }
        create_builtin(block, theme)
    }
}

impl std::fmt::Debug for UnitRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitRegistry")
            .field("custom", &self.custom.len())
            .finish()
    }
}
