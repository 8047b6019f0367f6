//! Parameters for shell-mesh generation.

use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{FurError, FurResult};

/// Fewest shells a shell mesh may have.
pub const MIN_SHELLS: u32 = 2;

/// Most shells a shell mesh may have.
pub const MAX_SHELLS: u32 = 256;

/// Smallest allowed total shell height.
pub const MIN_HEIGHT: f32 = 0.0;

/// Largest allowed total shell height.
pub const MAX_HEIGHT: f32 = 10.0;

/// How the assembler picks the index width of the output mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IndexWidthPolicy {
    /// 16-bit indices when every index fits, 32-bit otherwise.
    #[default]
    Auto,

    /// Always emit 32-bit indices.
    Always32,
}

impl std::fmt::Display for IndexWidthPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Always32 => write!(f, "u32"),
        }
    }
}

/// Parameters for shell-mesh generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShellParams {
    /// Number of shells, including the base shell on the source surface.
    /// Valid range `[2, 256]`.
    pub num_shells: u32,
    /// Distance from the source surface to the outermost shell.
    /// Valid range `[0, 10]`.
    pub total_height: f32,
    /// Index width selection for the assembled mesh.
    pub index_width: IndexWidthPolicy,
    /// Clamp out-of-range values instead of rejecting them.
    pub clamp_parameters: bool,
    /// Vertices or triangles per dispatched work tile. `0` behaves as `1`.
    pub tile_size: usize,
}

impl Default for ShellParams {
    fn default() -> Self {
        Self {
            num_shells: MIN_SHELLS,
            total_height: 0.1,
            index_width: IndexWidthPolicy::Auto,
            clamp_parameters: false,
            tile_size: 4096,
        }
    }
}

impl ShellParams {
    /// Create params with the given shell count and total height.
    #[must_use]
    pub fn new(num_shells: u32, total_height: f32) -> Self {
        Self {
            num_shells,
            total_height,
            ..Self::default()
        }
    }

    /// Many thin shells, for long soft fur.
    #[must_use]
    pub fn dense() -> Self {
        Self {
            num_shells: 64,
            total_height: 0.2,
            ..Self::default()
        }
    }

    /// Few shells, for short fuzz or previews.
    #[must_use]
    pub fn sparse() -> Self {
        Self {
            num_shells: 8,
            total_height: 0.05,
            ..Self::default()
        }
    }

    /// Set the shell count.
    #[must_use]
    pub const fn with_num_shells(mut self, num_shells: u32) -> Self {
        self.num_shells = num_shells;
        self
    }

    /// Set the total height.
    #[must_use]
    pub const fn with_total_height(mut self, total_height: f32) -> Self {
        self.total_height = total_height;
        self
    }

    /// Set the index width policy.
    #[must_use]
    pub const fn with_index_width(mut self, policy: IndexWidthPolicy) -> Self {
        self.index_width = policy;
        self
    }

    /// Enable or disable clamping of out-of-range values.
    #[must_use]
    pub const fn with_clamping(mut self, clamp: bool) -> Self {
        self.clamp_parameters = clamp;
        self
    }

    /// Set the dispatch tile size.
    #[must_use]
    pub const fn with_tile_size(mut self, tile_size: usize) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Tile size with the zero case folded to one.
    #[must_use]
    pub const fn effective_tile_size(&self) -> usize {
        if self.tile_size == 0 {
            1
        } else {
            self.tile_size
        }
    }

    /// Distance along the normal of shell `shell`.
    ///
    /// Shell 0 sits on the source surface and the last shell sits at exactly
    /// `total_height`. With a single shell the offset is always zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn shell_offset(&self, shell: u32) -> f32 {
        if self.num_shells > 1 {
            (shell as f32 / (self.num_shells - 1) as f32) * self.total_height
        } else {
            0.0
        }
    }

    /// Check that shell count and height are in range.
    ///
    /// # Errors
    ///
    /// Returns [`FurError::InvalidParameter`] naming the first bad value.
    pub fn validate(&self) -> FurResult<()> {
        if !(MIN_SHELLS..=MAX_SHELLS).contains(&self.num_shells) {
            return Err(FurError::invalid_parameter(format!(
                "num_shells = {} outside [{MIN_SHELLS}, {MAX_SHELLS}]",
                self.num_shells
            )));
        }
        if !self.total_height.is_finite()
            || !(MIN_HEIGHT..=MAX_HEIGHT).contains(&self.total_height)
        {
            return Err(FurError::invalid_parameter(format!(
                "total_height = {} outside [{MIN_HEIGHT}, {MAX_HEIGHT}]",
                self.total_height
            )));
        }
        Ok(())
    }

    /// Copy with shell count and height forced into range.
    ///
    /// A non-finite height becomes `MIN_HEIGHT`.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let total_height = if self.total_height.is_finite() {
            self.total_height.clamp(MIN_HEIGHT, MAX_HEIGHT)
        } else {
            MIN_HEIGHT
        };
        Self {
            num_shells: self.num_shells.clamp(MIN_SHELLS, MAX_SHELLS),
            total_height,
            ..self.clone()
        }
    }

    /// Params ready for expansion: validated, or clamped when
    /// `clamp_parameters` is set.
    ///
    /// # Errors
    ///
    /// Returns [`FurError::InvalidParameter`] for out-of-range values when
    /// clamping is disabled.
    pub fn resolve(&self) -> FurResult<Self> {
        match self.validate() {
            Ok(()) => Ok(self.clone()),
            Err(e) if self.clamp_parameters => {
                let clamped = self.clamped();
                warn!(
                    "{}; clamping to num_shells={}, total_height={}",
                    e, clamped.num_shells, clamped.total_height
                );
                Ok(clamped)
            }
            Err(e) => Err(e),
        }
    }
}
