// Sprite-sheet animation catalog and playback cursor

use thiserror::Error;

use super::state::AnimationState;
use crate::core::math::Rect;

/// Where one animation's frames live on the sprite sheet
///
/// Frames are laid out left to right; an animation either fits on a single
/// row or continues onto the following rows at a fixed number of frames per
/// row.
#[derive(Debug, Clone, Copy)]
pub struct AnimationDescriptor {
    /// First sheet row holding frames of this animation
    pub start_row: u32,
    /// Total number of frames
    pub frame_count: u32,
    /// Whether the frames continue onto following rows
    pub multi_row: bool,
    /// Frames per row when `multi_row` is set
    pub frames_per_row: u32,
}

impl AnimationDescriptor {
    /// Descriptor for an animation that fits on one row
    pub const fn single_row(start_row: u32, frame_count: u32) -> Self {
        Self {
            start_row,
            frame_count,
            multi_row: false,
            frames_per_row: 0,
        }
    }

    /// Descriptor for an animation spanning several rows
    pub const fn spanning(start_row: u32, frame_count: u32, frames_per_row: u32) -> Self {
        Self {
            start_row,
            frame_count,
            multi_row: true,
            frames_per_row,
        }
    }

    /// Sheet cell (row, column) of a 0-based frame index
    pub fn cell(&self, frame: u32) -> (u32, u32) {
        if self.multi_row {
            (
                self.start_row + frame / self.frames_per_row,
                frame % self.frames_per_row,
            )
        } else {
            (self.start_row, frame)
        }
    }

    /// Source rectangle in sheet pixels of a 0-based frame index
    ///
    /// The cell size is fixed for the whole sheet, not per animation. A
    /// wrong mapping here renders the wrong sprite region without failing,
    /// so the arithmetic is covered by tests and `AnimationCatalog::validate`
    /// checks the worst-case cell against the sheet grid at startup.
    pub fn frame_region(&self, frame: u32, cell_width: u32, cell_height: u32) -> Rect {
        let (row, col) = self.cell(frame);
        Rect::new(
            (col * cell_width) as f32,
            (row * cell_height) as f32,
            cell_width as f32,
            cell_height as f32,
        )
    }
}

/// Fatal configuration errors detected before the first tick
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no animation descriptor for state `{0}`")]
    MissingDescriptor(&'static str),

    #[error("animation `{0}` has zero frames")]
    EmptyAnimation(&'static str),

    #[error(
        "animation `{state}` frame {frame} maps to cell ({row}, {col}) \
         outside the {sheet_rows}x{sheet_columns} sheet"
    )]
    RegionOutOfBounds {
        state: &'static str,
        frame: u32,
        row: u32,
        col: u32,
        sheet_rows: u32,
        sheet_columns: u32,
    },
}

/// Read-only table mapping each state to its animation descriptor
///
/// Built once at startup, shared by the simulation for the rest of the
/// process. Lookup cannot fail once construction succeeded.
#[derive(Debug, Clone)]
pub struct AnimationCatalog {
    descriptors: [AnimationDescriptor; AnimationState::ALL.len()],
}

impl AnimationCatalog {
    /// The canonical adventurer-sheet catalog
    pub fn standard() -> Self {
        Self {
            descriptors: [
                AnimationDescriptor::single_row(0, 4), // idle
                AnimationDescriptor::single_row(1, 6), // running
                AnimationDescriptor::single_row(2, 4), // jumping
                AnimationDescriptor::single_row(0, 6), // crouching
                AnimationDescriptor::spanning(5, 12, 6), // attacking, rows 5-6
            ],
        }
    }

    /// Start building a catalog entry by entry
    pub fn builder() -> AnimationCatalogBuilder {
        AnimationCatalogBuilder::default()
    }

    /// Descriptor for a state
    pub fn descriptor(&self, state: AnimationState) -> &AnimationDescriptor {
        &self.descriptors[state.catalog_index()]
    }

    /// Check every descriptor against the sheet grid
    ///
    /// Must be called before the first tick; an animation whose last frame
    /// falls outside the sheet would otherwise sample garbage forever.
    pub fn validate(&self, sheet_columns: u32, sheet_rows: u32) -> Result<(), CatalogError> {
        for state in AnimationState::ALL {
            let descriptor = self.descriptor(state);
            if descriptor.frame_count == 0 {
                return Err(CatalogError::EmptyAnimation(state.name()));
            }
            let last = descriptor.frame_count - 1;
            let (row, col) = descriptor.cell(last);
            if row >= sheet_rows || col >= sheet_columns {
                return Err(CatalogError::RegionOutOfBounds {
                    state: state.name(),
                    frame: last,
                    row,
                    col,
                    sheet_rows,
                    sheet_columns,
                });
            }
        }
        Ok(())
    }
}

/// Builder collecting descriptors for all five states
#[derive(Debug, Default)]
pub struct AnimationCatalogBuilder {
    entries: [Option<AnimationDescriptor>; AnimationState::ALL.len()],
}

impl AnimationCatalogBuilder {
    /// Set the descriptor for one state
    pub fn with(mut self, state: AnimationState, descriptor: AnimationDescriptor) -> Self {
        self.entries[state.catalog_index()] = Some(descriptor);
        self
    }

    /// Finish the catalog; every state must have a descriptor
    pub fn build(self) -> Result<AnimationCatalog, CatalogError> {
        let mut descriptors = [AnimationDescriptor::single_row(0, 0); AnimationState::ALL.len()];
        for state in AnimationState::ALL {
            match self.entries[state.catalog_index()] {
                Some(descriptor) => descriptors[state.catalog_index()] = descriptor,
                None => return Err(CatalogError::MissingDescriptor(state.name())),
            }
        }
        Ok(AnimationCatalog { descriptors })
    }
}

/// Per-character animation progress
///
/// Tracks the current frame index and the time accumulated since the last
/// frame advance. Reset whenever the active state changes.
#[derive(Debug, Clone, Default)]
pub struct PlaybackCursor {
    frame: u32,
    timer_ms: f64,
}

impl PlaybackCursor {
    /// Current 0-based frame index
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Accumulated time since the last frame advance, in milliseconds
    pub fn timer_ms(&self) -> f64 {
        self.timer_ms
    }

    /// Rewind to frame 0 with an empty timer
    pub fn reset(&mut self) {
        self.frame = 0;
        self.timer_ms = 0.0;
    }

    /// Accumulate elapsed time and advance at most one frame
    ///
    /// The timer resets to zero on advance rather than carrying the
    /// remainder, so an oversized tick still moves a single frame: the
    /// advance is bounded and lossy. Returns true when the frame index
    /// wrapped back to 0, i.e. the animation completed a full cycle.
    pub fn advance(&mut self, delta_ms: f64, frame_duration_ms: f64, frame_count: u32) -> bool {
        self.timer_ms += delta_ms;
        if self.timer_ms >= frame_duration_ms {
            self.timer_ms = 0.0;
            self.frame = (self.frame + 1) % frame_count;
            return self.frame == 0;
        }
        false
    }
}
