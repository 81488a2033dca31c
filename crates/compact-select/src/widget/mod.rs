//! Interactive pieces: regions, the composite controller and the shell.
//!
//! Ownership runs top-down: a [`CompactSelect`] owns one
//! [`CompositeController`], which owns its [`Region`]s by index. Each
//! region owns its option snapshot and selection state exclusively.

mod composite;
mod events;
mod overlay;
mod region;
mod render;

pub use composite::{CompositeController, OverlayState, TriggerLabel};
pub use events::{
    FocusDirection, FocusRequest, FocusTarget, KeyCode, KeyOutcome, KeyPressEvent,
    KeyboardModifiers,
};
pub use overlay::CompactSelect;
pub use region::{ListMode, Region, RegionFocus, RegionSelection, SelectionChange};
pub use render::{OptionRow, RenderRow, SectionRow};
