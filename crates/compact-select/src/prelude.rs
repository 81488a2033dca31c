//! Commonly used types, for glob import.
//!
//! ```
//! use compact_select::prelude::*;
//! ```

pub use crate::config::{RegionConfig, ShellConfig};
pub use crate::error::{Result, SelectError};
pub use crate::geometry::{MenuPlacement, Point, Rect, Size};
pub use crate::model::{
    Key, SelectItem, SelectOption, SelectSection, SelectValue, SelectionMode, SelectionOutcome,
};
pub use crate::widget::{
    CompactSelect, CompositeController, FocusDirection, FocusRequest, FocusTarget, KeyCode,
    KeyOutcome, KeyPressEvent, OverlayState, Region, RegionSelection, RenderRow, TriggerLabel,
};
pub use compact_select_core::{ConnectionId, Signal};
