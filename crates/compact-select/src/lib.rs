//! compact-select - a headless composite select controller.
//!
//! The engine behind dropdown and listbox selection widgets where one
//! overlay holds several independent option lists ("regions"). It handles
//! single and multiple selection per region, keyboard navigation that
//! crosses region boundaries, disabled and hidden options, live search with
//! match spans, and size-limited option sets. Drawing is left to the host:
//! the controller hands out [`RenderRow`](widget::RenderRow)s and
//! [`FocusRequest`](widget::FocusRequest)s.
//!
//! # Example
//!
//! ```
//! use compact_select::prelude::*;
//!
//! let mut select = CompactSelect::new(ShellConfig::default())
//!     .with_region(Region::new(RegionConfig::single()).with_items(vec![
//!         SelectOption::new("any", "Any").into(),
//!     ]))
//!     .with_region(Region::new(RegionConfig::multiple()).with_items(vec![
//!         SelectSection::new(vec![
//!             SelectOption::new("apple", "Apple"),
//!             SelectOption::new("banana", "Banana"),
//!         ])
//!         .with_key("fruit")
//!         .with_label("Fruit")
//!         .with_toggle_all_button(true)
//!         .into(),
//!     ]));
//!
//! select.activate_trigger();
//! select.after_render();
//! select
//!     .composite_mut()
//!     .toggle_section(1, &Key::from("fruit"))
//!     .unwrap();
//!
//! assert_eq!(select.trigger_label().to_string(), "Apple +1");
//! ```
//!
//! # Logging
//!
//! Every subsystem logs through `tracing` under the targets listed in
//! [`compact_select_core::logging::targets`].

pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod prelude;
pub mod widget;

pub use compact_select_core::{Property, Signal};
pub use error::{Result, SelectError};
