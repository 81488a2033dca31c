//! Option data, key resolution and selection state.
//!
//! These types carry no UI state of their own; a [`Region`](crate::widget::Region)
//! composes them into one navigable list.

mod key;
mod option;
mod resolver;
mod selection;

pub use key::{Key, SelectValue};
pub use option::{
    CollectionNode, FlatOptions, SectionNode, SelectItem, SelectOption, SelectSection, normalize,
};
pub use resolver::{MatchSpan, OptionPredicate, ResolveParams, ResolvedKeys, resolve};
pub use selection::{SelectedKeys, SelectionManager, SelectionMode, SelectionOutcome};
