pub mod controller;
pub mod index;
pub mod loader;
pub mod render;

pub use controller::{ControllerSettings, Key, PointerTarget, SuggestionController, SuggestionView};
pub use loader::{load_index, PageCards, RecordSource, SourceError};
pub use render::{SuggestionItem, SuggestionPanel};
