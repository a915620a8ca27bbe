//! Result rendering.
//!
//! ```text
//! render/
//! ├── mod.rs        # Module facade (this file)
//! ├── escape.rs     # HTML escaping for text and attribute values
//! ├── highlight.rs  # Case-insensitive literal <mark> wrapping
//! ├── results.rs    # Matches -> results markup
//! └── scaffold.rs   # Modal markup the controller discovers
//! ```
//!
//! All entry text is escaped before it is wrapped; the `<mark>` tags are the
//! only markup the renderer emits around user content.

mod escape;
mod highlight;
mod results;
mod scaffold;

pub use escape::html_escape;
pub use highlight::Highlighter;
pub use results::{RenderOptions, RenderedResults, ResultRenderer, truncate_chars};
pub use scaffold::{render_modal_scaffold, render_trigger};
