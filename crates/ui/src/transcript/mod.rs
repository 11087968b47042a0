/// Pure message-kind presentation table.
pub mod catalog;
/// Caller-side JSON transcript loading.
pub mod loader;
/// Domain entities for transcript rendering.
pub mod message;
pub mod message_item;
pub mod pdf;
pub mod scroll_manager;
pub mod view;

pub use catalog::{CatalogEntry, MessageIcon, THINKING_CAUTION};
pub use loader::{TranscriptFileError, load_transcript};
pub use message::{MessageKind, TranscriptMessage};
pub use message_item::{COPIED_BADGE_RESET_MS, CopyBadge, MessageItem};
pub use pdf::PdfExporter;
pub use scroll_manager::{FollowTracker, ScrollManager};
pub use view::{RegionStore, TRANSCRIPT_REGION_ID, TranscriptView, transcript_region_content};
