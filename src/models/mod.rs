// Data Models
pub mod dir_tree;
pub mod file_entry;
pub mod history;
pub mod listing;
pub mod operation;

pub use dir_tree::{DirectoryTree, NodeId, NodeState, TreeNode};
pub use file_entry::{EntryKind, FileEntry};
pub use history::NavigationHistory;
pub use listing::{DirectoryListing, ListingSource, ListingStatus};
pub use operation::{OperationOutcome, OperationReport, OperationType};
