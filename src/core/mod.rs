// Core Logic
pub mod actions;
pub mod file_ops;
pub mod prompts;
pub mod session;

pub use file_ops::FileOperations;
pub use prompts::{ConfirmationPrompt, DestinationPicker, NameInput, NamePurpose, PromptAnswers};
pub use session::{BrowserSession, OpenTarget, SessionOptions};
