//! Coach Application Layer - Use Cases

pub mod chat;
pub mod config;
pub mod dice_comment;

pub use chat::ChatUseCase;
pub use dice_comment::DiceCommentUseCase;
