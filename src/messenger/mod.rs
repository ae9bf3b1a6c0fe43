// =============================================================================
// Messenger Module
// =============================================================================
//
// Rendering and delivery of the daily digest.

pub mod digest;
pub mod telegram;

pub use digest::build_message;
pub use telegram::TelegramMessenger;
