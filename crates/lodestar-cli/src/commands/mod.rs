//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (load_engine, load_responses)
//! - `analyze` - Insight reports and per-theme signal views
//! - `lexicon` - Single-dimension scoring and lexicon listing

pub mod analyze;
pub mod core;
pub mod lexicon;

// Re-export command functions for main.rs
pub use analyze::*;
pub use core::*;
pub use lexicon::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
