//! Intelligence module for bracefold LSP
//!
//! This module provides cursor-driven features:
//! - Hover previews (block content on its keyword)
//! - Navigation (next/previous keyword block)

pub mod hover;
pub mod navigation;


pub use hover::HoverAnalyzer;
pub use navigation::Navigator;
