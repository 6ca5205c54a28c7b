pub mod choices;
pub mod classify;
pub mod columns;
pub mod config;
pub mod fields;
pub mod filter;
pub mod format;
pub mod pipeline;
pub mod template;
