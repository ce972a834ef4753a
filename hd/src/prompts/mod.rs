//! Prompt templates for the router and the creation/refinement tasks
//!
//! Declarative per-task prompt configuration: Handlebars templates with named
//! interpolation slots (`{{job_role}}`, `{{location}}`, `{{company_name}}`,
//! ...), loaded once at startup from a user override directory or the
//! embedded defaults.

pub mod embedded;
mod loader;

pub use loader::{
    PromptLoader, RefinePromptContext, ResearchPromptContext, RouterPromptContext, WritePromptContext,
};
