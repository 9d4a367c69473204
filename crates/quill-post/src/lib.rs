//! Post rendering pipeline.
//!
//! Markdown (or HTML) goes through [`compile_markdown`], heading anchor
//! injection, table-of-contents extraction and sanitization, and comes out as
//! a [`RenderedPost`] holding the final HTML, the table of contents and the UI
//! tree.

mod markdown;
mod pipeline;

pub use markdown::{compile_markdown, parser_options};
pub use pipeline::{PostError, PostOptions, PostRenderer, RenderedPost, SourceFormat};

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(PostRenderer: Send, Sync);
    static_assertions::assert_impl_all!(RenderedPost: Send, Sync);
}
