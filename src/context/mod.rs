mod page;
mod pin;

pub(crate) use page::PageContext;
pub use pin::RenderContext;
