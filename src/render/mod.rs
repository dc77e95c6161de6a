//! Host adapters that are not the terminal UI.

pub mod memory;
pub mod text;

pub use memory::MemoryView;
