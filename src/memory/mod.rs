//! Memory access: the raw byte channel and the typed accessors built on it
//!
//! [`ProcessHandle`] enforces exact-length transfers over the host's raw
//! channel; [`TypedReader`] and [`TypedWriter`] compose it with the codec
//! to expose scalar, vector, and strided-array operations.

pub mod handle;
pub mod reader;
pub mod writer;

pub use handle::ProcessHandle;
pub use reader::TypedReader;
pub use writer::TypedWriter;
