//! The logical matrix type and its storage, indexing, view, and cursor
//! layers

mod core;
mod cursor;
mod display;
mod index;
mod storage;
mod view;

pub use self::core::{ComplexMatrix, Matrix, RealMatrix, WILDCARD_TOKEN};
pub use cursor::{ElementCursor, Elements};
pub use index::IndexExpr;
pub use storage::{CsrData, Storage, StorageOrder, StorageScheme};
pub use view::{ReadOnlyView, RowCollection};
