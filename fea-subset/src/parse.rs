//! Turn raw FEA text into statements

mod block;
mod body;
mod lines;
mod scope;

pub(crate) use block::{find_block_end, BlockHeader};
pub(crate) use body::{parse_statements, Owner};
pub(crate) use lines::logical_lines;
pub use scope::Scope;
