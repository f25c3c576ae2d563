//! CLI command implementations.

mod ddl;
mod helpers;
mod validate;

pub use ddl::ddl;
pub use validate::validate;

#[cfg(test)]
mod tests;
