//! Release-wrapping handles around borrowed pool resources
//!
//! Every resource a caller gets from the pool is wrapped so that the
//! borrowed connection goes back exactly once, when the caller is done:
//! transactions on conclusion, prepared statements per invocation.

mod lease;
mod statement;
mod transaction;


pub(crate) use lease::ConnectionLease;
pub use statement::PooledStatement;
pub use transaction::PooledTransaction;
