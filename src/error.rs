
use std::error::Error;

use thiserror::Error;

// Broken invariants. These cannot arise from well-typed input and are never
// caught inside the crate; each message carries a stable identifier.
#[derive(Debug, Error)]
pub enum Internal {
    #[error("invariant broken [pattern.head-binders]: clause head binds more variables than its body")]
    HeadExceedsBinders,
    #[error("invariant broken [pattern.body-binders]: {extra} unconsumed binders after the clause head")]
    LeftoverBinders { extra: usize },
    #[error("invariant broken [matrix.shape]: cannot multiply {lhs_rows}x{lhs_cols} by {rhs_rows}x{rhs_cols}")]
    ShapeMismatch {
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize
    },
    #[error("invariant broken [matrix.diagonal]: {rows}x{cols} matrix is not square")]
    NotSquare { rows: usize, cols: usize },
    #[error("invariant broken [walker.blocked]: blocked term survived reduction")]
    BlockedAfterReduce,
    #[error("invariant broken [reduce.head]: arguments applied to a head that cannot take any")]
    BadApplication,
}

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("{name} is not declared")]
    MissingName { name: String },
    #[error("{name} is declared twice")]
    DeclCollision { name: String },
    #[error("meta {name} is already solved")]
    MetaAlreadySolved { name: String },
}

#[derive(Debug, Error)]
pub enum DescentError {
    #[error(transparent)]
    Internal(#[from] Internal),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("{0}")]
    External(Box<dyn Error + Send + Sync>),
}

impl DescentError {
    // Wrap a host oracle failure; no context is added and none is retried.
    pub fn external(error: impl Error + Send + Sync + 'static) -> DescentError {
        DescentError::External(Box::new(error))
    }
}
