
pub mod utility;
pub mod hc;
pub mod order;
pub mod matrix;
pub mod term;
pub mod metavar;
pub mod pattern;
pub mod compare;
pub mod graph;
pub mod extract;
pub mod reduction;
pub mod database;
pub mod check;
pub mod error;

pub mod prelude {
    pub use crate::{
        utility::*,
        hc::*,
        order::*,
        matrix::*,
        term::*,
        metavar::*,
        pattern::*,
        graph::*,
        database::*,
        check::*,
        error::*,
    };
}
