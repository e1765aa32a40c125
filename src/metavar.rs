
use crate::term::Term;

#[derive(Debug, Clone)]
pub enum MetaState {
    Unsolved,
    Solved(Term),
}

impl MetaState {
    pub fn solution(&self) -> Option<&Term> {
        match self {
            MetaState::Solved(term) => Some(term),
            MetaState::Unsolved => None,
        }
    }
}
