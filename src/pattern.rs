
use imbl::Vector;

use crate::error::Internal;
use crate::term::{Clause, ClauseBody, Literal, Pattern, Term};
use crate::utility::*;

// A clause head as seen from inside its body. Generic in the variable
// representation: levels while the head is being consumed, indices after
// the one-time conversion.
#[derive(Debug, Hash, Clone, PartialEq, Eq)]
pub enum Pat<V> {
    Var { var: V },
    Con { name: Symbol, args: Vec<Pat<V>> },
    Lit { value: Literal },
    Unused,
}

pub type LevelPat = Pat<Level>;
pub type IndexPat = Pat<Index>;

impl IndexPat {
    pub fn lift(&self) -> IndexPat {
        match self {
            Pat::Var { var } => Pat::Var { var: *var + 1 },
            Pat::Con { name, args } => Pat::Con {
                name: *name,
                args: args.iter().map(IndexPat::lift).collect()
            },
            Pat::Lit { value } => Pat::Lit { value: *value },
            Pat::Unused => Pat::Unused,
        }
    }
}

pub fn lift_all(pats: &Vector<IndexPat>) -> Vector<IndexPat> {
    pats.iter().map(IndexPat::lift).collect()
}

impl LevelPat {
    fn reindex(&self, binders: usize) -> IndexPat {
        match self {
            Pat::Var { var } => Pat::Var { var: var.to_index(binders) },
            Pat::Con { name, args } => Pat::Con {
                name: *name,
                args: args.iter().map(|p| p.reindex(binders)).collect()
            },
            Pat::Lit { value } => Pat::Lit { value: *value },
            Pat::Unused => Pat::Unused,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedClause {
    pub patterns: Vector<IndexPat>,
    pub body: Term,
}

// Match the head against the body's binder spine. `None` marks an absurd
// clause, which contributes no calls.
pub fn clause_patterns(clause: &Clause) -> Result<Option<ExtractedClause>, Internal> {
    let mut level = 0;
    let mut body = &clause.body;
    let mut pats = Vec::with_capacity(clause.patterns.len());
    for pattern in clause.patterns.iter() {
        match consume(pattern, &mut body, &mut level)? {
            Some(pat) => pats.push(pat),
            None => return Ok(None),
        }
    }
    match body {
        ClauseBody::Body(term) => {
            let patterns = pats.iter().map(|p| p.reindex(level)).collect();
            Ok(Some(ExtractedClause { patterns, body: term.clone() }))
        }
        ClauseBody::NoBody => Ok(None),
        leftover @ (ClauseBody::Bind(_) | ClauseBody::NoBind(_)) => {
            Err(Internal::LeftoverBinders { extra: binder_depth(leftover) })
        }
    }
}

fn binder_depth(body: &ClauseBody) -> usize {
    match body {
        ClauseBody::Bind(inner) | ClauseBody::NoBind(inner) => 1 + binder_depth(inner),
        ClauseBody::Body(_) | ClauseBody::NoBody => 0,
    }
}

fn consume<'a>(
    pattern: &Pattern,
    body: &mut &'a ClauseBody,
    level: &mut usize
) -> Result<Option<LevelPat>, Internal> {
    if matches!(body, ClauseBody::NoBody) {
        return Ok(None)
    }
    match pattern {
        Pattern::Var { .. } => match body {
            ClauseBody::Bind(inner) => {
                let var = Level::from(*level);
                *level += 1;
                *body = &**inner;
                Ok(Some(Pat::Var { var }))
            }
            ClauseBody::NoBind(inner) => {
                *body = &**inner;
                Ok(Some(Pat::Unused))
            }
            ClauseBody::Body(_) => Err(Internal::HeadExceedsBinders),
            ClauseBody::NoBody => Ok(None),
        },
        Pattern::Lit { value } => Ok(Some(Pat::Lit { value: *value })),
        Pattern::Con { name, args } => {
            let mut sub = Vec::with_capacity(args.len());
            for arg in args.iter() {
                match consume(arg, body, level)? {
                    Some(pat) => sub.push(pat),
                    None => return Ok(None),
                }
            }
            Ok(Some(Pat::Con { name: *name, args: sub }))
        }
    }
}
