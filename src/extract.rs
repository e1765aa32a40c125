
use imbl::Vector;

use crate::compare::compare_args;
use crate::database::Database;
use crate::error::{DescentError, Internal};
use crate::graph::{Call, CallGraph};
use crate::pattern::{clause_patterns, lift_all, IndexPat};
use crate::term::{Clause, Term, TermData};
use crate::utility::Symbol;

// The caller's place in the block, shared across one clause traversal.
#[derive(Debug, Clone, Copy)]
pub struct BlockView<'a> {
    pub names: &'a [Symbol],
    pub arities: &'a [usize],
    pub caller: usize,
}

impl BlockView<'_> {
    fn target_of(&self, name: Symbol) -> Option<usize> {
        self.names.iter().position(|member| *member == name)
    }
}

pub fn clause_calls(
    db: &mut Database,
    view: &BlockView,
    clause: &Clause
) -> Result<CallGraph, DescentError> {
    let mut graph = CallGraph::empty();
    if let Some(extracted) = clause_patterns(clause)? {
        collect(db, view, &extracted.patterns, &extracted.body, &mut graph)?;
    }
    Ok(graph)
}

fn collect(
    db: &mut Database,
    view: &BlockView,
    pats: &Vector<IndexPat>,
    term: &Term,
    graph: &mut CallGraph
) -> Result<(), DescentError> {
    let term = db.reduce(term.clone())?;
    match &*term {
        TermData::Var { args, .. } | TermData::Con { args, .. } => {
            for arg in args.iter() {
                collect(db, view, pats, arg, graph)?;
            }
        }
        TermData::Def { name, args } => {
            // arguments first, under the unlifted patterns
            for arg in args.iter() {
                collect(db, view, pats, arg, graph)?;
            }
            if let Some(target) = view.target_of(*name) {
                let entries = compare_args(pats, args, view.arities[target]);
                let matrix = db.make_matrix(entries);
                let witness = db.ranges_of(*name);
                graph.insert(Call { source: view.caller, target, matrix, witness });
            }
        }
        TermData::Lam { body } => {
            let lifted = lift_all(pats);
            collect(db, view, &lifted, body, graph)?;
        }
        TermData::Pi { domain, body } => {
            collect(db, view, pats, domain, graph)?;
            let lifted = lift_all(pats);
            collect(db, view, &lifted, body, graph)?;
        }
        TermData::Fun { domain, codomain } => {
            collect(db, view, pats, domain, graph)?;
            collect(db, view, pats, codomain, graph)?;
        }
        TermData::Lit { .. } | TermData::Sort | TermData::Meta { .. } => { }
        TermData::Blocked { .. } => return Err(Internal::BlockedAfterReduce.into()),
    }
    Ok(())
}
