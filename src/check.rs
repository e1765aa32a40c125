
use std::fmt;

use crate::database::{Database, MutualBlock};
use crate::error::DescentError;
use crate::extract::{clause_calls, BlockView};
use crate::graph::CallGraph;
use crate::matrix::CallMatrix;
use crate::term::DefKind;
use crate::utility::{RangeSet, Symbol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Terminates,
    Failed(Vec<FailedCall>),
}

impl Verdict {
    pub fn terminates(&self) -> bool {
        matches!(self, Verdict::Terminates)
    }
}

// One cycle the analysis could not refute, named after its entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedCall {
    pub names: Vec<Symbol>,
    pub matrix: CallMatrix,
    pub call_sites: RangeSet,
}

impl fmt::Display for FailedCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no argument of")?;
        for name in self.names.iter() {
            write!(f, " {}", name)?;
        }
        write!(f, " decreases on a recursive path")
    }
}

// Judge one mutual block: gather every clause's calls, close the graph
// under composition, then demand a strict decrease on the diagonal of
// every idempotent self-call.
pub fn termination_check(db: &mut Database, block: &MutualBlock) -> Result<Verdict, DescentError> {
    let arities: Vec<usize> = block.names.iter().map(|name| db.arity_of(*name)).collect();
    let mut graph = CallGraph::empty();
    for (caller, name) in block.names.iter().enumerate() {
        let clauses = match db.def_of(*name)? {
            DefKind::Function { clauses } => clauses.clone(),
            _ => continue,
        };
        let view = BlockView { names: &block.names, arities: &arities, caller };
        for clause in clauses.iter() {
            let calls = clause_calls(db, &view, clause)?;
            graph = graph.union(calls);
        }
    }
    log::info!("block of {} has {} direct calls", block.len(), graph.len());
    let closed = graph.complete(db)?;
    let mut failed = Vec::new();
    for call in closed.idempotents(db)? {
        let diagonal = call.matrix.diagonal()?;
        if diagonal.iter().any(|order| order.decreasing()) {
            continue
        }
        failed.push(FailedCall {
            names: vec![block.names[call.source]],
            matrix: call.matrix.clone(),
            call_sites: call.witness.clone(),
        });
    }
    if failed.is_empty() {
        Ok(Verdict::Terminates)
    } else {
        let position = |name: Option<&Symbol>| {
            name.and_then(|name| block.names.iter().position(|member| member == name))
        };
        failed.sort_by_key(|failure| position(failure.names.first()));
        Ok(Verdict::Failed(failed))
    }
}

// Convenience entry for a single definition: judge the whole block the
// name belongs to.
pub fn check_name(db: &mut Database, name: Symbol) -> Result<Verdict, DescentError> {
    let block = db.mutual_block_containing(name)?;
    termination_check(db, &block)
}
