
use std::collections::HashMap;

use petgraph::prelude::*;
use petgraph::algo::kosaraju_scc;

use crate::error::{DatabaseError, DescentError};
use crate::hc::HcTable;
use crate::matrix::{CallMatrix, MatrixData};
use crate::metavar::MetaState;
use crate::reduction;
use crate::term::{Clause, ClauseBody, DefKind, Term, TermData};
use crate::utility::{RangeSet, Symbol};

// Functions whose recursion must be judged together, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutualBlock {
    pub names: Vec<Symbol>,
}

impl MutualBlock {
    pub fn new(names: Vec<Symbol>) -> MutualBlock {
        MutualBlock { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: Symbol) -> bool {
        self.names.contains(&name)
    }
}

#[derive(Debug, Clone)]
pub struct DeclData {
    pub kind: DefKind,
    pub ranges: RangeSet,
}

#[derive(Debug)]
pub struct Database {
    term_data: HcTable<TermData>,
    matrix_data: HcTable<MatrixData>,
    decls: HashMap<Symbol, DeclData>,
    decl_order: Vec<Symbol>,
    metas: HashMap<Symbol, MetaState>,
    next_meta: usize,
    blocks: Vec<MutualBlock>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    pub fn new() -> Database {
        Database {
            term_data: HcTable::with_capacity(128),
            matrix_data: HcTable::with_capacity(128),
            decls: HashMap::new(),
            decl_order: Vec::new(),
            metas: HashMap::new(),
            next_meta: 0,
            blocks: Vec::new()
        }
    }

    pub fn make_term(&mut self, data: TermData) -> Term {
        self.term_data.make(data)
    }

    pub fn make_matrix(&mut self, data: MatrixData) -> CallMatrix {
        self.matrix_data.make(data)
    }

    pub fn declare(
        &mut self,
        name: Symbol,
        kind: DefKind,
        ranges: RangeSet
    ) -> Result<(), DatabaseError> {
        if self.decls.contains_key(&name) {
            return Err(DatabaseError::DeclCollision { name: name.to_string() })
        }
        self.decl_order.push(name);
        self.decls.insert(name, DeclData { kind, ranges });
        // reference structure changed, cached blocks are stale
        self.blocks.clear();
        Ok(())
    }

    pub fn def_of(&self, name: Symbol) -> Result<&DefKind, DatabaseError> {
        self.decls
            .get(&name)
            .map(|decl| &decl.kind)
            .ok_or(DatabaseError::MissingName { name: name.to_string() })
    }

    pub fn ranges_of(&self, name: Symbol) -> RangeSet {
        self.decls
            .get(&name)
            .map(|decl| decl.ranges.clone())
            .unwrap_or_default()
    }

    pub fn arity_of(&self, name: Symbol) -> usize {
        match self.decls.get(&name) {
            Some(DeclData { kind: DefKind::Function { clauses }, .. }) => {
                clauses.first().map(Clause::arity).unwrap_or(0)
            }
            _ => 0,
        }
    }

    pub fn fresh_meta(&mut self) -> Symbol {
        let name = Symbol::numbered("meta", self.next_meta);
        self.next_meta += 1;
        self.metas.insert(name, MetaState::Unsolved);
        name
    }

    pub fn solve_meta(&mut self, name: Symbol, value: Term) -> Result<(), DatabaseError> {
        match self.metas.get_mut(&name) {
            Some(state @ MetaState::Unsolved) => {
                *state = MetaState::Solved(value);
                Ok(())
            }
            Some(MetaState::Solved(_)) => {
                Err(DatabaseError::MetaAlreadySolved { name: name.to_string() })
            }
            None => Err(DatabaseError::MissingName { name: name.to_string() }),
        }
    }

    pub fn meta_solution(&self, name: Symbol) -> Option<Term> {
        self.metas.get(&name).and_then(|state| state.solution().cloned())
    }

    pub fn reduce(&mut self, term: Term) -> Result<Term, DescentError> {
        reduction::reduce(self, term)
    }

    pub fn mutual_block_containing(&mut self, name: Symbol) -> Result<MutualBlock, DatabaseError> {
        if !self.decls.contains_key(&name) {
            return Err(DatabaseError::MissingName { name: name.to_string() })
        }
        if self.blocks.is_empty() {
            self.compute_blocks();
        }
        let block = self.blocks
            .iter()
            .find(|block| block.contains(name))
            .cloned()
            .unwrap_or_else(|| MutualBlock::new(vec![name]));
        Ok(block)
    }

    // Blocks are the strongly connected components of the reference graph
    // over function bodies, each listed in declaration order.
    fn compute_blocks(&mut self) {
        let mut graph: DiGraph<Symbol, ()> = DiGraph::new();
        let mut nodes = HashMap::new();
        for name in self.decl_order.iter() {
            nodes.insert(*name, graph.add_node(*name));
        }
        for name in self.decl_order.iter() {
            let clauses = match self.decls.get(name) {
                Some(DeclData { kind: DefKind::Function { clauses }, .. }) => clauses,
                _ => continue,
            };
            let mut mentioned = Vec::new();
            for clause in clauses.iter() {
                body_references(&clause.body, &mut mentioned);
            }
            for target in mentioned {
                if let (Some(&from), Some(&to)) = (nodes.get(name), nodes.get(&target)) {
                    graph.update_edge(from, to, ());
                }
            }
        }
        let position = |name: &Symbol| {
            self.decl_order.iter().position(|decl| decl == name).unwrap_or(usize::MAX)
        };
        let mut blocks = Vec::new();
        for component in kosaraju_scc(&graph) {
            let mut names: Vec<Symbol> = component.iter().map(|node| graph[*node]).collect();
            names.sort_by_key(|name| position(name));
            blocks.push(MutualBlock::new(names));
        }
        blocks.sort_by_key(|block| block.names.first().map(|name| position(name)));
        log::debug!("{} declarations form {} blocks", self.decl_order.len(), blocks.len());
        self.blocks = blocks;
    }
}

fn body_references(body: &ClauseBody, out: &mut Vec<Symbol>) {
    match body {
        ClauseBody::Body(term) => term_references(term, out),
        ClauseBody::Bind(inner) | ClauseBody::NoBind(inner) => body_references(inner, out),
        ClauseBody::NoBody => { }
    }
}

fn term_references(term: &Term, out: &mut Vec<Symbol>) {
    match &**term {
        TermData::Var { args, .. }
        | TermData::Con { args, .. }
        | TermData::Meta { args, .. } => {
            for arg in args.iter() {
                term_references(arg, out);
            }
        }
        TermData::Def { name, args } => {
            out.push(*name);
            for arg in args.iter() {
                term_references(arg, out);
            }
        }
        TermData::Lam { body } => term_references(body, out),
        TermData::Pi { domain, body } => {
            term_references(domain, out);
            term_references(body, out);
        }
        TermData::Fun { domain, codomain } => {
            term_references(domain, out);
            term_references(codomain, out);
        }
        TermData::Blocked { inner, .. } => term_references(inner, out),
        TermData::Lit { .. } | TermData::Sort => { }
    }
}
