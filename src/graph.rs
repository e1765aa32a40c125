
use ahash::AHashMap;

use crate::database::Database;
use crate::error::Internal;
use crate::matrix::CallMatrix;
use crate::utility::RangeSet;

// One recursive call, source and target given as positions in the mutual
// block. The witness records where the call was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub source: usize,
    pub target: usize,
    pub matrix: CallMatrix,
    pub witness: RangeSet,
}

#[derive(Debug, Default, Clone)]
pub struct CallGraph {
    calls: Vec<Call>,
    dedup: AHashMap<(usize, usize, CallMatrix), usize>,
}

impl CallGraph {
    pub fn empty() -> CallGraph {
        CallGraph::default()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Call> {
        self.calls.iter()
    }

    pub fn contains(&self, call: &Call) -> bool {
        self.dedup
            .contains_key(&(call.source, call.target, call.matrix.clone()))
    }

    // True when the edge set or a witness set grew.
    pub fn insert(&mut self, call: Call) -> bool {
        let key = (call.source, call.target, call.matrix.clone());
        if let Some(&at) = self.dedup.get(&key) {
            let existing = &mut self.calls[at];
            let before = existing.witness.len();
            existing.witness.extend(call.witness.iter().copied());
            existing.witness.len() != before
        } else {
            self.dedup.insert(key, self.calls.len());
            self.calls.push(call);
            true
        }
    }

    pub fn union(mut self, other: CallGraph) -> CallGraph {
        for call in other.calls {
            self.insert(call);
        }
        self
    }

    // Closure under composition: keep pairing chained calls until neither
    // the edge set nor any witness set changes. Finiteness of the order set
    // bounds the matrices per name pair, so the loop ends.
    pub fn complete(mut self, db: &mut Database) -> Result<CallGraph, Internal> {
        loop {
            let mut changed = false;
            let snapshot = self.calls.clone();
            for first in snapshot.iter() {
                for second in snapshot.iter() {
                    if first.target != second.source {
                        continue
                    }
                    let product = second.matrix.product(&first.matrix)?;
                    let matrix = db.make_matrix(product);
                    let mut witness = first.witness.clone();
                    witness.extend(second.witness.iter().copied());
                    changed |= self.insert(Call {
                        source: first.source,
                        target: second.target,
                        matrix,
                        witness
                    });
                }
            }
            if !changed {
                break
            }
        }
        Ok(self)
    }

    // Self-calls whose matrix is a fixpoint of squaring; each one is the
    // algebraic trace of a cycle through its source.
    pub fn idempotents<'a>(&'a self, db: &mut Database) -> Result<Vec<&'a Call>, Internal> {
        let mut result = Vec::new();
        for call in self.calls.iter() {
            if call.source != call.target {
                continue
            }
            let squared = db.make_matrix(call.matrix.product(&call.matrix)?);
            if squared == call.matrix {
                result.push(call);
            }
        }
        Ok(result)
    }
}
