
use if_chain::if_chain;

use crate::database::Database;
use crate::error::{DescentError, Internal};
use crate::term::{Term, TermData};
use crate::utility::Index;

// Head normalization: unfold solved metas and unwrap blocked redexes until a
// stable shape remains. Idempotent on its result, leaves stuck terms alone.
pub fn reduce(db: &mut Database, term: Term) -> Result<Term, DescentError> {
    match term.cloned() {
        TermData::Meta { name, args } => {
            if_chain! {
                if let Some(solution) = db.meta_solution(name);
                then {
                    let applied = apply(db, solution, args)?;
                    reduce(db, applied)
                } else {
                    Ok(term)
                }
            }
        }
        TermData::Blocked { inner, .. } => reduce(db, inner),
        _ => Ok(term),
    }
}

pub(crate) fn apply(db: &mut Database, fun: Term, extra: Vec<Term>) -> Result<Term, DescentError> {
    if extra.is_empty() {
        return Ok(fun)
    }
    match fun.cloned() {
        TermData::Var { index, mut args } => {
            args.extend(extra);
            Ok(db.make_term(TermData::Var { index, args }))
        }
        TermData::Con { name, mut args } => {
            args.extend(extra);
            Ok(db.make_term(TermData::Con { name, args }))
        }
        TermData::Def { name, mut args } => {
            args.extend(extra);
            Ok(db.make_term(TermData::Def { name, args }))
        }
        TermData::Meta { name, mut args } => {
            args.extend(extra);
            Ok(db.make_term(TermData::Meta { name, args }))
        }
        TermData::Lam { body } => {
            let mut rest = extra;
            let first = rest.remove(0);
            let reduced = beta(db, &body, &first)?;
            apply(db, reduced, rest)
        }
        _ => Err(Internal::BadApplication.into()),
    }
}

fn beta(db: &mut Database, body: &Term, arg: &Term) -> Result<Term, DescentError> {
    let arg = shift(db, arg, 1, 0);
    let result = substitute(db, body, &arg, 0)?;
    Ok(shift(db, &result, -1, 0))
}

fn shift(db: &mut Database, term: &Term, amount: isize, cutoff: usize) -> Term {
    match term.cloned() {
        TermData::Var { index, args } => {
            let index = if *index < cutoff {
                index
            } else {
                Index::from((*index as isize + amount) as usize)
            };
            let args = shift_all(db, &args, amount, cutoff);
            db.make_term(TermData::Var { index, args })
        }
        TermData::Con { name, args } => {
            let args = shift_all(db, &args, amount, cutoff);
            db.make_term(TermData::Con { name, args })
        }
        TermData::Def { name, args } => {
            let args = shift_all(db, &args, amount, cutoff);
            db.make_term(TermData::Def { name, args })
        }
        TermData::Lam { body } => {
            let body = shift(db, &body, amount, cutoff + 1);
            db.make_term(TermData::Lam { body })
        }
        TermData::Pi { domain, body } => {
            let domain = shift(db, &domain, amount, cutoff);
            let body = shift(db, &body, amount, cutoff + 1);
            db.make_term(TermData::Pi { domain, body })
        }
        TermData::Fun { domain, codomain } => {
            let domain = shift(db, &domain, amount, cutoff);
            let codomain = shift(db, &codomain, amount, cutoff);
            db.make_term(TermData::Fun { domain, codomain })
        }
        TermData::Meta { name, args } => {
            let args = shift_all(db, &args, amount, cutoff);
            db.make_term(TermData::Meta { name, args })
        }
        TermData::Blocked { blocker, inner } => {
            let inner = shift(db, &inner, amount, cutoff);
            db.make_term(TermData::Blocked { blocker, inner })
        }
        TermData::Lit { .. } | TermData::Sort => term.clone(),
    }
}

fn shift_all(db: &mut Database, args: &[Term], amount: isize, cutoff: usize) -> Vec<Term> {
    args.iter().map(|arg| shift(db, arg, amount, cutoff)).collect()
}

fn substitute(db: &mut Database, term: &Term, value: &Term, var: usize) -> Result<Term, DescentError> {
    match term.cloned() {
        TermData::Var { index, args } => {
            let args = substitute_all(db, &args, value, var)?;
            if *index == var {
                apply(db, value.clone(), args)
            } else {
                Ok(db.make_term(TermData::Var { index, args }))
            }
        }
        TermData::Con { name, args } => {
            let args = substitute_all(db, &args, value, var)?;
            Ok(db.make_term(TermData::Con { name, args }))
        }
        TermData::Def { name, args } => {
            let args = substitute_all(db, &args, value, var)?;
            Ok(db.make_term(TermData::Def { name, args }))
        }
        TermData::Lam { body } => {
            let value = shift(db, value, 1, 0);
            let body = substitute(db, &body, &value, var + 1)?;
            Ok(db.make_term(TermData::Lam { body }))
        }
        TermData::Pi { domain, body } => {
            let domain = substitute(db, &domain, value, var)?;
            let inner = shift(db, value, 1, 0);
            let body = substitute(db, &body, &inner, var + 1)?;
            Ok(db.make_term(TermData::Pi { domain, body }))
        }
        TermData::Fun { domain, codomain } => {
            let domain = substitute(db, &domain, value, var)?;
            let codomain = substitute(db, &codomain, value, var)?;
            Ok(db.make_term(TermData::Fun { domain, codomain }))
        }
        TermData::Meta { name, args } => {
            let args = substitute_all(db, &args, value, var)?;
            Ok(db.make_term(TermData::Meta { name, args }))
        }
        TermData::Blocked { blocker, inner } => {
            let inner = substitute(db, &inner, value, var)?;
            Ok(db.make_term(TermData::Blocked { blocker, inner }))
        }
        TermData::Lit { .. } | TermData::Sort => Ok(term.clone()),
    }
}

fn substitute_all(
    db: &mut Database,
    args: &[Term],
    value: &Term,
    var: usize
) -> Result<Vec<Term>, DescentError> {
    args.iter().map(|arg| substitute(db, arg, value, var)).collect()
}
