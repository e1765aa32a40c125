
use imbl::Vector;

use crate::matrix::MatrixData;
use crate::order::Order;
use crate::pattern::{IndexPat, Pat};
use crate::term::{Term, TermData};

// Matrix of one call: rows follow the callee's formal parameters, columns
// the caller's patterns. Missing arguments carry no information.
pub fn compare_args(patterns: &Vector<IndexPat>, args: &[Term], rows: usize) -> MatrixData {
    MatrixData::build(rows, patterns.len(), |r, c| {
        match args.get(r) {
            Some(arg) => compare_term(arg, &patterns[c]),
            None => Order::Unknown,
        }
    })
}

pub fn compare_term(term: &Term, pattern: &IndexPat) -> Order {
    match (&**term, pattern) {
        (TermData::Var { index, .. }, Pat::Var { var }) => {
            if index == var { Order::Le } else { Order::Unknown }
        }
        // A variable matched by any subpattern sits strictly inside the
        // constructor the pattern names.
        (TermData::Var { .. }, Pat::Con { args, .. }) => {
            let best = Order::infimum(args.iter().map(|sub| compare_term(term, sub)));
            Order::Lt.compose(best)
        }
        (TermData::Lit { value }, Pat::Lit { value: expected }) => {
            if value == expected { Order::Le } else { Order::Unknown }
        }
        (TermData::Con { name, args }, Pat::Con { name: expected, args: sub })
            if name == expected && args.len() == sub.len() =>
        {
            args.iter()
                .zip(sub.iter())
                .map(|(term, pat)| compare_term(term, pat))
                .fold(Order::Le, Order::compose)
        }
        _ => Order::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::term::Literal;
    use crate::utility::{Index, Symbol};

    fn var(db: &mut Database, index: usize) -> Term {
        db.make_term(TermData::Var { index: Index::from(index), args: vec![] })
    }

    fn con(db: &mut Database, name: &str, args: Vec<Term>) -> Term {
        db.make_term(TermData::Con { name: Symbol::from(name), args })
    }

    fn pvar(index: usize) -> IndexPat {
        Pat::Var { var: Index::from(index) }
    }

    fn pcon(name: &str, args: Vec<IndexPat>) -> IndexPat {
        Pat::Con { name: Symbol::from(name), args }
    }

    #[test]
    fn variable_against_its_own_pattern() {
        let mut db = Database::new();
        let x = var(&mut db, 0);
        assert_eq!(compare_term(&x, &pvar(0)), Order::Le);
        assert_eq!(compare_term(&x, &pvar(1)), Order::Unknown);
    }

    #[test]
    fn variable_inside_a_constructor_pattern_decreases() {
        let mut db = Database::new();
        let x = var(&mut db, 0);
        assert_eq!(compare_term(&x, &pcon("suc", vec![pvar(0)])), Order::Lt);
        assert_eq!(compare_term(&x, &pcon("suc", vec![pvar(1)])), Order::Unknown);
        // nested one level deeper is still a strict decrease
        assert_eq!(
            compare_term(&x, &pcon("suc", vec![pcon("suc", vec![pvar(0)])])),
            Order::Lt
        );
    }

    #[test]
    fn variable_against_a_nullary_constructor_pattern() {
        let mut db = Database::new();
        let x = var(&mut db, 0);
        assert_eq!(compare_term(&x, &pcon("zero", vec![])), Order::Unknown);
    }

    #[test]
    fn same_constructor_componentwise() {
        let mut db = Database::new();
        let x = var(&mut db, 0);
        let sx = con(&mut db, "suc", vec![x.clone()]);
        // suc #0 against the pattern (suc x) is the whole argument again
        assert_eq!(compare_term(&sx, &pcon("suc", vec![pvar(0)])), Order::Le);
        // suc #0 against (suc (suc x)) sits strictly below
        assert_eq!(
            compare_term(&sx, &pcon("suc", vec![pcon("suc", vec![pvar(0)])])),
            Order::Lt
        );
        // a mismatched component poisons the whole comparison
        let y = var(&mut db, 1);
        let pair = con(&mut db, "pair", vec![x, y]);
        assert_eq!(
            compare_term(&pair, &pcon("pair", vec![pvar(0), pvar(0)])),
            Order::Unknown
        );
    }

    #[test]
    fn mismatched_constructors_are_unrelated() {
        let mut db = Database::new();
        let z = con(&mut db, "zero", vec![]);
        assert_eq!(compare_term(&z, &pcon("suc", vec![pvar(0)])), Order::Unknown);
        assert_eq!(compare_term(&z, &pcon("zero", vec![])), Order::Le);
    }

    #[test]
    fn literals_compare_by_equality() {
        let mut db = Database::new();
        let three = db.make_term(TermData::Lit { value: Literal::Natural(3) });
        assert_eq!(
            compare_term(&three, &Pat::Lit { value: Literal::Natural(3) }),
            Order::Le
        );
        assert_eq!(
            compare_term(&three, &Pat::Lit { value: Literal::Natural(4) }),
            Order::Unknown
        );
        let x = var(&mut db, 0);
        assert_eq!(
            compare_term(&x, &Pat::Lit { value: Literal::Natural(3) }),
            Order::Unknown
        );
    }

    #[test]
    fn constructed_arguments_never_relate_to_a_bare_variable() {
        let mut db = Database::new();
        let x = var(&mut db, 0);
        let sx = con(&mut db, "suc", vec![x]);
        assert_eq!(compare_term(&sx, &pvar(0)), Order::Unknown);
    }

    #[test]
    fn unused_patterns_give_no_information() {
        let mut db = Database::new();
        let x = var(&mut db, 0);
        assert_eq!(compare_term(&x, &Pat::Unused), Order::Unknown);
    }

    #[test]
    fn rows_beyond_the_given_arguments_are_unknown() {
        let mut db = Database::new();
        let x = var(&mut db, 0);
        let patterns = imbl::vector![pvar(0)];
        let matrix = compare_args(&patterns, &[x], 2);
        assert_eq!(matrix.entry(0, 0), Order::Le);
        assert_eq!(matrix.entry(1, 0), Order::Unknown);
    }
}
