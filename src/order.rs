
use std::fmt;

// Size relation between a call argument and a caller pattern. `Lt` is the
// most informative outcome, `Unknown` the least.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Order {
    Lt,
    Le,
    Unknown,
}

impl Order {
    // Relation along a chain of two calls. Unit is `Le`, `Unknown` absorbs.
    pub fn compose(self, other: Order) -> Order {
        match (self, other) {
            (Order::Unknown, _) | (_, Order::Unknown) => Order::Unknown,
            (Order::Lt, _) | (_, Order::Lt) => Order::Lt,
            (Order::Le, Order::Le) => Order::Le,
        }
    }

    // The stronger of the two relations.
    pub fn inf(self, other: Order) -> Order {
        if self <= other { self } else { other }
    }

    // The weaker of the two relations.
    pub fn sup(self, other: Order) -> Order {
        if self <= other { other } else { self }
    }

    pub fn infimum<I>(orders: I) -> Order
    where I: IntoIterator<Item = Order>
    {
        orders.into_iter().fold(Order::Unknown, Order::inf)
    }

    pub fn decreasing(self) -> bool {
        self == Order::Lt
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Lt => write!(f, "<"),
            Order::Le => write!(f, "≤"),
            Order::Unknown => write!(f, "?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Order; 3] = [Order::Lt, Order::Le, Order::Unknown];

    #[test]
    fn compose_is_associative() {
        for a in ALL {
            for b in ALL {
                for c in ALL {
                    assert_eq!(a.compose(b.compose(c)), a.compose(b).compose(c));
                }
            }
        }
    }

    #[test]
    fn compose_unit_is_le() {
        for a in ALL {
            assert_eq!(Order::Le.compose(a), a);
            assert_eq!(a.compose(Order::Le), a);
        }
    }

    #[test]
    fn compose_absorbs_unknown() {
        for a in ALL {
            assert_eq!(Order::Unknown.compose(a), Order::Unknown);
            assert_eq!(a.compose(Order::Unknown), Order::Unknown);
        }
    }

    #[test]
    fn lattice_laws() {
        for a in ALL {
            assert_eq!(a.inf(a), a);
            assert_eq!(a.sup(a), a);
            assert_eq!(a.inf(Order::Unknown), a);
            assert_eq!(a.sup(Order::Lt), a);
            for b in ALL {
                assert_eq!(a.inf(b), b.inf(a));
                assert_eq!(a.sup(b), b.sup(a));
                for c in ALL {
                    assert_eq!(a.inf(b.inf(c)), a.inf(b).inf(c));
                    assert_eq!(a.sup(b.sup(c)), a.sup(b).sup(c));
                }
            }
        }
    }

    #[test]
    fn infimum_of_nothing_is_unknown() {
        assert_eq!(Order::infimum([]), Order::Unknown);
        assert_eq!(Order::infimum([Order::Le, Order::Lt]), Order::Lt);
    }
}
