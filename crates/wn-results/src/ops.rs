//! Elementwise arithmetic on result sets.
//!
//! Binary operators work key by key over the keys both sets share. Unary
//! operators and integer division apply to every key. Each result is named
//! after the expression that produced it, e.g. `A[ts] - B[ts]`.

use std::ops::{Add, Div, Neg, Sub};

use crate::results::SimulationResults;

impl SimulationResults {
    pub fn abs(&self) -> Self {
        self.map_cells(format!("|{}|", self.label()), f64::abs)
    }

    pub fn powf(&self, exp: f64) -> Self {
        self.map_cells(format!("{} ** {exp}", self.label()), move |v| v.powf(exp))
    }

    /// Unary plus: a relabelled copy.
    pub fn pos(&self) -> Self {
        self.map_cells(format!("+{}", self.label()), |v| v)
    }
}

impl Add for &SimulationResults {
    type Output = SimulationResults;

    fn add(self, rhs: Self) -> SimulationResults {
        self.zip_cells(rhs, format!("{} + {}", self.label(), rhs.label()), |a, b| a + b)
    }
}

impl Sub for &SimulationResults {
    type Output = SimulationResults;

    fn sub(self, rhs: Self) -> SimulationResults {
        self.zip_cells(rhs, format!("{} - {}", self.label(), rhs.label()), |a, b| a - b)
    }
}

impl Div for &SimulationResults {
    type Output = SimulationResults;

    fn div(self, rhs: Self) -> SimulationResults {
        self.zip_cells(rhs, format!("{} / {}", self.label(), rhs.label()), |a, b| a / b)
    }
}

/// Divide by a count, e.g. to average summed results.
impl Div<i64> for &SimulationResults {
    type Output = SimulationResults;

    fn div(self, rhs: i64) -> SimulationResults {
        let n = rhs as f64;
        self.map_cells(format!("{} / {rhs}", self.label()), move |v| v / n)
    }
}

impl Neg for &SimulationResults {
    type Output = SimulationResults;

    fn neg(self) -> SimulationResults {
        self.map_cells(format!("-{}", self.label()), |v| -v)
    }
}

macro_rules! forward_owned_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for SimulationResults {
            type Output = SimulationResults;

            fn $method(self, rhs: Self) -> SimulationResults {
                (&self).$method(&rhs)
            }
        }
    };
}

forward_owned_binop!(Add, add);
forward_owned_binop!(Sub, sub);
forward_owned_binop!(Div, div);

impl Neg for SimulationResults {
    type Output = SimulationResults;

    fn neg(self) -> SimulationResults {
        -&self
    }
}

impl Div<i64> for SimulationResults {
    type Output = SimulationResults;

    fn div(self, rhs: i64) -> SimulationResults {
        &self / rhs
    }
}

#[cfg(test)]
mod tests {
    use crate::frame::ResultFrame;
    use crate::results::SimulationResults;

    fn results(name: &str, head: f64) -> SimulationResults {
        let frame = ResultFrame::new(vec![0, 3600])
            .unwrap()
            .with_column("J1", vec![head, -head])
            .unwrap();
        SimulationResults::new(name).with_node("head", frame)
    }

    #[test]
    fn names_describe_operation() {
        let a = results("A", 1.0);
        let b = results("B", 2.0);
        let c = &a + &b;
        assert_eq!(c.network_name, format!("{} + {}", a.label(), b.label()));
        let n = &a / 4;
        assert_eq!(n.network_name, format!("{} / 4", a.label()));
        assert!(a.abs().network_name.starts_with('|'));
    }

    #[test]
    fn owned_operands_forward() {
        let c = results("A", 3.0) - results("B", 1.0);
        assert_eq!(c.node["head"].value(0, "J1"), Some(2.0));
        let d = -results("A", 3.0);
        assert_eq!(d.node["head"].value(0, "J1"), Some(-3.0));
    }
}
