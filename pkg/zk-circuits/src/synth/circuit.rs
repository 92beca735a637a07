use zk_primitives::{Domain, Element, GeneratorSet};

use crate::{
    signature::{Signature, VerificationKey},
    util::engine,
};

use super::Synthesizer;

/// A handle to a cell in a [`ConstraintBuilder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Var(usize);

/// One recorded relation between cells
#[derive(Debug, Clone)]
enum Gate {
    Add {
        a: usize,
        b: usize,
        out: usize,
    },
    Select {
        bit: usize,
        on_true: usize,
        on_false: usize,
        out: usize,
    },
    Hash {
        domain: Domain,
        left: usize,
        right: usize,
        out: usize,
    },
    Commit {
        domain: Domain,
        offset: u32,
        inputs: Vec<usize>,
        out: usize,
    },
    Equal {
        label: &'static str,
        a: usize,
        b: usize,
    },
    Boolean {
        label: &'static str,
        var: usize,
    },
    Signature {
        label: &'static str,
        key: VerificationKey,
        signature: Signature,
        message: usize,
    },
}

/// The constraint-emitting synthesis mode
///
/// Each operation allocates an output cell, assigns it the evaluated value,
/// and records a typed gate relating it to its inputs. The recorded graph
/// plus the assignment is what a proof backend consumes;
/// [`is_satisfied`][ConstraintBuilder::is_satisfied] replays every gate
/// against the assignment, the same check a mock prover performs.
///
/// Crucially, the set of gates depends only on the *shape* of the circuit,
/// never on whether the witness is valid - an invalid witness produces the
/// identical graph with an assignment that fails to satisfy it.
#[derive(Debug)]
pub struct ConstraintBuilder<'g> {
    generators: &'g GeneratorSet,
    witnesses: Vec<Element>,
    labels: Vec<&'static str>,
    gates: Vec<Gate>,
    publics: Vec<usize>,
}

impl<'g> ConstraintBuilder<'g> {
    /// Create a builder over `generators`
    pub fn new(generators: &'g GeneratorSet) -> Self {
        Self {
            generators,
            witnesses: Vec::new(),
            labels: Vec::new(),
            gates: Vec::new(),
            publics: Vec::new(),
        }
    }

    /// The number of allocated cells
    pub fn witness_count(&self) -> usize {
        self.witnesses.len()
    }

    /// The number of recorded gates
    pub fn constraint_count(&self) -> usize {
        self.gates.len()
    }

    /// The values assigned to the exposed public inputs, in synthesis order
    pub fn public_inputs(&self) -> Vec<Element> {
        self.publics.iter().map(|&i| self.witnesses[i]).collect()
    }

    /// Whether the assignment satisfies every recorded gate
    pub fn is_satisfied(&self) -> bool {
        self.gates.iter().all(|gate| self.holds(gate))
    }

    /// Labels of the assertion gates the assignment fails, in gate order
    pub fn unsatisfied(&self) -> Vec<&'static str> {
        self.gates
            .iter()
            .filter(|gate| !self.holds(gate))
            .map(|gate| match gate {
                Gate::Equal { label, .. }
                | Gate::Boolean { label, .. }
                | Gate::Signature { label, .. } => *label,
                Gate::Add { out, .. }
                | Gate::Select { out, .. }
                | Gate::Hash { out, .. }
                | Gate::Commit { out, .. } => self.labels[*out],
            })
            .collect()
    }

    fn alloc(&mut self, label: &'static str, value: Element) -> Var {
        self.witnesses.push(value);
        self.labels.push(label);
        Var(self.witnesses.len() - 1)
    }

    fn holds(&self, gate: &Gate) -> bool {
        let w = |i: &usize| self.witnesses[*i];

        match gate {
            Gate::Add { a, b, out } => w(a) + w(b) == w(out),
            Gate::Select {
                bit,
                on_true,
                on_false,
                out,
            } => w(bit) * w(on_true) + (Element::ONE - w(bit)) * w(on_false) == w(out),
            Gate::Hash {
                domain,
                left,
                right,
                out,
            } => engine(self.generators, *domain).hash(w(left), w(right)) == w(out),
            Gate::Commit {
                domain,
                offset,
                inputs,
                out,
            } => {
                let values: Vec<Element> = inputs.iter().map(w).collect();
                match engine(self.generators, *domain).commit(&values, *offset) {
                    Ok(commitment) => commitment.to_element() == w(out),
                    Err(_) => false,
                }
            }
            Gate::Equal { a, b, .. } => w(a) == w(b),
            Gate::Boolean { var, .. } => w(var).as_bool().is_some(),
            Gate::Signature {
                key,
                signature,
                message,
                ..
            } => key.verify(self.generators, w(message), signature),
        }
    }
}

impl Synthesizer for ConstraintBuilder<'_> {
    type Var = Var;

    fn witness(&mut self, label: &'static str, value: Element) -> Var {
        self.alloc(label, value)
    }

    fn constant(&mut self, value: Element) -> Var {
        self.alloc("const", value)
    }

    fn value(&self, var: &Var) -> Element {
        self.witnesses[var.0]
    }

    fn add(&mut self, a: &Var, b: &Var) -> Var {
        let out = self.alloc("add", self.witnesses[a.0] + self.witnesses[b.0]);
        self.gates.push(Gate::Add {
            a: a.0,
            b: b.0,
            out: out.0,
        });
        out
    }

    fn select(&mut self, bit: &Var, on_true: &Var, on_false: &Var) -> Var {
        let value = self.witnesses[bit.0] * self.witnesses[on_true.0]
            + (Element::ONE - self.witnesses[bit.0]) * self.witnesses[on_false.0];
        let out = self.alloc("select", value);
        self.gates.push(Gate::Select {
            bit: bit.0,
            on_true: on_true.0,
            on_false: on_false.0,
            out: out.0,
        });
        out
    }

    fn hash(&mut self, domain: Domain, left: &Var, right: &Var) -> Var {
        let value =
            engine(self.generators, domain).hash(self.witnesses[left.0], self.witnesses[right.0]);
        let out = self.alloc("hash", value);
        self.gates.push(Gate::Hash {
            domain,
            left: left.0,
            right: right.0,
            out: out.0,
        });
        out
    }

    fn commit(&mut self, domain: Domain, values: &[Var], offset: u32) -> crate::Result<Var> {
        let assigned: Vec<Element> = values.iter().map(|v| self.witnesses[v.0]).collect();
        let commitment = engine(self.generators, domain).commit(&assigned, offset)?;

        let out = self.alloc("commit", commitment.to_element());
        self.gates.push(Gate::Commit {
            domain,
            offset,
            inputs: values.iter().map(|v| v.0).collect(),
            out: out.0,
        });
        Ok(out)
    }

    fn assert_equal(&mut self, label: &'static str, a: &Var, b: &Var) {
        self.gates.push(Gate::Equal {
            label,
            a: a.0,
            b: b.0,
        });
    }

    fn assert_boolean(&mut self, label: &'static str, var: &Var) {
        self.gates.push(Gate::Boolean { label, var: var.0 });
    }

    fn verify_signature(
        &mut self,
        label: &'static str,
        key: &VerificationKey,
        signature: &Signature,
        message: &Var,
    ) {
        self.gates.push(Gate::Signature {
            label,
            key: *key,
            signature: *signature,
            message: message.0,
        });
    }

    fn expose_public(&mut self, _label: &'static str, var: &Var) {
        self.publics.push(var.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gates_record_and_replay() {
        let generators = GeneratorSet::new();
        let mut builder = ConstraintBuilder::new(&generators);

        let a = builder.witness("a", Element::new(1));
        let b = builder.witness("b", Element::new(2));
        let sum = builder.add(&a, &b);
        let three = builder.constant(Element::new(3));
        builder.assert_equal("sum", &sum, &three);

        assert_eq!(builder.witness_count(), 4);
        assert_eq!(builder.constraint_count(), 2);
        assert!(builder.is_satisfied());
        assert!(builder.unsatisfied().is_empty());
    }

    #[test]
    fn commit_gate_rejects_empty_input() {
        let generators = GeneratorSet::new();
        let mut builder = ConstraintBuilder::new(&generators);

        let result = builder.commit(Domain::Note, &[], 0);
        assert!(matches!(result, Err(crate::Error::InvalidInput(_))));
    }

    #[test]
    fn boolean_gate_catches_non_bits() {
        let generators = GeneratorSet::new();
        let mut builder = ConstraintBuilder::new(&generators);

        let two = builder.witness("two", Element::new(2));
        builder.assert_boolean("bit", &two);

        assert!(!builder.is_satisfied());
        assert_eq!(builder.unsatisfied(), ["bit"]);
    }
}
