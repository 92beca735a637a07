use zk_primitives::{Domain, Element, GeneratorSet};

use crate::{
    signature::{Signature, VerificationKey},
    util::engine,
};

use super::Synthesizer;

/// The plain-arithmetic synthesis mode
///
/// Variables are bare [`Element`]s, every operation is evaluated on the spot,
/// and failed assertions are recorded instead of aborting. After synthesis,
/// [`is_satisfied`][Native::is_satisfied] tells you whether the equivalent
/// constraint system would have been satisfiable.
#[derive(Debug, Clone)]
pub struct Native<'g> {
    generators: &'g GeneratorSet,
    violations: Vec<&'static str>,
    publics: Vec<(&'static str, Element)>,
}

impl<'g> Native<'g> {
    /// Create a driver over `generators`
    pub fn new(generators: &'g GeneratorSet) -> Self {
        Self {
            generators,
            violations: Vec::new(),
            publics: Vec::new(),
        }
    }

    /// Whether every assertion made so far held
    pub fn is_satisfied(&self) -> bool {
        self.violations.is_empty()
    }

    /// Labels of the assertions that failed, in synthesis order
    pub fn violations(&self) -> &[&'static str] {
        &self.violations
    }

    /// The exposed public inputs, in synthesis order
    pub fn public_inputs(&self) -> Vec<Element> {
        self.publics.iter().map(|(_, value)| *value).collect()
    }

    fn violated(&mut self, label: &'static str) {
        tracing::debug!(label, "constraint violated");
        self.violations.push(label);
    }
}

impl Synthesizer for Native<'_> {
    type Var = Element;

    fn witness(&mut self, _label: &'static str, value: Element) -> Element {
        value
    }

    fn constant(&mut self, value: Element) -> Element {
        value
    }

    fn value(&self, var: &Element) -> Element {
        *var
    }

    fn add(&mut self, a: &Element, b: &Element) -> Element {
        *a + *b
    }

    fn select(&mut self, bit: &Element, on_true: &Element, on_false: &Element) -> Element {
        *bit * *on_true + (Element::ONE - *bit) * *on_false
    }

    fn hash(&mut self, domain: Domain, left: &Element, right: &Element) -> Element {
        engine(self.generators, domain).hash(*left, *right)
    }

    fn commit(
        &mut self,
        domain: Domain,
        values: &[Element],
        offset: u32,
    ) -> crate::Result<Element> {
        let commitment = engine(self.generators, domain).commit(values, offset)?;
        Ok(commitment.to_element())
    }

    fn assert_equal(&mut self, label: &'static str, a: &Element, b: &Element) {
        if a != b {
            self.violated(label);
        }
    }

    fn assert_boolean(&mut self, label: &'static str, var: &Element) {
        if var.as_bool().is_none() {
            self.violated(label);
        }
    }

    fn verify_signature(
        &mut self,
        label: &'static str,
        key: &VerificationKey,
        signature: &Signature,
        message: &Element,
    ) {
        if !key.verify(self.generators, *message, signature) {
            self.violated(label);
        }
    }

    fn expose_public(&mut self, label: &'static str, var: &Element) {
        self.publics.push((label, *var));
    }
}
