use zk_primitives::{Domain, GeneratorSet, PedersenEngine};

/// Shorthand for a domain-bound engine over a shared generator set
pub(crate) fn engine(generators: &GeneratorSet, domain: Domain) -> PedersenEngine<'_> {
    PedersenEngine::new(generators, domain)
}
