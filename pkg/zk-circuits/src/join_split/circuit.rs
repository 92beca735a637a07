use zk_primitives::{Domain, Element, GeneratorSet};

use super::note::derive_nullifier;
use crate::{
    constants::ACCOUNT_COMMIT_OFFSET,
    data::{JoinSplitOutputs, JoinSplitTx},
    merkle,
    signature::{SigningKey, VerificationKey},
    synth::{ConstraintBuilder, Native, Synthesizer},
    util::engine,
    Error, Result,
};

/// The leaf registering `key` as a spending account
///
/// Commits the key's coordinate pair under the account domain; inserting this
/// into the tree is what authorizes the key to sign join-splits
pub fn account_commitment(generators: &GeneratorSet, key: &VerificationKey) -> Element {
    let (x, y) = key.coordinates();

    engine(generators, Domain::Account)
        .commit_array(&[x, y], ACCOUNT_COMMIT_OFFSET)
        .to_element()
}

impl<const MERKLE_D: usize> JoinSplitTx<MERKLE_D> {
    /// Build the full join-split constraint set
    ///
    /// Written once against [`Synthesizer`]; run it with
    /// [`Native`] to evaluate, or [`ConstraintBuilder`] to produce the graph
    /// a proof backend consumes. Structural problems in the witness return an
    /// error before constraints are emitted; semantic problems leave the
    /// result unsatisfiable without changing its shape
    pub fn synthesize<S: Synthesizer>(&self, syn: &mut S) -> Result<JoinSplitOutputs> {
        let _span = tracing::debug_span!("join_split", depth = MERKLE_D).entered();

        // structural validation happens in full before the first constraint,
        // so a malformed witness can never leave a half-built system behind
        for input in &self.inputs {
            if input.real {
                input.merkle_path.check_structure(input.leaf_index)?;
            }
        }
        self.account_path.check_structure(self.account_index)?;

        let claimed_root = syn.witness("merkle root", self.merkle_root);
        let public_input = syn.witness("public input", self.public_input);
        let public_output = syn.witness("public output", self.public_output);
        let asset = syn.witness("asset id", self.asset_id);
        let spend_key = syn.witness("spend key", self.spend_key);

        // input slots: membership (for real notes), zero value (for dummies),
        // asset binding, nullifier derivation
        let mut nullifiers = Vec::with_capacity(self.inputs.len());
        let mut input_values = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            let cells = input.enforce_constraints(syn, &claimed_root, &spend_key, &asset)?;
            nullifiers.push(cells.nullifier);
            input_values.push(cells.note.value);
        }

        // output slots: commitment derivation, asset pinned to the
        // transaction's asset
        let mut commitments = Vec::with_capacity(self.outputs.len());
        let mut output_values = Vec::with_capacity(self.outputs.len());
        for output in &self.outputs {
            let cells = output.enforce_constraints(syn)?;
            syn.assert_equal("output asset", &cells.asset_id, &asset);
            commitments.push(cells.commitment);
            output_values.push(cells.value);
        }

        // value conservation: public_input + Σ in == public_output + Σ out
        let total_in = input_values
            .iter()
            .fold(public_input.clone(), |acc, value| syn.add(&acc, value));
        let total_out = output_values
            .iter()
            .fold(public_output.clone(), |acc, value| syn.add(&acc, value));
        syn.assert_equal("balance", &total_in, &total_out);

        // exactly one signature, over the canonical encoding of the public
        // transaction fields
        let mut message = syn.hash(Domain::Sig, &public_input, &public_output);
        for field in [
            &asset,
            &nullifiers[0],
            &nullifiers[1],
            &commitments[0],
            &commitments[1],
        ] {
            message = syn.hash(Domain::Sig, &message, field);
        }
        syn.verify_signature("authorization", &self.signing_key, &self.signature, &message);

        // the signing account must be registered under the same root,
        // independent of which notes are spent
        let (account_x, account_y) = self.signing_key.coordinates();
        let account_x = syn.witness("account x", account_x);
        let account_y = syn.witness("account y", account_y);
        let account = syn.commit(
            Domain::Account,
            &[account_x, account_y],
            ACCOUNT_COMMIT_OFFSET,
        )?;

        let account_root = merkle::membership_gadget(syn, &account, &self.account_path);
        syn.assert_equal("account membership", &account_root, &claimed_root);

        let account_index = syn.witness("account index", Element::from(self.account_index));
        let account_inner = syn.hash(Domain::Nullifier, &account, &account_index);
        let account_nullifier = syn.hash(Domain::Nullifier, &account_inner, &spend_key);

        syn.expose_public("merkle root", &claimed_root);
        syn.expose_public("nullifier 1", &nullifiers[0]);
        syn.expose_public("nullifier 2", &nullifiers[1]);
        syn.expose_public("account nullifier", &account_nullifier);
        syn.expose_public("output commitment 1", &commitments[0]);
        syn.expose_public("output commitment 2", &commitments[1]);
        syn.expose_public("public input", &public_input);
        syn.expose_public("public output", &public_output);
        syn.expose_public("asset id", &asset);

        Ok(JoinSplitOutputs {
            nullifier1: syn.value(&nullifiers[0]),
            nullifier2: syn.value(&nullifiers[1]),
            account_nullifier: syn.value(&account_nullifier),
            output_commitments: [syn.value(&commitments[0]), syn.value(&commitments[1])],
        })
    }

    /// The message the transaction signature covers
    ///
    /// A left fold of the signature-domain hash over `[public_input,
    /// public_output, asset_id, nf1, nf2, cm1, cm2]` - the same chain the
    /// circuit recomputes, so a signature over anything else cannot satisfy it
    pub fn message(&self, generators: &GeneratorSet) -> Element {
        let sig = engine(generators, Domain::Sig);

        let nullifier1 = self.inputs[0].nullifier(generators, self.spend_key);
        let nullifier2 = self.inputs[1].nullifier(generators, self.spend_key);
        let commitment1 = self.outputs[0].commitment(generators).to_element();
        let commitment2 = self.outputs[1].commitment(generators).to_element();

        let mut message = sig.hash(self.public_input, self.public_output);
        for field in [
            self.asset_id,
            nullifier1,
            nullifier2,
            commitment1,
            commitment2,
        ] {
            message = sig.hash(message, field);
        }

        message
    }

    /// Fill in `spend_key`, `signing_key`, and `signature` using `key`
    pub fn sign(&mut self, generators: &GeneratorSet, key: &SigningKey) {
        self.signing_key = key.verification_key(generators);
        self.spend_key = key.spend_key(generators);
        self.signature = key.sign(generators, self.message(generators));
    }

    /// The public outputs, computed natively (without any constraint pass)
    pub fn outputs(&self, generators: &GeneratorSet) -> JoinSplitOutputs {
        JoinSplitOutputs {
            nullifier1: self.inputs[0].nullifier(generators, self.spend_key),
            nullifier2: self.inputs[1].nullifier(generators, self.spend_key),
            account_nullifier: derive_nullifier(
                generators,
                account_commitment(generators, &self.signing_key),
                self.account_index,
                self.spend_key,
            ),
            output_commitments: [
                self.outputs[0].commitment(generators).to_element(),
                self.outputs[1].commitment(generators).to_element(),
            ],
        }
    }

    /// Run the native driver and report whether the witness satisfies the
    /// circuit
    pub fn is_satisfiable(&self, generators: &GeneratorSet) -> Result<bool> {
        let mut native = Native::new(generators);
        self.synthesize(&mut native)?;
        Ok(native.is_satisfied())
    }

    /// Build the constraint graph handed to the proof backend
    pub fn constraint_system<'g>(
        &self,
        generators: &'g GeneratorSet,
    ) -> Result<(ConstraintBuilder<'g>, JoinSplitOutputs)> {
        let mut builder = ConstraintBuilder::new(generators);
        let outputs = self.synthesize(&mut builder)?;
        Ok((builder, outputs))
    }

    /// Public inputs to be used in the proof; the ordering is fixed:
    ///  - merkle root
    ///  - nullifier x inputs
    ///  - account nullifier
    ///  - commitment x outputs
    ///  - public input
    ///  - public output
    ///  - asset id
    pub fn public_inputs(&self, generators: &GeneratorSet) -> Result<Vec<Element>> {
        let mut native = Native::new(generators);
        self.synthesize(&mut native)?;
        Ok(native.public_inputs())
    }

    /// Fail-fast semantic precheck for honest provers
    ///
    /// Synthesis deliberately never aborts on a bad signature or a broken
    /// balance - those become unsatisfiability, which a prover only discovers
    /// after paying for a proving run. Wallets call this first to get the
    /// same conditions as immediate errors
    pub fn validate(&self, generators: &GeneratorSet) -> Result<JoinSplitOutputs> {
        let input_sum: Element = self.inputs.iter().map(|input| input.note.value).sum();
        let output_sum: Element = self.outputs.iter().map(|note| note.value).sum();
        if self.public_input + input_sum != self.public_output + output_sum {
            return Err(Error::UnbalancedTransaction);
        }

        for input in &self.inputs {
            match input.real {
                true if input.note.asset_id != self.asset_id => {
                    return Err(Error::UnbalancedTransaction)
                }
                false if !input.note.value.is_zero() => return Err(Error::UnbalancedTransaction),
                _ => {}
            }
        }

        if self.outputs.iter().any(|note| note.asset_id != self.asset_id) {
            return Err(Error::UnbalancedTransaction);
        }

        if !self
            .signing_key
            .verify(generators, self.message(generators), &self.signature)
        {
            return Err(Error::InvalidAuthorization);
        }

        Ok(self.outputs(generators))
    }
}
