//! Conditional-visibility evaluator
//!
//! Given a schema, its UI hints, and the live form values, computes which
//! fields are currently visible and returns a reduced schema/hints pair
//! ready for rendering. Pure and total: the same input triple always yields
//! the same output, with no hidden state.

use taskform_types::{DisplayIf, FormSchema, FormValues, UiHints};

// ── Evaluation outcome ───────────────────────────────────────────────

/// Three-state result of evaluating one predicate
///
/// `Indeterminate` marks a predicate that references a field which is itself
/// currently hidden — distinct from a plain mismatch so the policy choice is
/// explicit rather than incidental. An indeterminate field is not rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConditionOutcome {
    Satisfied,
    NotSatisfied,
    /// The predicate references a field that is itself hidden
    Indeterminate,
}

/// How a predicate treats values of fields that are currently hidden
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HiddenFieldPolicy {
    /// Use the field's last known value even while it is hidden.
    /// Matches the historical behavior of metadata-driven forms: hiding a
    /// field does not erase what was typed into it.
    #[default]
    UseLastValue,
    /// Treat a hidden field's value as absent; predicates over it come back
    /// [`ConditionOutcome::Indeterminate`]
    TreatAsMissing,
}

// ── Evaluator ────────────────────────────────────────────────────────

/// Filters a schema/hints pair down to the currently visible subtree
#[derive(Clone, Copy, Debug, Default)]
pub struct ConditionalEvaluator {
    policy: HiddenFieldPolicy,
}

impl ConditionalEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: HiddenFieldPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> HiddenFieldPolicy {
        self.policy
    }

    /// Compute the reduced schema/hints pair for the current values
    ///
    /// A field is visible when it carries no predicate, or its predicate
    /// evaluates [`ConditionOutcome::Satisfied`]. Hidden fields are removed
    /// from the returned schema's properties and `required` list and from
    /// the returned hints; visible fields pass through unchanged.
    pub fn apply(
        &self,
        schema: &FormSchema,
        hints: &UiHints,
        values: &FormValues,
    ) -> (FormSchema, UiHints) {
        let mut visible_schema = schema.clone();
        let mut visible_hints = hints.clone();

        let hidden: Vec<String> = schema
            .field_names()
            .filter(|field| {
                hints
                    .display_if(field)
                    .map(|predicate| {
                        self.evaluate(predicate, schema, hints, values)
                            != ConditionOutcome::Satisfied
                    })
                    .unwrap_or(false)
            })
            .map(str::to_string)
            .collect();

        for field in &hidden {
            visible_schema.remove_field(field);
            visible_hints.remove_field(field);
        }

        (visible_schema, visible_hints)
    }

    /// Evaluate one predicate against the current values
    ///
    /// A condition naming a field absent from the schema never matches —
    /// misconfiguration degrades silently rather than erroring.
    pub fn evaluate(
        &self,
        predicate: &DisplayIf,
        schema: &FormSchema,
        hints: &UiHints,
        values: &FormValues,
    ) -> ConditionOutcome {
        let mut outcome = ConditionOutcome::Satisfied;
        for condition in predicate.conditions() {
            if !schema.has_field(&condition.field) {
                return ConditionOutcome::NotSatisfied;
            }
            if self.policy == HiddenFieldPolicy::TreatAsMissing
                && self.is_hidden(&condition.field, schema, hints, values)
            {
                // Keep scanning: a later misconfigured condition still wins.
                outcome = ConditionOutcome::Indeterminate;
                continue;
            }
            match values.get(&condition.field) {
                Some(actual) if *actual == condition.value => {}
                _ => return ConditionOutcome::NotSatisfied,
            }
        }
        outcome
    }

    /// One-level visibility probe for the referenced field, using
    /// last-known-value semantics to avoid chasing predicate chains
    fn is_hidden(
        &self,
        field: &str,
        schema: &FormSchema,
        hints: &UiHints,
        values: &FormValues,
    ) -> bool {
        match hints.display_if(field) {
            None => false,
            Some(predicate) => predicate.conditions().iter().any(|condition| {
                !schema.has_field(&condition.field)
                    || values.get(&condition.field) != Some(&condition.value)
            }),
        }
    }
}
