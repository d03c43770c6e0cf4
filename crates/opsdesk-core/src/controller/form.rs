//! Create/edit form lifecycle for one record.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::Result;
use crate::error::{Error, InvalidInputError, ValidationErrors};
use crate::resource::{FormMode, Mutation, Operation, Resource};
use crate::traits::ResourceClient;
use crate::types::Timestamp;

use super::feedback::Feedback;

/// `Closed -> Open -> Submitting -> {Closed, Open}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Closed,
    Open,
    Submitting,
}

/// What the open form will write.
#[derive(Debug, Clone, PartialEq)]
pub enum FormTarget<Id> {
    Create,
    Edit(Id),
}

impl<Id> FormTarget<Id> {
    pub fn mode(&self) -> FormMode {
        match self {
            FormTarget::Create => FormMode::Create,
            FormTarget::Edit(_) => FormMode::Edit,
        }
    }
}

/// Owns one form draft, separate from the list it was opened from.
///
/// Changes to the draft reach the list only through the [`Mutation`]
/// returned by a successful [`submit`](Self::submit).
pub struct FormController<R: Resource> {
    phase: FormPhase,
    target: Option<FormTarget<R::Id>>,
    draft: Option<R::Draft>,
    errors: ValidationErrors,
    failure: Option<Feedback>,
}

impl<R: Resource> Default for FormController<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> FormController<R> {
    pub fn new() -> Self {
        Self {
            phase: FormPhase::Closed,
            target: None,
            draft: None,
            errors: ValidationErrors::new(),
            failure: None,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != FormPhase::Closed
    }

    pub fn target(&self) -> Option<&FormTarget<R::Id>> {
        self.target.as_ref()
    }

    pub fn draft(&self) -> Option<&R::Draft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        self.draft.as_mut()
    }

    /// Field errors from the last validation.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Why the last submit failed, if it did.
    pub fn failure(&self) -> Option<&Feedback> {
        self.failure.as_ref()
    }

    /// Open an empty form seeded with the resource defaults.
    pub fn open_create(&mut self) {
        self.open(FormTarget::Create, R::default_draft());
    }

    /// Open a form seeded from `record`. The record itself is never touched.
    pub fn open_edit(&mut self, record: &R::Record) {
        self.open(FormTarget::Edit(R::id(record)), R::draft_from(record));
    }

    fn open(&mut self, target: FormTarget<R::Id>, draft: R::Draft) {
        debug!(resource = R::DESCRIPTOR.name, mode = ?target.mode(), "Opening form");
        self.phase = FormPhase::Open;
        self.target = Some(target);
        self.draft = Some(draft);
        self.errors = ValidationErrors::new();
        self.failure = None;
    }

    /// Discard the draft.
    pub fn cancel(&mut self) {
        *self = Self::new();
    }

    /// Set one draft field by its wire name.
    ///
    /// `raw` is tried as a string first, then as JSON, then as a date-time,
    /// so `name=Lee`, `limit=3`, `enabled=true` and
    /// `start_time=2026-03-01T10:00` all land on their typed fields.
    pub fn set_field(&mut self, field: &str, raw: &str) -> Result<()> {
        let draft = self.draft.as_ref().ok_or_else(|| InvalidInputError::Other {
            message: "form is not open".to_string(),
        })?;
        let current = serde_json::to_value(draft).map_err(|e| InvalidInputError::Other {
            message: e.to_string(),
        })?;

        let mut candidates = vec![Value::String(raw.to_string())];
        if let Ok(parsed) = serde_json::from_str::<Value>(raw) {
            candidates.push(parsed);
        }
        if let Ok(ts) = Timestamp::parse(raw) {
            candidates.push(Value::from(ts.as_millis()));
        }

        for candidate in candidates {
            let mut object = current.clone();
            if let Value::Object(map) = &mut object {
                map.insert(field.to_string(), candidate.clone());
            }
            let Ok(updated) = serde_json::from_value::<R::Draft>(object) else {
                continue;
            };

            // Unknown members are dropped by deserialization.
            let echoed = serde_json::to_value(&updated).ok();
            let kept = echoed
                .as_ref()
                .and_then(|v| v.get(field))
                .is_some_and(|v| *v == candidate);
            if !kept && !candidate.is_null() {
                return Err(InvalidInputError::UnknownField {
                    resource: R::DESCRIPTOR.name,
                    field: field.to_string(),
                }
                .into());
            }

            self.draft = Some(updated);
            return Ok(());
        }

        Err(InvalidInputError::Other {
            message: format!("invalid value '{}' for field '{}'", raw, field),
        }
        .into())
    }

    /// Run field validation on the draft, recording the errors inline.
    pub fn validate(&mut self) -> std::result::Result<(), ValidationErrors> {
        let (Some(target), Some(draft)) = (&self.target, &self.draft) else {
            return Ok(());
        };
        let result = R::validate(draft, target.mode());
        self.errors = match &result {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors.clone(),
        };
        result
    }

    /// Validate and send the draft.
    ///
    /// Validation failures are shown inline and never reach `client`. On
    /// failure the form stays open with the draft intact; on success it
    /// closes and the committed write is returned for list reconciliation.
    ///
    /// A submit dropped mid-flight leaves the form `Submitting` until it
    /// is reopened or cancelled.
    #[instrument(skip(self, client), fields(resource = R::DESCRIPTOR.name))]
    pub async fn submit<C>(&mut self, client: &C) -> std::result::Result<Mutation<R>, Feedback>
    where
        C: ResourceClient<R> + ?Sized,
    {
        if self.phase != FormPhase::Open {
            return Err(Feedback::Notice("form is not open".to_string()));
        }

        if let Err(errors) = self.validate() {
            debug!(fields = errors.len(), "Form validation failed");
            self.failure = None;
            return Err(Feedback::Inline(errors));
        }

        let (Some(target), Some(draft)) = (self.target.clone(), self.draft.clone()) else {
            return Err(Feedback::Notice("form is not open".to_string()));
        };

        let op = match target {
            FormTarget::Create => Operation::Create,
            FormTarget::Edit(_) => Operation::Update,
        };
        if let Err(err) = R::DESCRIPTOR.require(op) {
            return Err(self.failed(&err));
        }

        self.phase = FormPhase::Submitting;
        let result = match target {
            FormTarget::Create => client.create(&draft).await.map(Mutation::Created),
            FormTarget::Edit(id) => match client.update(&id, &draft).await {
                Ok(record) => Ok(Mutation::Updated { id, draft, record }),
                Err(err) => Err(err),
            },
        };

        match result {
            Ok(mutation) => {
                debug!(operation = op.as_str(), "Form submitted");
                self.cancel();
                Ok(mutation)
            }
            Err(err) => Err(self.failed(&err)),
        }
    }

    fn failed(&mut self, err: &Error) -> Feedback {
        let feedback = Feedback::from_error(err, &R::DESCRIPTOR);
        self.phase = FormPhase::Open;
        self.failure = Some(feedback.clone());
        feedback
    }
}

impl<R: Resource> std::fmt::Debug for FormController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("resource", &R::DESCRIPTOR.name)
            .field("phase", &self.phase)
            .field("target", &self.target)
            .field("draft", &self.draft)
            .field("errors", &self.errors)
            .finish()
    }
}
