//! Validation results and the script collaborator.

use crate::instance::Instance;
use crate::schema::Schema;
use serde::Serialize;
use std::any::Any;
use std::error::Error;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::warn;

/// One failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub class_name: String,
    /// Empty for class-level failures (scripts).
    pub property_name: String,
    pub message: String,
}

/// Accumulates failures across every check of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationStatus {
    errors: Vec<ValidationError>,
    exceptions: Vec<String>,
}

impl ValidationStatus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(
        &mut self,
        class_name: impl Into<String>,
        property_name: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.errors.push(ValidationError {
            class_name: class_name.into(),
            property_name: property_name.into(),
            message: message.into(),
        });
    }

    /// Records a collaborator failure.
    pub fn add_exception(&mut self, message: impl Into<String>) {
        self.exceptions.push(message.into());
    }

    /// Failures in evaluation order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    #[must_use]
    pub fn exceptions(&self) -> &[String] {
        &self.exceptions
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty() && self.exceptions.is_empty()
    }
}

/// Error raised by a validation script.
pub type ScriptError = Box<dyn Error + Send + Sync>;

/// Runs class-level validation scripts.
pub trait ScriptRunner {
    /// Evaluates `script` against `instance`. `Ok(false)` means the instance
    /// is invalid; the script may record its own errors in `status`.
    fn run_validation(
        &self,
        script: &str,
        instance: &Instance,
        status: &mut ValidationStatus,
    ) -> Result<bool, ScriptError>;
}

/// Runner for hosts without a script engine: every script is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScriptRunner;

impl ScriptRunner for NoScriptRunner {
    fn run_validation(
        &self,
        script: &str,
        _instance: &Instance,
        _status: &mut ValidationStatus,
    ) -> Result<bool, ScriptError> {
        Err(format!("no script runner available for '{script}'").into())
    }
}

impl Schema {
    /// Validates `instance` against every field of this class, then runs the
    /// class's validation script when one is set.
    ///
    /// Every check runs; failures accumulate in `status`. A script that
    /// errors or panics is recorded as an exception and fails validation.
    pub fn validate_instance(
        &self,
        instance: &Instance,
        runner: &dyn ScriptRunner,
        status: &mut ValidationStatus,
    ) -> bool {
        let mut valid = true;
        for field in self.sorted_fields() {
            valid &= field.validate(self.name(), instance.value(field.name()), status);
        }

        let script = self.validation_script();
        if script.trim().is_empty() {
            return valid;
        }

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            runner.run_validation(script, instance, status)
        }));
        let script_valid = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!(class = %self.name(), script = %script, error = %e, "Validation script failed");
                status.add_exception(format!("validation script '{script}' failed: {e}"));
                false
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                warn!(class = %self.name(), script = %script, reason = %reason, "Validation script panicked");
                status.add_exception(format!("validation script '{script}' panicked: {reason}"));
                false
            }
        };
        valid && script_valid
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
