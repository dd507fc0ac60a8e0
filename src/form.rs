use crate::age::AgeResult;
use crate::calculator::AgeCalculator;
use crate::validation::{DateInput, ValidationError};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// What the form is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Exactly one of a result or an error, from the latest submit.
    Settled(Result<AgeResult, ValidationError>),
}

impl FormState {
    pub fn age(&self) -> Option<&AgeResult> {
        match self {
            FormState::Settled(Ok(age)) => Some(age),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            FormState::Settled(Err(err)) => Some(err),
            _ => None,
        }
    }
}

impl Serialize for FormState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FormState::Idle => {
                let mut s = serializer.serialize_struct("FormState", 1)?;
                s.serialize_field("state", "idle")?;
                s.end()
            }
            FormState::Settled(Ok(age)) => {
                let mut s = serializer.serialize_struct("FormState", 2)?;
                s.serialize_field("state", "settled")?;
                s.serialize_field("age", age)?;
                s.end()
            }
            FormState::Settled(Err(err)) => {
                let mut s = serializer.serialize_struct("FormState", 2)?;
                s.serialize_field("state", "settled")?;
                s.serialize_field("error", err)?;
                s.end()
            }
        }
    }
}

/// The three editable fields plus whatever the last submit produced.
#[derive(Debug, Default)]
pub struct Form {
    input: DateInput,
    state: FormState,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: DateInput) -> Self {
        Self {
            input,
            state: FormState::Idle,
        }
    }

    pub fn set_day(&mut self, value: impl Into<String>) {
        self.input.day = value.into();
    }

    pub fn set_month(&mut self, value: impl Into<String>) {
        self.input.month = value.into();
    }

    pub fn set_year(&mut self, value: impl Into<String>) {
        self.input.year = value.into();
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Replaces the previous outcome with the result of validating the
    /// current fields against the calculator's clock.
    pub fn submit(&mut self, calculator: &AgeCalculator) -> &FormState {
        self.state = FormState::Settled(calculator.compute_now(&self.input));
        &self.state
    }
}
