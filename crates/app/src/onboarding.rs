//! Four-step onboarding wizard.
//!
//! Collects identity (name and phone), preferred cuisines, order frequency
//! and a budget range, then emits a single [`UserPreferences`] value. Only
//! the identity step is validated; committing the last step is one-way.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::debug;
use u_cook_core::{BudgetRange, Cuisine, Frequency, PhoneNumber, UserPreferences};

/// Maximum number of characters kept from the name field.
pub const NAME_MAX_CHARS: usize = 32;

/// A field-level validation failure on the identity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Enter the customer's name")]
    EmptyName,
    #[error("Enter a valid phone number")]
    InvalidPhone,
}

/// Every validation failure found on one attempt to advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    #[must_use]
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Identity,
    Cuisines,
    Frequency,
    Budget,
}

impl Step {
    pub const COUNT: usize = 4;

    /// Zero-based position of the step.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Identity => 0,
            Self::Cuisines => 1,
            Self::Frequency => 2,
            Self::Budget => 3,
        }
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::Identity => Some(Self::Cuisines),
            Self::Cuisines => Some(Self::Frequency),
            Self::Frequency => Some(Self::Budget),
            Self::Budget => None,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Identity => "Sign up",
            Self::Cuisines => "Which cuisines do you like?",
            Self::Frequency => "How often do you order food?",
            Self::Budget => "What is your budget?",
        }
    }

    #[must_use]
    pub const fn subtitle(self) -> &'static str {
        match self {
            Self::Identity => "Enter your phone number and name to register",
            Self::Cuisines => "Make a first pick",
            Self::Frequency => "Helps us find the best offers",
            Self::Budget => "We will show dishes in your range",
        }
    }
}

/// Result of a successful advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given step.
    Next(Step),
    /// The last step was committed.
    Complete(UserPreferences),
}

/// In-progress onboarding form.
#[derive(Debug, Clone)]
pub struct OnboardingFlow {
    step: Step,
    name: String,
    phone_digits: String,
    cuisines: BTreeSet<Cuisine>,
    frequency: Frequency,
    budget_min: u32,
    budget_max: u32,
    errors: Vec<ValidationError>,
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        let budget = BudgetRange::default();
        Self {
            step: Step::Identity,
            name: String::new(),
            phone_digits: String::new(),
            cuisines: BTreeSet::new(),
            frequency: Frequency::default(),
            budget_min: budget.min(),
            budget_max: budget.max(),
            errors: Vec::new(),
        }
    }
}

impl OnboardingFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name field, keeping at most [`NAME_MAX_CHARS`] characters.
    pub fn set_name(&mut self, raw: &str) {
        self.name = raw.chars().take(NAME_MAX_CHARS).collect();
    }

    /// Set the phone field. Non-digits are dropped and the value is clamped
    /// to ten digits as it is typed.
    pub fn set_phone(&mut self, raw: &str) {
        self.phone_digits = PhoneNumber::clamp_input(raw);
    }

    /// Toggle a cuisine in or out of the selection.
    ///
    /// Returns whether the cuisine is selected afterwards.
    pub fn toggle_cuisine(&mut self, cuisine: Cuisine) -> bool {
        if self.cuisines.remove(&cuisine) {
            false
        } else {
            self.cuisines.insert(cuisine);
            true
        }
    }

    /// Move the frequency slider. Values outside 0-100 are clamped.
    pub fn set_frequency(&mut self, value: i64) {
        self.frequency = Frequency::new(value);
    }

    /// Move the minimum budget slider (100-5000, clamped).
    ///
    /// The slider is independent of the maximum: `min > max` is accepted here
    /// and ordered when the wizard completes.
    pub fn set_budget_min(&mut self, value: i64) {
        self.budget_min = BudgetRange::clamp_slider(value);
    }

    /// Move the maximum budget slider (100-5000, clamped).
    pub fn set_budget_max(&mut self, value: i64) {
        self.budget_max = BudgetRange::clamp_slider(value);
    }

    /// Identity-step problems with the current input.
    #[must_use]
    pub fn identity_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName);
        }
        if self.phone_digits.len() < PhoneNumber::DIGITS {
            errors.push(ValidationError::InvalidPhone);
        }
        errors
    }

    /// Whether the Next control is enabled.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.step != Step::Identity || self.identity_errors().is_empty()
    }

    /// Try to move to the next step, or commit on the last one.
    ///
    /// # Errors
    ///
    /// On the identity step, returns every field that failed validation. The
    /// step does not change and the errors stay visible until the next
    /// attempt.
    pub fn advance(&mut self) -> Result<Advance, ValidationErrors> {
        if self.step == Step::Identity {
            self.errors = self.identity_errors();
            if !self.errors.is_empty() {
                debug!(errors = ?self.errors, "Identity step rejected");
                return Err(ValidationErrors(self.errors.clone()));
            }
        }

        match self.step.next() {
            Some(step) => {
                self.step = step;
                Ok(Advance::Next(step))
            }
            None => self
                .preferences()
                .map(Advance::Complete)
                .map_err(ValidationErrors),
        }
    }

    fn preferences(&self) -> Result<UserPreferences, Vec<ValidationError>> {
        let phone = PhoneNumber::parse(&self.phone_digits)
            .map_err(|_| vec![ValidationError::InvalidPhone])?;
        Ok(UserPreferences {
            cuisines: self.cuisines.clone(),
            frequency: self.frequency,
            budget: BudgetRange::new(self.budget_min, self.budget_max),
            phone,
            name: self.name.clone(),
        })
    }

    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Digits typed so far, without the country code.
    #[must_use]
    pub fn phone_digits(&self) -> &str {
        &self.phone_digits
    }

    #[must_use]
    pub const fn cuisines(&self) -> &BTreeSet<Cuisine> {
        &self.cuisines
    }

    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Raw slider positions as `(min, max)`, unordered.
    #[must_use]
    pub const fn budget_sliders(&self) -> (u32, u32) {
        (self.budget_min, self.budget_max)
    }

    /// Errors from the last rejected advance.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    #[must_use]
    pub fn error_for(&self, error: ValidationError) -> Option<ValidationError> {
        self.errors.iter().copied().find(|e| *e == error)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn identity_filled() -> OnboardingFlow {
        let mut flow = OnboardingFlow::new();
        flow.set_name("Anna");
        flow.set_phone("9991234567");
        flow
    }

    fn complete(mut flow: OnboardingFlow) -> UserPreferences {
        loop {
            match flow.advance().unwrap() {
                Advance::Next(_) => {}
                Advance::Complete(preferences) => return preferences,
            }
        }
    }

    #[test]
    fn test_empty_identity_reports_both_fields() {
        let mut flow = OnboardingFlow::new();
        assert!(!flow.can_advance());

        let errors = flow.advance().unwrap_err();
        assert_eq!(
            errors.as_slice(),
            &[ValidationError::EmptyName, ValidationError::InvalidPhone]
        );
        assert_eq!(flow.step(), Step::Identity);
        assert_eq!(flow.errors().len(), 2);
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let mut flow = identity_filled();
        flow.set_name("   ");
        let errors = flow.advance().unwrap_err();
        assert_eq!(errors.as_slice(), &[ValidationError::EmptyName]);
    }

    #[test]
    fn test_nine_digits_rejected() {
        let mut flow = identity_filled();
        flow.set_phone("999123456");
        let errors = flow.advance().unwrap_err();
        assert_eq!(errors.as_slice(), &[ValidationError::InvalidPhone]);
    }

    #[test]
    fn test_ten_digits_and_name_advance() {
        let mut flow = identity_filled();
        assert!(flow.can_advance());
        assert_eq!(flow.advance().unwrap(), Advance::Next(Step::Cuisines));
        assert!(flow.errors().is_empty());
    }

    #[test]
    fn test_errors_clear_after_fix() {
        let mut flow = OnboardingFlow::new();
        flow.advance().unwrap_err();
        flow.set_name("Anna");
        flow.set_phone("999 123 45 67");
        flow.advance().unwrap();
        assert!(flow.errors().is_empty());
    }

    #[test]
    fn test_phone_input_is_clamped_and_prefixed() {
        let mut flow = OnboardingFlow::new();
        flow.set_name("Anna");
        flow.set_phone("89991234567");
        assert_eq!(flow.phone_digits(), "9991234567");

        let preferences = complete(flow);
        assert_eq!(preferences.phone.as_str(), "+79991234567");
    }

    #[test]
    fn test_name_is_truncated() {
        let mut flow = OnboardingFlow::new();
        flow.set_name(&"я".repeat(40));
        assert_eq!(flow.name().chars().count(), NAME_MAX_CHARS);
    }

    #[test]
    fn test_later_steps_have_no_validation() {
        let mut flow = identity_filled();
        flow.advance().unwrap();
        assert!(flow.can_advance());
        assert_eq!(flow.advance().unwrap(), Advance::Next(Step::Frequency));
        assert_eq!(flow.advance().unwrap(), Advance::Next(Step::Budget));
    }

    #[test]
    fn test_toggle_cuisine() {
        let mut flow = OnboardingFlow::new();
        assert!(flow.toggle_cuisine(Cuisine::Japanese));
        assert!(flow.toggle_cuisine(Cuisine::Russian));
        assert!(!flow.toggle_cuisine(Cuisine::Japanese));
        assert_eq!(
            flow.cuisines().iter().copied().collect::<Vec<_>>(),
            vec![Cuisine::Russian]
        );
    }

    #[test]
    fn test_sliders_clamp() {
        let mut flow = OnboardingFlow::new();
        flow.set_frequency(140);
        flow.set_budget_min(10);
        flow.set_budget_max(99_999);
        assert_eq!(flow.frequency().value(), 100);
        assert_eq!(flow.budget_sliders(), (100, 5000));
    }

    #[test]
    fn test_inverted_budget_accepted_and_normalized() {
        let mut flow = identity_filled();
        flow.set_budget_min(3000);
        flow.set_budget_max(1000);
        assert_eq!(flow.budget_sliders(), (3000, 1000));

        let preferences = complete(flow);
        assert_eq!(preferences.budget.min(), 1000);
        assert_eq!(preferences.budget.max(), 3000);
    }

    #[test]
    fn test_complete_packages_everything() {
        let mut flow = identity_filled();
        flow.toggle_cuisine(Cuisine::Italian);
        flow.set_frequency(80);

        let preferences = complete(flow);
        assert_eq!(preferences.name, "Anna");
        assert!(preferences.cuisines.contains(&Cuisine::Italian));
        assert_eq!(preferences.frequency.value(), 80);
        assert_eq!(preferences.budget, BudgetRange::new(500, 2000));
    }
}
