use askama::Template;
use u_cook_core::{BudgetRange, Cuisine};

use super::mark;
use crate::error::Result;
use crate::filters;
use crate::onboarding::{OnboardingFlow, Step, ValidationError};
use crate::session::Session;

struct CuisineOption {
    cuisine: Cuisine,
    mark: char,
}

#[derive(Template)]
#[template(path = "onboarding.txt")]
struct OnboardingTemplate<'a> {
    flow: &'a OnboardingFlow,
    step: Step,
    step_number: usize,
    step_count: usize,
    name_error: Option<ValidationError>,
    phone_error: Option<ValidationError>,
    cuisines: Vec<CuisineOption>,
    budget_min: u32,
    budget_max: u32,
    average_check: u32,
    can_advance: bool,
}

pub(super) fn render(session: &Session) -> Result<String> {
    let Some(flow) = session.onboarding() else {
        return Ok(String::new());
    };
    let step = flow.step();
    let (budget_min, budget_max) = flow.budget_sliders();

    let template = OnboardingTemplate {
        flow,
        step,
        step_number: step.index() + 1,
        step_count: Step::COUNT,
        name_error: flow.error_for(ValidationError::EmptyName),
        phone_error: flow.error_for(ValidationError::InvalidPhone),
        cuisines: Cuisine::ALL
            .into_iter()
            .map(|cuisine| CuisineOption {
                cuisine,
                mark: mark(flow.cuisines().contains(&cuisine)),
            })
            .collect(),
        budget_min,
        budget_max,
        average_check: BudgetRange::new(budget_min, budget_max).average_check(),
        can_advance: flow.can_advance(),
    };
    Ok(template.render()?)
}
