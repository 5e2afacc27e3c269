//! Main module for the loan calculator page using Yew.
//! Wires field hooks, the debounced EMI preview and submission handling.

use gloo_timers::callback::Timeout;
use loan_calculator::advice::{rate_advice, term_advice};
use loan_calculator::config::{CalculatorSettings, CHART_ELEMENT_ID, CURRENCY_SYMBOL};
use loan_calculator::normalize::FieldKind;
use loan_calculator::validation::FieldOutcome;
use loan_calculator::{
    calculate_submission, validate_form, CalculationError, Debouncer, Field, LoanBreakdown,
    PreviewLabel, RawLoanForm, ValidationLimits, ValidationOutcome,
};
use std::rc::Rc;
use yew::prelude::*;

mod chart;
mod components;
mod hooks;
mod utils;

use chart::{destroy_loan_chart, render_breakdown_chart};
use components::{render_results, LoanInputField, SubmitButton};
use hooks::use_loan_field;

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Message to show under `field`, if the last validation pass rejected it.
fn field_error(outcome: &Option<ValidationOutcome>, field: Field) -> Option<String> {
    outcome
        .as_ref()
        .and_then(|o| o.get(field))
        .and_then(FieldOutcome::message)
}

// ──────────────────────────────────────────────────────────────────────────────

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub settings: Rc<CalculatorSettings>,
}

/// Loan calculator form, live preview and results.
#[function_component(LoanCalculator)]
fn loan_calculator(props: &AppProps) -> Html {
    let settings = props.settings.clone();
    let prefill = use_memo((), |_| utils::prefill_from_location().unwrap_or_default());

    let amount = use_loan_field(FieldKind::Amount, prefill.amount.clone());
    let rate = use_loan_field(FieldKind::Rate, prefill.rate.clone());
    let term = use_loan_field(FieldKind::Term, prefill.term.clone());
    let down_payment = use_loan_field(FieldKind::Amount, prefill.down_payment.clone());

    let preview = use_state(PreviewLabel::default);
    let validation = use_state(|| None::<ValidationOutcome>);
    let results = use_state(|| None::<Rc<LoanBreakdown>>);
    let is_loading = use_state(|| false);

    // One debouncer per mounted form; dropping it cancels a pending preview
    let debouncer = {
        let preview = preview.clone();
        let delay_ms = settings.debounce_ms;
        use_memo((), move |_| {
            let debouncer: Debouncer<RawLoanForm, Timeout> =
                Debouncer::new(delay_ms, move |form: RawLoanForm| {
                    preview.set(PreviewLabel::from_form(&form));
                });
            debouncer
        })
    };

    let form = RawLoanForm {
        amount: amount.text.clone(),
        rate: rate.text.clone(),
        term: term.text.clone(),
        down_payment: down_payment.text.clone(),
    };

    // Every change to the form text restarts the quiet period
    {
        let debouncer = debouncer.clone();
        use_effect_with(form.clone(), move |form| {
            debouncer.trigger(form.clone());
            || ()
        });
    }

    // (re-)draw the chart whenever a new breakdown is rendered
    {
        let breakdown = (*results).clone();
        use_effect_with(breakdown, move |breakdown| {
            let drawn = breakdown.is_some();
            if drawn {
                render_breakdown_chart(CHART_ELEMENT_ID);
            }
            move || {
                if drawn {
                    destroy_loan_chart(CHART_ELEMENT_ID);
                }
            }
        });
    }

    let onsubmit = {
        let form = form.clone();
        let settings = settings.clone();
        let validation = validation.clone();
        let results = results.clone();
        let is_loading = is_loading.clone();
        Callback::from(move |e: SubmitEvent| {
            let limits = ValidationLimits::from(&*settings);
            let outcome = validate_form(&form, &limits);
            let valid = outcome.is_valid();
            validation.set(Some(outcome));

            if !valid {
                e.prevent_default();
                return;
            }

            if settings.form_action().is_some() {
                // let the browser post the form
                is_loading.set(true);
                return;
            }

            e.prevent_default();
            match calculate_submission(&form, &limits) {
                Ok(breakdown) => results.set(Some(breakdown)),
                Err(CalculationError::Invalid(outcome)) => validation.set(Some(outcome)),
                Err(err) => {
                    log::warn!("Could not calculate loan: {}", err);
                    results.set(None);
                }
            }
        })
    };

    let action = settings
        .form_action()
        .map(|a| AttrValue::from(a.to_string()));
    let rupee = AttrValue::from(CURRENCY_SYMBOL);

    html! {
        <div class="container loan-calculator">
            <h1>{ "Home Loan EMI Calculator" }</h1>
            <form id="loanForm" method="post" action={action} novalidate=true onsubmit={onsubmit}>
                <LoanInputField
                    id="loanAmount"
                    name="amount"
                    label="Loan Amount"
                    placeholder="e.g. 25,00,000"
                    prefix={Some(rupee.clone())}
                    text={amount.text.clone()}
                    error={field_error(&validation, Field::LoanAmount)}
                    oninput={amount.on_input.clone()}
                    onblur={amount.on_blur.clone()}
                />
                <LoanInputField
                    id="downPayment"
                    name="down_payment"
                    label="Down Payment (optional)"
                    placeholder="e.g. 5,00,000"
                    prefix={Some(rupee)}
                    text={down_payment.text.clone()}
                    error={field_error(&validation, Field::DownPayment)}
                    oninput={down_payment.on_input.clone()}
                    onblur={down_payment.on_blur.clone()}
                />
                <LoanInputField
                    id="interestRate"
                    name="rate"
                    label="Interest Rate (% p.a.)"
                    placeholder="e.g. 8.50"
                    text={rate.text.clone()}
                    error={field_error(&validation, Field::InterestRate)}
                    advice={rate_advice(&rate.text)}
                    oninput={rate.on_input.clone()}
                    onblur={rate.on_blur.clone()}
                />
                <LoanInputField
                    id="loanTerm"
                    name="tenure"
                    label="Loan Term (years)"
                    placeholder="e.g. 20"
                    text={term.text.clone()}
                    error={field_error(&validation, Field::LoanTerm)}
                    advice={term_advice(&term.text)}
                    oninput={term.on_input.clone()}
                    onblur={term.on_blur.clone()}
                />
                <SubmitButton label={*preview} loading={*is_loading} />
            </form>

            // Results section
            <div class="results-area">
                if let Some(breakdown) = &*results {
                    { render_results(breakdown) }
                }
            </div>
        </div>
    }
}

/// App wrapper passing page settings down to the calculator.
#[function_component]
pub fn App(props: &AppProps) -> Html {
    html! {
        <LoanCalculator settings={props.settings.clone()} />
    }
}

/// Entry point: installs the panic hook and logger, then renders the App.
fn main() {
    console_error_panic_hook::set_once();

    let settings = utils::read_settings();
    let level = settings
        .as_ref()
        .ok()
        .and_then(|s| s.level().ok())
        .unwrap_or(log::Level::Info);
    wasm_logger::init(wasm_logger::Config::new(level));

    let settings = settings.unwrap_or_else(|e| {
        log::warn!("Ignoring page settings: {}", e);
        CalculatorSettings::default()
    });
    log::info!("Loan calculator starting (debounce {} ms)", settings.debounce_ms);

    yew::Renderer::<App>::with_props(AppProps {
        settings: Rc::new(settings),
    })
    .render();
}
