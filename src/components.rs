//! Pure Yew view components for the loan calculator UI.
//!
//! This module contains stateless components that render based on props,
//! making them easy to test and reuse.

use loan_calculator::advice::Advice;
use loan_calculator::config::CHART_ELEMENT_ID;
use loan_calculator::format::format_rupees;
use loan_calculator::{AmortizationYear, LoanBreakdown, PreviewLabel};
use yew::prelude::*;

/// Labelled text input with optional error message and helper text.
#[derive(Properties, PartialEq)]
pub struct LoanInputFieldProps {
    pub id: AttrValue,
    pub name: AttrValue,
    pub label: AttrValue,
    pub text: String,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub prefix: Option<AttrValue>,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub advice: Option<Advice>,
    pub oninput: Callback<InputEvent>,
    pub onblur: Callback<FocusEvent>,
}

#[function_component(LoanInputField)]
pub fn loan_input_field(props: &LoanInputFieldProps) -> Html {
    let input_class = classes!("form-control", props.error.is_some().then_some("is-invalid"));

    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{ props.label.to_string() }</label>
            <div class="input-group">
                if let Some(prefix) = &props.prefix {
                    <span class="input-group-text">{ prefix.to_string() }</span>
                }
                <input
                    type="text"
                    inputmode="decimal"
                    autocomplete="off"
                    id={props.id.clone()}
                    name={props.name.clone()}
                    class={input_class}
                    placeholder={props.placeholder.clone()}
                    value={props.text.clone()}
                    oninput={props.oninput.clone()}
                    onblur={props.onblur.clone()}
                />
                if let Some(err) = &props.error {
                    <div class="invalid-feedback d-block">{ err.clone() }</div>
                }
            </div>
            if let Some(advice) = props.advice {
                <small class="helper-text" style={format!("color: {}", advice.color)}>
                    { advice.text }
                </small>
            }
        </div>
    }
}

/// Submit button carrying the live EMI preview.
#[derive(Properties, PartialEq)]
pub struct SubmitButtonProps {
    pub label: PreviewLabel,
    pub loading: bool,
}

#[function_component(SubmitButton)]
pub fn submit_button(props: &SubmitButtonProps) -> Html {
    html! {
        <button type="submit" class="btn btn-primary calculate-btn" disabled={props.loading}>
            <span class="button-text" style={if props.loading { "opacity: 0" } else { "opacity: 1" }}>
                <i class="fas fa-calculator me-2"></i>
                { props.label.to_string() }
            </span>
            <span class={classes!("loading", (!props.loading).then_some("d-none"))}></span>
        </button>
    }
}

/// Renders the breakdown cards, chart canvas and yearly schedule.
pub fn render_results(breakdown: &LoanBreakdown) -> Html {
    let chart = breakdown.chart_data();
    let cards = [
        ("Monthly EMI", format_rupees(breakdown.emi)),
        ("Loan Principal", format_rupees(breakdown.principal)),
        ("Total Interest", format_rupees(breakdown.total_interest)),
        ("Total Payment", format_rupees(breakdown.total_payment)),
    ];

    html! {
        <section id="loanResults" class="results">
            <div class="breakdown-cards">
                { cards.iter().enumerate().map(|(idx, (title, value))| html! {
                    <div class="breakdown-card animate-in" style={format!("--delay: {}", idx)}>
                        <h4>{ *title }</h4>
                        <p class="breakdown-value">{ value.clone() }</p>
                    </div>
                }).collect::<Html>() }
            </div>
            <div class="breakdown-split">
                { format!(
                    "Principal {}% · Interest {}%",
                    breakdown.principal_percent, breakdown.interest_percent
                ) }
            </div>
            <div class="chart-container">
                <canvas
                    id={CHART_ELEMENT_ID}
                    data-principal={chart.principal.to_string()}
                    data-interest={chart.interest.to_string()}
                ></canvas>
            </div>
            <div class="amortization">
                <h3>{ "Yearly Amortization" }</h3>
                <table class="amortization-table">
                    <thead>
                        <tr>
                            <th>{ "Year" }</th>
                            <th>{ "Principal Paid" }</th>
                            <th>{ "Interest Paid" }</th>
                            <th>{ "Total Payment" }</th>
                            <th>{ "Balance" }</th>
                        </tr>
                    </thead>
                    <tbody>
                        { breakdown.schedule.iter().map(render_schedule_row).collect::<Html>() }
                    </tbody>
                </table>
            </div>
        </section>
    }
}

/// Renders a single year of the amortization schedule
fn render_schedule_row(year: &AmortizationYear) -> Html {
    html! {
        <tr>
            <td>{ year.year.to_string() }</td>
            <td>{ format_rupees(year.principal_paid) }</td>
            <td>{ format_rupees(year.interest_paid) }</td>
            <td>{ format_rupees(year.total_payment) }</td>
            <td>{ format_rupees(year.balance) }</td>
        </tr>
    }
}
