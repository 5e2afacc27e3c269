use crate::utils::sanitize_in_place;
use loan_calculator::normalize::{format_on_blur, FieldKind};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Holds the state and callbacks for one numeric loan field.
#[derive(Clone, PartialEq)]
pub struct LoanField {
    /// The current text content of the input field.
    pub text: String,
    /// Callback for the text input's `oninput` event. Drops invalid characters
    /// and stores the sanitized text.
    pub on_input: Callback<InputEvent>,
    /// Callback for `onblur`: re-renders the text in its display format.
    pub on_blur: Callback<FocusEvent>,
}

/// Custom hook to manage state for a sanitized, blur-formatted input field.
#[hook]
pub fn use_loan_field(kind: FieldKind, initial_text: String) -> LoanField {
    let text_state_handle: UseStateHandle<String> = use_state(move || initial_text);

    let on_input = {
        let text_setter = text_state_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(sanitize_in_place(&input));
        })
    };

    let on_blur = {
        let text_setter = text_state_handle.clone();
        Callback::from(move |e: FocusEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(formatted) = format_on_blur(kind, &input.value()) {
                text_setter.set(formatted);
            }
        })
    };

    LoanField {
        text: (*text_state_handle).clone(),
        on_input,
        on_blur,
    }
}
