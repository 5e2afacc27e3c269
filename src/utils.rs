use gloo_utils::{document, window};
use loan_calculator::config::{CalculatorSettings, SettingsError, SETTINGS_ELEMENT_ID};
use loan_calculator::normalize::sanitize_numeric_at;
use loan_calculator::RawLoanForm;
use web_sys::{HtmlInputElement, UrlSearchParams};

/// Read page settings from the JSON `<script>` block, if the page has one.
pub fn read_settings() -> Result<CalculatorSettings, SettingsError> {
    match document()
        .get_element_by_id(SETTINGS_ELEMENT_ID)
        .and_then(|el| el.text_content())
    {
        Some(json) if !json.trim().is_empty() => CalculatorSettings::from_json(&json),
        _ => Ok(CalculatorSettings::default()),
    }
}

/// Form values for `?property_id=…&amount=…` links coming from a listing.
pub fn prefill_from_location() -> Option<RawLoanForm> {
    let search = window().location().search().ok()?;
    let params = UrlSearchParams::new_with_str(&search).ok()?;
    params.get("property_id")?;
    let amount = params.get("amount")?.trim().parse::<f64>().ok()?;
    if !amount.is_finite() || amount <= 0.0 {
        log::warn!("Ignoring prefill amount {}", amount);
        return None;
    }
    log::info!("Prefilling calculator for a property priced at {}", amount);
    Some(RawLoanForm::prefill_for_property(amount))
}

/// Sanitize the input's text in place, keeping the caret where the user had it.
/// Returns the sanitized text.
pub fn sanitize_in_place(input: &HtmlInputElement) -> String {
    let raw = input.value();
    let caret = input
        .selection_start()
        .ok()
        .flatten()
        .unwrap_or(raw.encode_utf16().count() as u32);

    let sanitized = sanitize_numeric_at(&raw, caret);
    if sanitized.value != raw {
        input.set_value(&sanitized.value);
        // not every input type supports a selection
        let _ = input.set_selection_range(sanitized.cursor, sanitized.cursor);
    }
    sanitized.value
}
