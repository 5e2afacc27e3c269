//! JavaScript interop for Chart.js visualization.
//! Provides Rust bindings to chart helper functions defined in chart_helpers.js.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/chart_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = initLoanChart)]
    fn init_loan_chart(element_id: &str) -> bool;

    #[wasm_bindgen(js_name = destroyLoanChart)]
    pub fn destroy_loan_chart(element_id: &str);
}

/// Draw the principal/interest doughnut on the canvas `element_id`, reading
/// the values from its `data-principal` / `data-interest` attributes.
pub fn render_breakdown_chart(element_id: &str) {
    if !init_loan_chart(element_id) {
        log::warn!("Chart for #{} was not drawn (Chart.js missing or no data)", element_id);
    }
}
