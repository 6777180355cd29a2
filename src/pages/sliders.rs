// ============================================================================
// SLIDERS - Páginas cargo-weight y cargo-val
// ============================================================================
// Sin markup no hay nada que hacer: salir sin error. Los listeners se ponen
// una sola vez por página (marcador `data-bound`).
// ============================================================================

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement};

use super::{leading_integer, BOUND_MARKER, CARGO_VALUE, CARGO_WEIGHT};
use crate::dom::events::{on_click, on_input};
use crate::dom::web::document;
use crate::error::ShellError;

const SELECTED_CLASSES: [&str; 2] = ["border-primary", "bg-primary/10"];

fn page(route: &str) -> Option<Element> {
    document()?
        .query_selector(&format!("[data-page=\"{}\"]", route))
        .ok()
        .flatten()
}

fn input_in(page: &Element, selector: &str) -> Option<HtmlInputElement> {
    page.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

/// Marca la página; false si ya estaba marcada
fn claim(page: &Element) -> Result<bool, ShellError> {
    if page.has_attribute(BOUND_MARKER) {
        return Ok(false);
    }
    page.set_attribute(BOUND_MARKER, "true")
        .map_err(|e| ShellError::from_js(&e))?;
    Ok(true)
}

pub fn init_weight_slider() -> Result<(), ShellError> {
    let Some(page) = page(CARGO_WEIGHT) else {
        return Ok(());
    };
    let slider = input_in(&page, "input[type=\"range\"]");
    let display = page.query_selector("span.text-7xl").ok().flatten();
    let (Some(slider), Some(display)) = (slider, display) else {
        return Ok(());
    };

    display.set_text_content(Some(&slider.value()));
    if !claim(&page)? {
        return Ok(());
    }

    let source = slider.clone();
    on_input(&slider, move |_: Event| {
        display.set_text_content(Some(&source.value()));
    })
}

pub fn init_value_slider() -> Result<(), ShellError> {
    let Some(page) = page(CARGO_VALUE) else {
        return Ok(());
    };
    let slider = input_in(&page, "input[type=\"range\"]");
    let display = input_in(&page, "input[inputmode=\"numeric\"]");
    let (Some(slider), Some(display)) = (slider, display) else {
        return Ok(());
    };

    display.set_value(&slider.value());
    if !claim(&page)? {
        return Ok(());
    }

    let (from, to) = (slider.clone(), display.clone());
    on_input(&slider, move |_: Event| to.set_value(&from.value()))?;
    let (from, to) = (display.clone(), slider.clone());
    on_input(&display, move |_: Event| to.set_value(&from.value()))?;

    let buttons = page
        .query_selector_all("[type=\"button\"]")
        .map_err(|e| ShellError::from_js(&e))?;
    let buttons: Vec<Element> = (0..buttons.length())
        .filter_map(|i| buttons.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect();

    for button in &buttons {
        let Some(amount) = button.text_content().as_deref().and_then(leading_integer) else {
            continue;
        };
        let amount = amount.to_string();
        let (slider, display) = (slider.clone(), display.clone());
        let (group, selected) = (buttons.clone(), button.clone());
        on_click(button, move |_: Event| {
            display.set_value(&amount);
            slider.set_value(&amount);
            for other in &group {
                for class in SELECTED_CLASSES {
                    let _ = other.class_list().remove_1(class);
                }
            }
            for class in SELECTED_CLASSES {
                let _ = selected.class_list().add_1(class);
            }
        })?;
    }

    log::debug!("🎚️ [PAGES] Slider de valor listo");
    Ok(())
}
