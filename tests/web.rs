//! Pruebas en navegador del host web (`wasm-pack test --headless --chrome`)

#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use cargoline_shell::dom::web::{document, window, WebHost};
use cargoline_shell::dom::{Host, PageElement};
use cargoline_shell::{create_shell_with_config, HistoryMode, PageInitializers, Router, ShellConfig};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn add_page(route: &str) {
    let document = document().expect("document");
    let section = document.create_element("section").expect("section");
    section.set_attribute("data-page", route).expect("attr");
    document.body().expect("body").append_child(&section).expect("append");
}

#[wasm_bindgen_test]
fn web_host_toggles_classes_and_attributes() {
    add_page("probe");
    let host = WebHost::new().expect("host");
    let page = host.query_selector("[data-page=\"probe\"]").expect("page");

    page.add_class("hidden").unwrap();
    assert!(page.has_class("hidden"));
    page.remove_class("hidden").unwrap();
    assert!(!page.has_class("hidden"));

    page.set_attribute("aria-hidden", "true").unwrap();
    assert_eq!(page.attribute("aria-hidden").as_deref(), Some("true"));
    page.remove_attribute("aria-hidden").unwrap();
    assert!(!page.has_attribute("aria-hidden"));

    page.detach();
    assert!(!page.is_attached());
}

#[wasm_bindgen_test]
fn router_writes_the_location_hash() {
    add_page("home");
    add_page("cargo-cat");
    let host = Rc::new(WebHost::new().expect("host"));
    let router = Router::mount(host.clone(), PageInitializers::new(), &ShellConfig::default())
        .expect("router");

    router.navigate("cargo-cat", HistoryMode::Push);

    assert_eq!(host.location_hash(), "#/cargo-cat");
    assert_eq!(router.current_route().unwrap(), "cargo-cat");
}

#[wasm_bindgen_test]
fn page_registered_before_mount_runs_on_boot() {
    add_page("home");
    add_page("deep-link");
    let window = window().expect("window");
    window.location().set_hash("#/deep-link").expect("hash");

    let handle = create_shell_with_config(r#"{"enable_logging":false}"#).expect("shell");
    assert!(!handle.is_mounted());
    handle.register_page(
        "deep-link".to_string(),
        js_sys::Function::new_no_args("window.deepLinkCalls = (window.deepLinkCalls || 0) + 1;"),
    );

    assert!(handle.mount());

    let calls = js_sys::Reflect::get(&window, &JsValue::from_str("deepLinkCalls")).expect("calls");
    assert_eq!(calls.as_f64(), Some(1.0));
    assert_eq!(handle.current_route().as_deref(), Some("deep-link"));
}
