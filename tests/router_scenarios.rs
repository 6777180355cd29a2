//! Escenarios de punta a punta del shell sobre el documento en memoria:
//! router + navegación declarativa + loader, montados como en el arranque web.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cargoline_shell::dom::memory::{HashWrite, MemoryElement, MemoryHost};
use cargoline_shell::dom::{Host, PageElement};
use cargoline_shell::loader;
use cargoline_shell::routing::hash;
use cargoline_shell::{
    HistoryMode, NavigationDispatcher, PageInitializers, Router, Shell, ShellConfig, ShellError,
};

const ROUTES: [&str; 4] = ["home", "cargo-cat", "cargo-route", "my-trips"];

struct Booted {
    host: Rc<MemoryHost>,
    router: Rc<Router<MemoryHost>>,
    initializers: PageInitializers,
    nav: MemoryElement,
}

fn boot_at(hash: &str) -> Booted {
    let host = Rc::new(MemoryHost::with_pages(&ROUTES));
    host.append(MemoryElement::new("div").with_attr("id", "route-progress"));
    host.append(MemoryElement::new("div").with_attr("id", "app-loader"));
    let nav = host.append(MemoryElement::new("nav").with_attr("data-visible-pages", "home,my-trips"));
    if !hash.is_empty() {
        host.set_hash(hash);
        host.dispatch_hash_changes();
    }

    let config = ShellConfig::default();
    let initializers = PageInitializers::new();
    let router = Router::mount(host.clone(), initializers.clone(), &config).expect("router");
    NavigationDispatcher::new(host.clone(), Some(router.clone()), &config).install();
    loader::schedule_hide(&host, &config.loader);

    Booted {
        host,
        router,
        initializers,
        nav,
    }
}

fn visible_pages(host: &MemoryHost) -> Vec<String> {
    ROUTES
        .iter()
        .filter_map(|route| host.page(route))
        .filter(|page| !page.has_class("hidden") && page.attribute("aria-hidden").is_none())
        .filter_map(|page| page.attribute("data-page"))
        .collect()
}

#[test]
fn empty_hash_boots_into_home() {
    let shell = boot_at("");
    assert_eq!(shell.router.current_route().unwrap(), "home");
    assert_eq!(visible_pages(&shell.host), vec!["home"]);
    assert_eq!(shell.nav.display(), "");
}

#[test]
fn navigate_writes_encoded_hash_and_shows_page() {
    let shell = boot_at("");
    let route = shell.router.navigate("cargo-cat", HistoryMode::Push);

    assert_eq!(route, "cargo-cat");
    assert_eq!(shell.host.location_hash(), "#/cargo-cat");
    assert_eq!(visible_pages(&shell.host), vec!["cargo-cat"]);
    assert_eq!(shell.nav.display(), "none");

    // El hashchange que llega después no cambia nada
    let scrolls = shell.host.scroll_resets();
    shell.host.dispatch_hash_changes();
    assert_eq!(shell.router.current_route().unwrap(), "cargo-cat");
    assert_eq!(shell.host.scroll_resets(), scrolls);
}

#[test]
fn unknown_route_falls_back_to_home_hash() {
    let shell = boot_at("#/cargo-cat");
    let route = shell.router.navigate("not-a-real-route", HistoryMode::Push);

    assert_eq!(route, "home");
    assert_eq!(shell.host.location_hash(), "#/home");
    assert_eq!(visible_pages(&shell.host), vec!["home"]);
}

#[test]
fn replace_mode_is_passed_to_the_host() {
    let shell = boot_at("");
    shell.router.navigate("my-trips", HistoryMode::Replace);
    assert_eq!(
        shell.host.hash_writes().last(),
        Some(&HashWrite {
            mode: HistoryMode::Replace,
            hash: "#/my-trips".to_string(),
        })
    );
}

#[test]
fn user_edited_hash_is_followed() {
    let shell = boot_at("");
    shell.host.set_hash("#cargo-route");
    shell.host.dispatch_hash_changes();
    assert_eq!(shell.router.current_route().unwrap(), "cargo-route");

    shell.host.set_hash("#/cargo-cat?x=1");
    shell.host.dispatch_hash_changes();
    assert_eq!(shell.router.current_route().unwrap(), "cargo-cat");

    shell.host.set_hash("#/unknown-route");
    shell.host.dispatch_hash_changes();
    assert_eq!(shell.router.current_route().unwrap(), "home");
}

#[test]
fn every_known_route_survives_the_hash_round_trip() {
    let shell = boot_at("");
    for route in shell.router.registry().routes() {
        let encoded = hash::encode(route);
        assert_eq!(hash::decode(&encoded, shell.router.registry()), *route);
    }
}

#[test]
fn declarative_links_drive_the_router() {
    let shell = boot_at("");
    let card = shell.host.append(
        MemoryElement::new("div")
            .with_attr("role", "button")
            .with_attr("data-route", "cargo-route"),
    );
    let link = shell
        .host
        .append(MemoryElement::new("a").with_attr("data-href", "#/my-trips"));

    assert!(shell.host.press_key("Enter", &card));
    assert_eq!(shell.router.current_route().unwrap(), "cargo-route");

    assert!(shell.host.click(&link));
    assert_eq!(shell.router.current_route().unwrap(), "my-trips");
    assert_eq!(shell.host.location_hash(), "#/my-trips");
    assert!(shell.host.assigned_locations().is_empty());
}

#[test]
fn late_initializer_runs_on_next_activation() {
    let shell = boot_at("#/cargo-cat");
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    shell.initializers.register("cargo-cat", move || {
        counter.set(counter.get() + 1);
        Ok(())
    });

    // Ya activa: no se re-ejecuta
    shell.router.navigate("cargo-cat", HistoryMode::Push);
    assert_eq!(calls.get(), 0);

    shell.router.navigate("home", HistoryMode::Push);
    shell.router.navigate("cargo-cat", HistoryMode::Push);
    assert_eq!(calls.get(), 1);
}

#[test]
fn failing_initializer_still_activates_the_page() {
    let shell = boot_at("");
    shell
        .initializers
        .register("cargo-route", || Err(ShellError::Dom("sin slider".into())));

    let route = shell.router.navigate("cargo-route", HistoryMode::Push);

    assert_eq!(route, "cargo-route");
    assert_eq!(shell.router.current_route().unwrap(), "cargo-route");
    assert_eq!(visible_pages(&shell.host), vec!["cargo-route"]);
}

#[test]
fn initializer_can_redirect() {
    let shell = boot_at("");
    let router = Rc::downgrade(&shell.router);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    shell.initializers.register("cargo-route", move || {
        log.borrow_mut().push("cargo-route");
        if let Some(router) = router.upgrade() {
            router.navigate("my-trips", HistoryMode::Replace);
        }
        Ok(())
    });

    let settled = shell.router.navigate("cargo-route", HistoryMode::Push);

    assert_eq!(settled, "my-trips");
    assert_eq!(*seen.borrow(), vec!["cargo-route"]);
    assert_eq!(shell.router.current_route().unwrap(), "my-trips");
    assert_eq!(visible_pages(&shell.host), vec!["my-trips"]);
    assert_eq!(shell.host.location_hash(), "#/my-trips");
}

#[test]
fn progress_pulse_and_loader_follow_the_clock() {
    let shell = boot_at("");
    let progress = shell.host.element_by_id("route-progress").unwrap();
    assert!(!progress.has_class("is-active"));

    shell.router.navigate("cargo-cat", HistoryMode::Push);
    assert!(progress.has_class("is-active"));

    shell.host.advance_time(280);
    assert!(!progress.has_class("is-active"));

    // 100 ms de arranque + 260 ms de fade
    shell.host.advance_time(100);
    assert!(shell.host.element_by_id("app-loader").is_none());
}

#[test]
fn deep_link_runs_page_registered_before_mount() {
    let host = Rc::new(MemoryHost::with_pages(&ROUTES));
    host.set_hash("#/my-trips");
    host.dispatch_hash_changes();

    let shell = Shell::new(host.clone(), ShellConfig::default());
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    shell.register_page("my-trips", move || {
        counter.set(counter.get() + 1);
        Ok(())
    });

    assert!(shell.mount());

    assert_eq!(calls.get(), 1);
    assert_eq!(shell.current_route().unwrap(), "my-trips");
    assert_eq!(visible_pages(&host), vec!["my-trips"]);
}
