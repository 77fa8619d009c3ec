//! End-to-end page loading through the event handler, with canned API bodies
//! standing in for the host's web requests.

use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use zellidex::catalog::{FetchRequest, RequestTag, Stage};
use zellidex::ui::{render_to_string, LoadMoreState};
use zellidex::{handle_event, initialize, Action, AppState, Config, Event};

const API: &str = "http://dex.test/api/v2/pokemon";

fn config() -> Config {
    Config::from_zellij(&BTreeMap::from([
        ("api_url".to_string(), API.to_string()),
        ("page_size".to_string(), "3".to_string()),
    ]))
}

fn listing(names: &[&str], next: Option<&str>) -> Vec<u8> {
    let results: Vec<_> = names
        .iter()
        .map(|name| serde_json::json!({ "name": name, "url": format!("{API}/{name}/") }))
        .collect();
    serde_json::json!({ "count": 1000, "next": next, "previous": null, "results": results })
        .to_string()
        .into_bytes()
}

fn detail(name: &str, types: &[&str]) -> Vec<u8> {
    let types: Vec<_> = types
        .iter()
        .enumerate()
        .map(|(i, t)| serde_json::json!({ "slot": i + 1, "type": { "name": t, "url": "" } }))
        .collect();
    let moves: Vec<_> = (0..15)
        .map(|i| serde_json::json!({ "move": { "name": format!("move-{i}"), "url": "" } }))
        .collect();
    serde_json::json!({
        "id": 1,
        "name": name,
        "weight": 69,
        "height": 7,
        "sprites": { "front_default": format!("https://img.test/{name}.png"), "back_default": null },
        "types": types,
        "moves": moves,
        "abilities": []
    })
    .to_string()
    .into_bytes()
}

fn fetches(actions: Vec<Action>) -> Vec<FetchRequest> {
    actions
        .into_iter()
        .map(|action| match action {
            Action::Fetch(request) => request,
            other => panic!("unexpected action {other:?}"),
        })
        .collect()
}

fn respond(state: &mut AppState, tag: RequestTag, status: u16, body: Vec<u8>) -> (bool, Vec<Action>) {
    // Round-trip the tag through the host context like the plugin shim does.
    let tag = RequestTag::from_context(&tag.to_context()).unwrap();
    handle_event(state, &Event::WebResponse { tag, status, body }).unwrap()
}

fn names(state: &AppState) -> Vec<&str> {
    state.visible.iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn first_page_loads_in_listing_order_despite_out_of_order_details() {
    let mut state = initialize(&config());

    let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
    let listing_req = fetches(actions).remove(0);
    assert_eq!(listing_req.url, format!("{API}?limit=3"));

    let (render, actions) = respond(
        &mut state,
        listing_req.tag,
        200,
        listing(&["bulbasaur", "charmander", "squirtle"], Some("page-2")),
    );
    assert!(!render);
    let details = fetches(actions);
    assert_eq!(details.len(), 3);
    assert_eq!(details[1].url, format!("{API}/charmander/"));

    let bodies = [
        detail("bulbasaur", &["grass", "poison"]),
        detail("charmander", &["fire"]),
        detail("squirtle", &["water"]),
    ];
    for index in [2, 0, 1] {
        respond(&mut state, details[index].tag, 200, bodies[index].clone());
    }

    assert_eq!(names(&state), vec!["bulbasaur", "charmander", "squirtle"]);
    assert_eq!(state.catalog.cursor(), Some("page-2"));
    assert_eq!(state.visible[0].moves.len(), 10);
    assert_eq!(state.load_more_state(), LoadMoreState::Available);

    let frame = render_to_string(&state, 30, 80);
    assert!(frame.contains("BULBASAUR"));
    assert!(frame.contains("Zellidex (3)"));
}

#[test]
fn failed_detail_discards_page_and_retry_uses_same_cursor() {
    let mut state = initialize(&config());
    let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
    let listing_req = fetches(actions).remove(0);

    let (_, actions) = respond(&mut state, listing_req.tag, 200, listing(&["a", "b", "c"], Some("page-2")));
    let details = fetches(actions);

    respond(&mut state, details[0].tag, 200, detail("a", &["normal"]));
    let (render, _) = respond(&mut state, details[1].tag, 500, b"Internal Server Error".to_vec());
    assert!(render);

    // Late arrival for the aborted page changes nothing.
    let (render, actions) = respond(&mut state, details[2].tag, 200, detail("c", &["normal"]));
    assert!(!render);
    assert!(actions.is_empty());

    assert!(state.catalog.is_empty());
    assert_eq!(state.load_more_state(), LoadMoreState::Available);

    let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
    let retry = fetches(actions).remove(0);
    assert_eq!(retry.url, listing_req.url);
    assert_ne!(retry.tag.load_id, listing_req.tag.load_id);
    assert_eq!(retry.tag.stage, Stage::Listing);
}

fn load_page(state: &mut AppState, entries: &[(&str, &str)], next: Option<&str>) {
    let (_, actions) = handle_event(state, &Event::LoadMore).unwrap();
    let listing_req = fetches(actions).remove(0);
    let names: Vec<&str> = entries.iter().map(|(name, _)| *name).collect();
    let (_, actions) = respond(state, listing_req.tag, 200, listing(&names, next));
    for (request, (name, kind)) in fetches(actions).into_iter().zip(entries) {
        respond(state, request.tag, 200, detail(name, &[*kind]));
    }
}

#[test]
fn active_filter_survives_load_more() {
    let mut state = initialize(&config());

    load_page(&mut state, &[("charmander", "fire"), ("squirtle", "water")], Some("page-2"));
    handle_event(&mut state, &Event::SelectCategory("fire".to_string())).unwrap();
    assert_eq!(names(&state), vec!["charmander"]);

    load_page(&mut state, &[("vulpix", "fire"), ("psyduck", "water")], None);
    assert_eq!(names(&state), vec!["charmander", "vulpix"]);
    assert_eq!(state.catalog.len(), 4);

    // Exhausted: the affordance is gone and further triggers do nothing.
    assert_eq!(state.load_more_state(), LoadMoreState::Hidden);
    let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
    assert!(actions.is_empty());
}

#[test]
fn second_trigger_while_loading_is_ignored() {
    let mut state = initialize(&config());
    let (_, first) = handle_event(&mut state, &Event::LoadMore).unwrap();
    let (_, second) = handle_event(&mut state, &Event::LoadMore).unwrap();

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(state.load_more_state(), LoadMoreState::Loading);
}

#[test]
fn malformed_listing_is_a_fetch_failure() {
    let mut state = initialize(&config());
    let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
    let listing_req = fetches(actions).remove(0);

    let (render, actions) = respond(&mut state, listing_req.tag, 200, b"<html>rate limited</html>".to_vec());
    assert!(render);
    assert!(actions.is_empty());
    assert!(!state.fetcher.is_loading());
    assert_eq!(state.catalog.cursor(), Some(listing_req.url.as_str()));
}

#[test]
fn search_then_detail_view() {
    let mut state = initialize(&config());
    let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
    let listing_req = fetches(actions).remove(0);
    let (_, actions) = respond(&mut state, listing_req.tag, 200, listing(&["pikachu", "raichu"], None));
    let details = fetches(actions);
    respond(&mut state, details[0].tag, 200, detail("pikachu", &["electric"]));
    respond(&mut state, details[1].tag, 200, detail("raichu", &["electric"]));

    handle_event(&mut state, &Event::SearchMode).unwrap();
    for c in "RAI".chars() {
        handle_event(&mut state, &Event::Char(c)).unwrap();
    }
    assert_eq!(names(&state), vec!["raichu"]);

    handle_event(&mut state, &Event::FocusResults).unwrap();
    handle_event(&mut state, &Event::OpenDetail).unwrap();

    let frame = render_to_string(&state, 30, 80);
    assert!(frame.contains("Weight: 6.9 kg"));
    assert!(frame.contains("Height: 0.7 m"));
    assert!(frame.contains("move-9"));
    assert!(!frame.contains("move-10"));

    handle_event(&mut state, &Event::CloseDetail).unwrap();
    assert!(!state.modal.is_shown());
}
