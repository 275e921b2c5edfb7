//! Drives the coordinator end to end through `handle_event`, playing the host's part by
//! answering the emitted web requests with canned OMDb payloads.

use proptest::prelude::*;
use reelfinder::app::{AppState, Event, InputMode, NoticeLevel};
use reelfinder::domain::{has_more_pages, KindFilter, SearchSession, PAGE_SIZE};
use reelfinder::omdb::{RequestContext, RequestOp, OmdbClient, DEFAULT_BASE_URL};
use reelfinder::ui::Theme;
use reelfinder::widgets::Direction;
use reelfinder::{handle_event, Action};

fn state() -> AppState {
    AppState::new(OmdbClient::new("test-key", DEFAULT_BASE_URL), Theme::default())
}

fn send(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, &event).unwrap().1
}

fn requests(actions: &[Action]) -> Vec<RequestContext> {
    actions
        .iter()
        .filter_map(|action| match action {
            Action::WebRequest(request) => Some(request.context.clone()),
            _ => None,
        })
        .collect()
}

fn search(state: &mut AppState, query: &str) -> Vec<RequestContext> {
    for c in query.chars() {
        send(state, Event::Char(c));
    }
    requests(&send(state, Event::Submit))
}

fn respond(state: &mut AppState, context: RequestContext, status: u16, body: &str) {
    send(
        state,
        Event::WebResponse {
            status,
            body: body.as_bytes().to_vec(),
            context,
        },
    );
}

fn search_page(prefix: &str, count: usize, total: u64) -> String {
    let items: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"Title":"{prefix} {i}","Year":"20{i:02}","imdbID":"tt{prefix}{i:03}","Type":"movie","Poster":"https://img.example/{i}.jpg"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"Search":[{}],"totalResults":"{total}","Response":"True"}}"#,
        items.join(",")
    )
}

fn detail(id: &str, title: &str) -> String {
    format!(
        r#"{{"Title":"{title}","Year":"2001","imdbID":"{id}","Type":"movie","Plot":"A plot.","Ratings":[],"Response":"True"}}"#
    )
}

fn page_of(context: &RequestContext) -> u32 {
    match &context.op {
        RequestOp::Search { page, .. } => *page,
        RequestOp::Detail { .. } => panic!("expected a search request"),
    }
}

#[test]
fn batman_first_page() {
    let mut s = state();
    let sent = search(&mut s, "batman");
    assert_eq!(sent.len(), 1);
    assert_eq!(page_of(&sent[0]), 1);

    respond(&mut s, sent[0].clone(), 200, &search_page("batman", 10, 587));

    let session = s.session.as_ref().unwrap();
    assert_eq!(session.page, 1);
    assert_eq!(session.items.len(), 10);
    assert!(session.has_more);
    assert_eq!(s.results.items().len(), 10);
    assert!(s.results.has_more());
    assert_eq!(s.input_mode, InputMode::Browsing);
}

#[test]
fn inception_loads_the_remaining_two() {
    let mut s = state();
    let sent = search(&mut s, "inception");
    respond(&mut s, sent[0].clone(), 200, &search_page("inception", 10, 12));
    assert!(s.session.as_ref().unwrap().has_more);

    let more = requests(&send(&mut s, Event::LoadMore));
    assert_eq!(more.len(), 1);
    assert_eq!(page_of(&more[0]), 2);
    assert!(s.results.is_busy());

    respond(&mut s, more[0].clone(), 200, &search_page("inception-b", 2, 12));

    let session = s.session.as_ref().unwrap();
    assert_eq!(session.page, 2);
    assert_eq!(session.items.len(), 12);
    assert!(!session.has_more);
    assert!(!s.results.has_more());
    assert!(!s.results.is_busy());
    // Cursor lands on the first appended card.
    assert_eq!(s.results.selected(), 10);
}

#[test]
fn rapid_load_more_issues_one_request() {
    let mut s = state();
    let sent = search(&mut s, "alien");
    respond(&mut s, sent[0].clone(), 200, &search_page("alien", 10, 45));

    let first = requests(&send(&mut s, Event::LoadMore));
    let second = requests(&send(&mut s, Event::LoadMore));
    assert_eq!(first.len() + second.len(), 1);

    // A submit while the page is loading is dropped too.
    assert!(requests(&send(&mut s, Event::Submit)).is_empty());
    s.input_mode = InputMode::Typing;
    assert!(requests(&send(&mut s, Event::Submit)).is_empty());
}

#[test]
fn load_more_failure_keeps_items_and_allows_retry() {
    let mut s = state();
    let sent = search(&mut s, "heat");
    respond(&mut s, sent[0].clone(), 200, &search_page("heat", 10, 30));

    let more = requests(&send(&mut s, Event::LoadMore));
    respond(&mut s, more[0].clone(), 503, "");

    let session = s.session.as_ref().unwrap();
    assert_eq!(session.items.len(), 10);
    assert_eq!(session.page, 1);
    assert!(session.has_more);
    assert_eq!(s.results.items().len(), 10);
    assert!(!s.results.is_busy());
    let notice = s.notice.as_ref().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("HTTP 503"));

    let retry = requests(&send(&mut s, Event::LoadMore));
    assert_eq!(retry.len(), 1);
    assert_eq!(page_of(&retry[0]), 2);
}

#[test]
fn new_search_replaces_previous_results() {
    let mut s = state();
    let sent = search(&mut s, "heat");
    respond(&mut s, sent[0].clone(), 200, &search_page("heat", 10, 30));

    send(&mut s, Event::FocusSearch);
    for _ in 0.."heat".len() {
        send(&mut s, Event::Backspace);
    }
    let sent = search(&mut s, "ronin");
    assert_eq!(sent.len(), 1);
    respond(&mut s, sent[0].clone(), 200, &search_page("ronin", 3, 3));

    let session = s.session.as_ref().unwrap();
    assert_eq!(session.query, "ronin");
    assert_eq!(session.items.len(), 3);
    assert!(!session.has_more);
    assert!(s.results.items().iter().all(|item| item.title.starts_with("ronin")));
}

#[test]
fn superseded_detail_is_never_shown() {
    let mut s = state();
    let sent = search(&mut s, "tt");
    respond(&mut s, sent[0].clone(), 200, &search_page("x", 2, 2));

    // Open the first card, close it, then open the second.
    let first = requests(&send(&mut s, Event::Activate));
    assert_eq!(first[0].op, RequestOp::Detail { id: "ttx000".into() });
    send(&mut s, Event::Escape);
    send(&mut s, Event::Move(Direction::Right));
    let second = requests(&send(&mut s, Event::Activate));
    assert_eq!(second[0].op, RequestOp::Detail { id: "ttx001".into() });

    // The late answer for the first card is discarded.
    respond(&mut s, first[0].clone(), 200, &detail("ttx000", "First"));
    assert!(s.overlay.is_loading());
    assert_eq!(s.overlay.loading_id(), Some("ttx001"));

    respond(&mut s, second[0].clone(), 200, &detail("ttx001", "Second"));
    assert_eq!(s.overlay.detail().unwrap().title, "Second");

    // Even a repeat of the stale answer does not replace what is shown.
    respond(&mut s, first[0].clone(), 200, &detail("ttx000", "First"));
    assert_eq!(s.overlay.detail().unwrap().id, "ttx001");
}

#[test]
fn clicking_a_card_opens_its_detail() {
    let mut s = state();
    let sent = search(&mut s, "seven");
    respond(&mut s, sent[0].clone(), 200, &search_page("seven", 3, 3));

    // 80 columns: two cards per row, the second starting at column 35.
    let opened = requests(&send(&mut s, Event::Click { line: 8, col: 40 }));
    assert_eq!(opened[0].op, RequestOp::Detail { id: "ttseven001".into() });
    assert_eq!(s.results.selected(), 1);

    // A click outside the overlay box closes it.
    send(&mut s, Event::Click { line: 1, col: 1 });
    assert!(!s.overlay.is_open());
}

#[test]
fn search_not_found_shows_empty_state() {
    let mut s = state();
    let sent = search(&mut s, "qqqqzz");
    respond(
        &mut s,
        sent[0].clone(),
        200,
        r#"{"Response":"False","Error":"Movie not found!"}"#,
    );

    assert!(s.results.items().is_empty());
    assert_eq!(s.input_mode, InputMode::Typing);
    let vm = s.compute_viewmodel(24, 80);
    assert_eq!(
        vm.empty_state.unwrap().message,
        "No movies found. Try a different search term."
    );
    assert_eq!(
        s.notice.as_ref().unwrap().message,
        "Search failed: Movie not found!"
    );
}

#[test]
fn kind_filter_travels_with_the_request() {
    let mut s = state();
    send(&mut s, Event::CycleKind);
    send(&mut s, Event::CycleKind);
    let sent = search(&mut s, "office");
    match &sent[0].op {
        RequestOp::Search { kind_filter, .. } => assert_eq!(*kind_filter, KindFilter::Series),
        RequestOp::Detail { .. } => panic!("expected a search"),
    }
}

#[test]
fn exactly_full_last_page_has_no_tile() {
    let mut s = state();
    let sent = search(&mut s, "exact");
    respond(&mut s, sent[0].clone(), 200, &search_page("exact", 10, 10));
    assert!(!s.results.has_more());
    assert_eq!(s.results.slot_count(), 10);
    assert!(requests(&send(&mut s, Event::LoadMore)).is_empty());
}

proptest! {
    #[test]
    fn blank_queries_never_issue_requests(query in "[ \t]{0,12}") {
        let mut s = state();
        let before: Option<SearchSession> = s.session.clone();
        let sent = search(&mut s, &query);
        prop_assert!(sent.is_empty());
        prop_assert_eq!(&s.session, &before);
        prop_assert!(!s.search_guard.is_pending());
    }

    #[test]
    fn blank_query_keeps_an_existing_session(query in "[ \t]{0,8}") {
        let mut s = state();
        let sent = search(&mut s, "alien");
        respond(&mut s, sent[0].clone(), 200, &search_page("alien", 10, 20));
        let before = s.session.clone();

        send(&mut s, Event::FocusSearch);
        for _ in 0.."alien".len() {
            send(&mut s, Event::Backspace);
        }
        prop_assert!(search(&mut s, &query).is_empty());
        prop_assert_eq!(&s.session, &before);
    }

    #[test]
    fn has_more_is_exclusive_at_the_boundary(page in 1u32..500, extra in 0u64..25) {
        let fetched = u64::from(page) * u64::from(PAGE_SIZE);
        prop_assert!(!has_more_pages(page, fetched));
        prop_assert_eq!(has_more_pages(page, fetched + extra), extra > 0);
    }
}
