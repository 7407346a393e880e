use herald::{
    Args, DispatchError, Filter, FilterError, HeraldError, Message, Publisher, SubscribeError,
    SubscribeOptions, Subscriber,
};
use std::sync::Arc;

mod common;
use common::{SuccessEvent, call_log, classic_listener, entries, structured_listener};

#[derive(Clone, Debug, Message)]
#[herald(name = "PremiumSuccessEvent", extends = SuccessEvent)]
struct PremiumSuccessEvent;

fn names_heard(filter: Filter, events: &[&str]) -> Vec<String> {
    let listener = classic_listener(events);
    let publisher = Publisher::default();
    publisher
        .subscribe(listener.clone(), SubscribeOptions::new().on(filter))
        .unwrap();
    for event in events {
        publisher.broadcast(*event, &Args::new()).unwrap();
    }
    let heard = listener.lock().clone();
    heard
}

#[test]
fn test_name_filters() {
    let events = ["created", "updated", "deleted"];

    assert_eq!(names_heard(Filter::All, &events).len(), 3);
    assert_eq!(names_heard("updated".into(), &events), vec!["updated()"]);
    assert_eq!(
        names_heard(["created", "deleted"].into(), &events),
        vec!["created()", "deleted()"]
    );
    assert_eq!(
        names_heard(Filter::pattern("^(cre|upd)").unwrap(), &events),
        vec!["created()", "updated()"]
    );
}

#[test]
fn test_invalid_pattern() {
    let err = Filter::pattern("(unclosed").unwrap_err();
    assert!(matches!(err, FilterError::Pattern(_)));
    let err: HeraldError = err.into();
    assert!(err.to_string().starts_with("filter error: invalid event pattern"));
}

#[test]
fn test_kind_filter_matches_subtypes() {
    let verify = call_log();
    let publisher = Publisher::default();
    publisher
        .subscribe(
            structured_listener(&verify),
            SubscribeOptions::new().on(Filter::kind::<SuccessEvent>()),
        )
        .unwrap();

    publisher
        .publish(&SuccessEvent {
            message: "hello".into(),
        })
        .unwrap();

    assert_eq!(entries(&verify), vec!["call_success(hello)"]);

    // The subtype passes the filter, but the listener has no handler for it.
    let err = publisher.publish(&PremiumSuccessEvent).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::UnhandledEvent { ref event, .. } if event == "PremiumSuccessEvent"
    ));
}

#[test]
fn test_kind_filter_skips_other_kinds() {
    let verify = call_log();
    let publisher = Publisher::default();
    publisher
        .subscribe(
            structured_listener(&verify),
            SubscribeOptions::new().on(Filter::kind::<PremiumSuccessEvent>()),
        )
        .unwrap();

    publisher
        .publish(&SuccessEvent {
            message: "hello".into(),
        })
        .unwrap();

    assert!(entries(&verify).is_empty());
}

#[test]
fn test_kind_filter_rejected_for_plain_listener() {
    let publisher = Publisher::default();
    let err = publisher
        .subscribe(
            Arc::new(Subscriber::new(())),
            SubscribeOptions::new().on(Filter::kind::<SuccessEvent>()),
        )
        .unwrap_err();

    assert!(matches!(err, SubscribeError::UnsupportedFilter { .. }));
    assert!(publisher.is_empty());
}

#[test]
fn test_name_filter_with_structured_event_is_an_error() {
    let verify = call_log();
    let publisher = Publisher::default();
    publisher
        .subscribe(
            structured_listener(&verify),
            SubscribeOptions::new().on("success"),
        )
        .unwrap();

    let err = publisher
        .publish(&SuccessEvent {
            message: "hello".into(),
        })
        .unwrap_err();

    assert!(matches!(err, DispatchError::UnsupportedFilter { .. }));
    assert!(entries(&verify).is_empty());
}

#[test]
fn test_event_names_are_cleaned_before_matching() {
    let listener = classic_listener(&["order_placed"]);
    let publisher = Publisher::default();
    publisher
        .subscribe(listener.clone(), SubscribeOptions::new().on("order_placed"))
        .unwrap();
    publisher.broadcast("order-placed", &Args::new()).unwrap();

    assert_eq!(*listener.lock(), vec!["order_placed()"]);
}
