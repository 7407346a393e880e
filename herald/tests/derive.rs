#![allow(dead_code)]

use herald::{Args, Event, Filter, Kind, Message, Publisher, Typed, naming::handler_name};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Message)]
struct OrderPlaced {
    id: u64,
}

#[derive(Clone, Debug, Message)]
#[herald(name = "Orders::Express::OrderPlaced", extends = OrderPlaced)]
struct ExpressOrderPlaced {
    id: u64,
}

#[derive(Clone, Debug, Message)]
#[herald(extends = OrderPlaced)]
struct BulkOrderPlaced;

#[derive(Clone, Debug, Message)]
#[herald(name = "Generic::Wrapper")]
struct Wrapper<T: Clone + std::fmt::Debug + Send + Sync + 'static> {
    inner: T,
}

#[derive(Typed)]
#[herald(name = "Shop::Checkout")]
struct Checkout;

#[test]
fn test_default_name_is_the_type_name() {
    assert_eq!(OrderPlaced::KIND.name(), "OrderPlaced");
    assert_eq!(OrderPlaced::KIND.parent(), None);
    assert_eq!(handler_name(OrderPlaced::KIND.name()), "on_order_placed");
}

#[test]
fn test_name_and_parent_attributes() {
    let kind: &Kind = ExpressOrderPlaced::KIND;
    assert_eq!(kind.name(), "Orders::Express::OrderPlaced");
    assert_eq!(kind.parent(), Some(OrderPlaced::KIND));
    assert!(kind.is_a(OrderPlaced::KIND));
    assert_eq!(
        handler_name(kind.name()),
        "on_orders_express_order_placed"
    );
}

#[test]
fn test_parent_without_name() {
    assert_eq!(BulkOrderPlaced::KIND.name(), "BulkOrderPlaced");
    assert!(BulkOrderPlaced::KIND.is_a(OrderPlaced::KIND));
    assert!(!OrderPlaced::KIND.is_a(BulkOrderPlaced::KIND));
}

#[test]
fn test_generic_message() {
    let message = Wrapper { inner: 5u8 };
    let dynamic: &dyn herald::DynMessage = &message;
    assert_eq!(dynamic.kind().name(), "Generic::Wrapper");
    assert_eq!(dynamic.downcast_ref::<Wrapper<u8>>().map(|w| w.inner), Some(5));
}

#[test]
fn test_typed_only_derive() {
    assert_eq!(Checkout::KIND.name(), "Shop::Checkout");
    assert_eq!(handler_name(Checkout::KIND.name()), "on_shop_checkout");
}

#[test]
fn test_ancestors_walk_to_the_root() {
    let names: Vec<_> = ExpressOrderPlaced::KIND
        .ancestors()
        .map(Kind::name)
        .collect();
    assert_eq!(names, vec!["Orders::Express::OrderPlaced", "OrderPlaced"]);
}

mod billing {
    #[derive(Clone, Debug, herald::Message)]
    pub struct Created;
}

mod shipping {
    #[derive(Clone, Debug, herald::Message)]
    pub struct Created;
}

#[test]
fn test_same_named_types_in_different_modules_do_not_alias() {
    assert_eq!(billing::Created::KIND.name(), shipping::Created::KIND.name());
    assert_ne!(billing::Created::KIND, shipping::Created::KIND);
    assert!(!shipping::Created::KIND.is_a(billing::Created::KIND));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let publisher = Publisher::default();
    publisher.on(
        Filter::kind::<billing::Created>(),
        move |event: Event<'_>, _: &Args| {
            sink.lock().unwrap().push(event.to_string());
        },
    );

    publisher.publish(&shipping::Created).unwrap();
    assert!(seen.lock().unwrap().is_empty());

    publisher.publish(&billing::Created).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec!["Created"]);
}
