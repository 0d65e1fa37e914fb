use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use fieldrules::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::validator;

#[derive(Serialize, Record)]
struct Order {
    #[serde(rename = "sku")]
    code: String,
    quantity: String,
}

fn order_rules() -> Vec<Rule> {
    rules! {
        code: "required,alphanum" => "SKU must be alphanumeric",
        quantity: "required,number,is-even" => "Quantity must come in pairs",
    }
}

#[test]
fn parallel_validation_sees_consistent_results() {
    let validator = Arc::new(validator());
    let rules = Arc::new(order_rules());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let validator = Arc::clone(&validator);
            let rules = Arc::clone(&rules);
            thread::spawn(move || {
                let order = Order {
                    code: format!("SKU{i}"),
                    quantity: i.to_string(),
                };
                let report = validator.validate(&order, &rules).unwrap();
                (i, report)
            })
        })
        .collect();

    for handle in handles {
        let (i, report) = handle.join().unwrap();
        if i % 2 == 0 {
            assert!(report.is_empty(), "order {i}: {report}");
        } else {
            assert_eq!(report.fields().collect::<Vec<_>>(), ["quantity"]);
        }
    }
}

#[test]
fn registration_during_validation() {
    const CALLS_AFTER_REGISTRATION: usize = 50;

    let validator = validator();
    let rules = rules! { code: "required,sku" => "Unknown SKU format" };
    let order = Order {
        code: "AB12".into(),
        quantity: "2".into(),
    };
    let registered = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let mut after = 0;
                while after < CALLS_AFTER_REGISTRATION {
                    let was_registered = registered.load(Ordering::Acquire);
                    let result = validator.validate(&order, &rules);
                    if was_registered {
                        // Every call starting after `register` returned sees the predicate.
                        assert!(result.is_ok_and(|report| report.is_empty()));
                        after += 1;
                    } else {
                        match result {
                            Ok(report) => assert!(report.is_empty()),
                            Err(err) => assert!(matches!(
                                err,
                                ValidatorError::UnknownPredicate { ref predicate, .. } if predicate == "sku"
                            )),
                        }
                        thread::yield_now();
                    }
                }
            });
        }
        scope.spawn(|| {
            validator
                .register("sku", |value: &Value| {
                    value.as_str().is_some_and(|s| s.len() == 4)
                })
                .unwrap();
            registered.store(true, Ordering::Release);
        });
    });

    assert!(validator.registry().contains("sku"));
}

#[derive(Serialize, Record)]
struct Shipment {
    #[serde(rename = "order")]
    order_code: String,
}

#[test]
fn nested_validation_while_registering() {
    let validator = Arc::new(validator());
    let (entered_tx, entered_rx) = mpsc::channel();
    let inner = Arc::downgrade(&validator);

    validator
        .register("valid-order", move |value: &Value| {
            let _ = entered_tx.send(());
            thread::sleep(Duration::from_millis(100));
            let Some(validator) = inner.upgrade() else {
                return false;
            };
            let order = Order {
                code: value.as_str().unwrap_or_default().to_owned(),
                quantity: "2".into(),
            };
            validator.registry().contains("required")
                && validator
                    .validate(&order, &order_rules())
                    .is_ok_and(|report| report.is_empty())
        })
        .unwrap();

    let (done_tx, done_rx) = mpsc::channel();
    let outer = Arc::clone(&validator);
    thread::spawn(move || {
        let shipment = Shipment {
            order_code: "AB12".into(),
        };
        let rules = rules! { order_code: "required,valid-order" => "Order is invalid" };
        let _ = done_tx.send(outer.validate(&shipment, &rules));
    });

    entered_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("predicate never ran");
    validator.register("late", |_: &Value| true).unwrap();

    let report = done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("validation did not finish")
        .unwrap();
    assert!(report.is_empty());
    assert!(validator.registry().contains("late"));
}

#[test]
fn replacing_a_predicate_changes_later_calls() {
    let validator = validator();
    let rules = order_rules();
    let order = Order {
        code: "AB12".into(),
        quantity: "3".into(),
    };

    assert_eq!(validator.validate(&order, &rules).unwrap().len(), 1);

    validator.register("is-even", |_: &Value| true).unwrap();
    assert!(validator.validate(&order, &rules).unwrap().is_empty());
}
