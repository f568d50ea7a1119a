//! Property-based tests for listener bookkeeping and dispatch order

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use emitkit::*;
use proptest::prelude::*;

const NAMES: [&str; 3] = ["tick", "save", "close"];
const LISTENERS: usize = 4;

#[derive(Debug, Clone)]
enum Op {
    Register { name: usize, listener: usize, once: bool },
    Unregister { name: usize, listener: Option<usize>, once: bool },
    UnregisterAll { name: Option<usize> },
    Dispatch { name: usize },
}

/// Strategy for generating emitter operations
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..NAMES.len(), 0..LISTENERS, any::<bool>())
            .prop_map(|(name, listener, once)| Op::Register { name, listener, once }),
        2 => (0..NAMES.len(), proptest::option::of(0..LISTENERS), any::<bool>())
            .prop_map(|(name, listener, once)| Op::Unregister { name, listener, once }),
        1 => proptest::option::of(0..NAMES.len()).prop_map(|name| Op::UnregisterAll { name }),
        2 => (0..NAMES.len()).prop_map(|name| Op::Dispatch { name }),
    ]
}

/// Reference model: name -> [(listener index, once)]
type Model = HashMap<usize, Vec<(usize, bool)>>;

fn apply_to_model(model: &mut Model, op: &Op) -> Vec<usize> {
    let mut fired = Vec::new();
    match *op {
        Op::Register { name, listener, once } => {
            model.entry(name).or_default().push((listener, once));
        }
        Op::Unregister { name, listener: None, .. } => {
            model.remove(&name);
        }
        Op::Unregister { name, listener: Some(listener), once } => {
            if let Some(records) = model.get_mut(&name) {
                records.retain(|&(l, o)| l != listener || (once && !o));
                if records.is_empty() {
                    model.remove(&name);
                }
            }
        }
        Op::UnregisterAll { name: Some(name) } => {
            model.remove(&name);
        }
        Op::UnregisterAll { name: None } => model.clear(),
        Op::Dispatch { name } => {
            if let Some(records) = model.get_mut(&name) {
                fired = records.iter().map(|&(l, _)| l).collect();
                records.retain(|&(_, once)| !once);
                if records.is_empty() {
                    model.remove(&name);
                }
            }
        }
    }
    fired
}

proptest! {
    /// Listener counts and registered names always match the reference model
    #[test]
    fn prop_bookkeeping_matches_model(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let listeners: Vec<Listener<()>> = (0..LISTENERS)
            .map(|i| {
                let fired = fired.clone();
                Listener::<()>::new(move |_| fired.borrow_mut().push(i))
            })
            .collect();

        let emitter = Emitter::<()>::with_config(EmitterConfig::unbounded());
        let mut model = Model::new();

        for op in &ops {
            fired.borrow_mut().clear();
            let expected_fired = apply_to_model(&mut model, op);

            match *op {
                Op::Register { name, listener, once } => {
                    if once {
                        emitter.register_once(NAMES[name], &listeners[listener]).unwrap();
                    } else {
                        emitter.register(NAMES[name], &listeners[listener]).unwrap();
                    }
                }
                Op::Unregister { name, listener, once } => {
                    emitter.unregister(NAMES[name], listener.map(|l| &listeners[l]), None, once);
                }
                Op::UnregisterAll { name } => {
                    emitter.unregister_all(name.map(|n| EventName::from(NAMES[n])));
                }
                Op::Dispatch { name } => {
                    let had_listeners = emitter.dispatch(NAMES[name], &()).unwrap();
                    prop_assert_eq!(had_listeners, !expected_fired.is_empty());
                }
            }

            prop_assert_eq!(&*fired.borrow(), &expected_fired);
            prop_assert_eq!(emitter.name_count(), model.len());
            for (i, name) in NAMES.iter().enumerate() {
                let expected = model.get(&i).map_or(0, Vec::len);
                prop_assert_eq!(emitter.listener_count_for(*name), expected);
            }

            let mut names: Vec<String> = emitter
                .names()
                .iter()
                .filter_map(|n| n.as_str().map(str::to_string))
                .collect();
            names.sort();
            let mut expected_names: Vec<String> =
                model.keys().map(|&i| NAMES[i].to_string()).collect();
            expected_names.sort();
            prop_assert_eq!(names, expected_names);
        }
    }

    /// Listeners fire in registration order
    #[test]
    fn prop_dispatch_follows_registration_order(order in Just((0..8usize).collect::<Vec<_>>()).prop_shuffle()) {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let emitter = Emitter::<()>::new();

        for &i in &order {
            let fired = fired.clone();
            let listener = Listener::<()>::new(move |_| fired.borrow_mut().push(i));
            emitter.register("x", &listener).unwrap();
        }

        emitter.dispatch("x", &()).unwrap();
        prop_assert_eq!(&*fired.borrow(), &order);
    }

    /// A one-time listener fires exactly once however often the event is dispatched
    #[test]
    fn prop_once_fires_once(dispatches in 1usize..10, others in 0usize..4) {
        let count = Rc::new(RefCell::new(0));
        let emitter = Emitter::<()>::new();

        let c = count.clone();
        let once = Listener::<()>::new(move |_| *c.borrow_mut() += 1);
        emitter.register_once("x", &once).unwrap();
        for _ in 0..others {
            emitter.register("x", &Listener::new(|_| {})).unwrap();
        }

        for _ in 0..dispatches {
            emitter.dispatch("x", &()).unwrap();
        }

        prop_assert_eq!(*count.borrow(), 1);
        prop_assert_eq!(emitter.listener_count_for("x"), others);
    }
}
