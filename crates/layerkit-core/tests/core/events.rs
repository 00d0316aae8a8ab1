use layerkit_core::{shared, CanvasEvent, CanvasEventKind, EventDispatcher, LayerId};

#[test]
fn test_every_kind_has_its_own_slot() {
    let log = shared(Vec::new());
    let mut dispatcher = EventDispatcher::new();

    for kind in CanvasEventKind::ALL {
        let sink = log.clone();
        dispatcher.on(kind, move |e| sink.borrow_mut().push(e.kind()));
    }
    assert_eq!(dispatcher.handler_count(), 5);

    dispatcher.emit(CanvasEvent::Add(LayerId(1)));
    dispatcher.emit(CanvasEvent::Select(LayerId(1)));
    dispatcher.emit(CanvasEvent::Draw);
    dispatcher.emit(CanvasEvent::Deselect(LayerId(1)));
    dispatcher.emit(CanvasEvent::Remove(LayerId(1)));

    assert_eq!(
        *log.borrow(),
        vec![
            CanvasEventKind::Add,
            CanvasEventKind::Select,
            CanvasEventKind::Draw,
            CanvasEventKind::Deselect,
            CanvasEventKind::Remove,
        ]
    );
}

#[test]
fn test_kind_names() {
    let names: Vec<&str> = CanvasEventKind::ALL.iter().map(|k| k.name()).collect();
    assert_eq!(names, vec!["add", "remove", "select", "deselect", "draw"]);
}
