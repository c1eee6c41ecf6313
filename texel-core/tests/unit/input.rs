use super::*;

#[test]
fn scripted_input_delivers_in_order_and_tracks_pointer() {
    let mut input = ScriptedInput::from_events([
        Event::PointerMove { x: 10, y: 20 },
        Event::PointerDown {
            x: 11,
            y: 21,
            button: MouseButton::Left,
        },
        Event::KeyDown {
            key: Key::W,
            repeat: false,
        },
    ]);
    assert_eq!(input.pending(), 3);

    assert_eq!(input.poll_event(), Some(Event::PointerMove { x: 10, y: 20 }));
    assert_eq!(input.pointer_state().position(), Point::new(10, 20));

    input.poll_event();
    let state = input.pointer_state();
    assert_eq!(state.position(), Point::new(11, 21));
    assert!(state.is_down(MouseButton::Left));
    assert!(!state.is_down(MouseButton::Right));

    assert!(matches!(input.poll_event(), Some(Event::KeyDown { key: Key::W, .. })));
    assert_eq!(input.pointer_state().position(), Point::new(11, 21));
    assert_eq!(input.poll_event(), None);
}

#[test]
fn pointer_up_clears_button() {
    let mut input = ScriptedInput::new();
    input.push(Event::PointerDown {
        x: 0,
        y: 0,
        button: MouseButton::Right,
    });
    input.push(Event::PointerUp {
        x: 3,
        y: 4,
        button: MouseButton::Right,
    });
    input.poll_event();
    assert!(input.pointer_state().is_down(MouseButton::Right));
    input.poll_event();
    assert!(!input.pointer_state().is_down(MouseButton::Right));
    assert_eq!(input.pointer_state().position(), Point::new(3, 4));
}

#[test]
fn events_serialize_with_type_tag() {
    let json = serde_json::to_string(&Event::PointerMove { x: 1, y: 2 }).unwrap();
    assert_eq!(json, r#"{"type":"pointer_move","x":1,"y":2}"#);
    let back: Event = serde_json::from_str(r#"{"type":"quit"}"#).unwrap();
    assert_eq!(back, Event::Quit);
}
