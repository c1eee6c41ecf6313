use super::*;

fn key_down(key: Key) -> Event {
    Event::KeyDown { key, repeat: false }
}

fn key_up(key: Key) -> Event {
    Event::KeyUp { key, repeat: false }
}

#[test]
fn arrows_set_velocity_and_repeats_are_ignored() {
    let mut d = Dot::new(0, 0);
    d.handle_event(&key_down(Key::Right));
    d.handle_event(&Event::KeyDown {
        key: Key::Right,
        repeat: true,
    });
    d.handle_event(&key_down(Key::Up));
    assert_eq!((d.vel_x, d.vel_y), (DOT_VELOCITY, -DOT_VELOCITY));

    d.handle_event(&key_up(Key::Right));
    d.handle_event(&key_up(Key::Up));
    assert_eq!((d.vel_x, d.vel_y), (0, 0));
}

#[test]
fn other_keys_do_nothing() {
    let mut d = Dot::new(5, 5);
    d.handle_event(&key_down(Key::W));
    d.handle_event(&Event::Quit);
    assert_eq!(d, Dot::new(5, 5));
}

#[test]
fn step_moves_by_velocity() {
    let mut d = Dot::new(10, 10);
    d.handle_event(&key_down(Key::Right));
    d.handle_event(&key_down(Key::Down));
    d.step((640, 480));
    assert_eq!((d.x, d.y), (12, 12));
}

#[test]
fn dot_never_leaves_the_window() {
    let bounds = (640, 480);
    let mut d = Dot::new(0, 0);
    d.handle_event(&key_down(Key::Left));
    d.handle_event(&key_down(Key::Up));
    for _ in 0..10 {
        d.step(bounds);
    }
    assert_eq!((d.x, d.y), (0, 0));

    d.handle_event(&key_up(Key::Left));
    d.handle_event(&key_up(Key::Up));
    d.handle_event(&key_down(Key::Right));
    d.handle_event(&key_down(Key::Down));
    for _ in 0..1000 {
        d.step(bounds);
        assert!(d.x >= 0 && d.x + DOT_SIZE <= 640);
        assert!(d.y >= 0 && d.y + DOT_SIZE <= 480);
    }
    assert_eq!((d.x, d.y), (620, 460));
}
