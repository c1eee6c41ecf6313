use super::*;

#[test]
fn rejects_zero_constants() {
    assert!(matches!(AnimationCursor::new(0, 4), Err(TexelError::Config(_))));
    assert!(matches!(AnimationCursor::new(4, 0), Err(TexelError::Config(_))));
}

#[test]
fn walk_cycle_holds_each_frame_for_four_ticks() {
    let mut c = AnimationCursor::new(4, 4).unwrap();
    let mut seen = Vec::new();
    for _ in 0..16 {
        seen.push(c.current_frame());
        c.advance();
    }
    assert_eq!(seen, [0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3]);
    assert_eq!(c.tick(), 0);
}

#[test]
fn ten_cycles_are_exact_and_bounded() {
    for (t, n) in [(1, 1), (1, 5), (3, 2), (4, 4), (7, 3)] {
        let mut c = AnimationCursor::new(t, n).unwrap();
        for cycle in 0..10 {
            for frame in 0..n as usize {
                for _ in 0..t {
                    assert_eq!(c.current_frame(), frame, "t={t} n={n} cycle={cycle}");
                    assert!(c.tick() < u64::from(t) * u64::from(n));
                    c.advance();
                }
            }
        }
        assert_eq!(c.tick(), 0);
    }
}

#[test]
fn reset_returns_to_first_frame() {
    let mut c = AnimationCursor::new(2, 3).unwrap();
    for _ in 0..3 {
        c.advance();
    }
    assert_eq!(c.current_frame(), 1);
    c.reset();
    assert_eq!((c.tick(), c.current_frame()), (0, 0));
    assert_eq!((c.ticks_per_frame(), c.frame_count()), (2, 3));
}

#[test]
fn long_cycles_wrap_without_overflow() {
    let mut c = AnimationCursor::new(u32::MAX, 2).unwrap();
    let period = u64::from(u32::MAX) * 2;
    c.tick = period - 2;
    c.advance();
    assert_eq!((c.tick(), c.current_frame()), (period - 1, 1));
    c.advance();
    assert_eq!((c.tick(), c.current_frame()), (0, 0));

    c.tick = u64::from(u32::MAX) - 1;
    assert_eq!(c.current_frame(), 0);
    c.advance();
    assert_eq!(c.current_frame(), 1);
}
