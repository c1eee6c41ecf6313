use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(128, 128), 64);
    assert_eq!(mul_div255_u8(120, 255), 120);
    assert_eq!(mul_div255_u8(1, 127), 0);
    assert_eq!(mul_div255_u8(1, 128), 1);
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
}

#[test]
fn unpremultiply_restores_straight_color() {
    let mut px = vec![64u8, 32, 0, 128, 10, 20, 30, 0, 1, 2, 3, 255];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[128, 64, 0, 128]);
    assert_eq!(&px[4..8], &[10, 20, 30, 0]);
    assert_eq!(&px[8..12], &[1, 2, 3, 255]);
}

#[test]
fn add_saturates() {
    assert_eq!(add_sat_u8(200, 100), 255);
    assert_eq!(add_sat_u8(1, 2), 3);
}
