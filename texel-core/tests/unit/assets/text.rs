use super::*;

const FONT_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../assets/DejaVuSans.ttf");

fn junk_font() -> Font {
    Font::from_bytes(vec![0u8; 16], 28.0, "mem.ttf").unwrap()
}

#[test]
fn empty_text_is_a_rasterize_error() {
    let mut r = ParleyTextRasterizer::new();
    let err = r.rasterize("", &junk_font(), Rgba8::BLACK).unwrap_err();
    assert!(matches!(err, TexelError::Rasterize(_)));
    assert!(err.to_string().contains("zero width"));
}

#[test]
fn unparseable_font_bytes_fail_to_rasterize() {
    let mut r = ParleyTextRasterizer::new();
    let err = r.rasterize("hello", &junk_font(), Rgba8::BLACK).unwrap_err();
    assert!(matches!(err, TexelError::Rasterize(_)));
}

#[test]
fn font_size_must_be_positive_and_finite() {
    assert!(matches!(
        Font::from_bytes(vec![1, 2, 3], 0.0, "a.ttf"),
        Err(TexelError::Config(_))
    ));
    assert!(matches!(
        Font::from_bytes(vec![1, 2, 3], f32::NAN, "a.ttf"),
        Err(TexelError::Config(_))
    ));
    assert!(matches!(
        Font::from_bytes(vec![], 12.0, "a.ttf"),
        Err(TexelError::Decode { .. })
    ));
}

#[test]
fn missing_font_file_is_a_decode_error() {
    let err = Font::from_file("no/such/lazy.ttf", 28.0).unwrap_err();
    assert!(matches!(err, TexelError::Decode { .. }));
    assert!(err.to_string().contains("lazy.ttf"));
}

#[test]
fn brush_converts_from_color() {
    let b = TextBrushRgba8::from(Rgba8::new(1, 2, 3, 4));
    assert_eq!((b.r, b.g, b.b, b.a), (1, 2, 3, 4));
}

#[test]
fn glyphs_are_inked_across_the_line() {
    let font = Font::from_file(FONT_FIXTURE, 28.0).unwrap();
    let mut r = ParleyTextRasterizer::new();
    let px = r.rasterize("HHHHHHHHHH", &font, Rgba8::BLACK).unwrap();
    assert!(px.width > 150 && px.height >= 28, "{}x{}", px.width, px.height);

    let inked: Vec<(u32, u32)> = px
        .rgba8
        .chunks_exact(4)
        .enumerate()
        .filter(|(_, p)| p[3] > 128)
        .map(|(i, _)| (i as u32 % px.width, i as u32 / px.width))
        .collect();
    assert!(inked.len() > 500, "only {} inked pixels", inked.len());

    let min_x = inked.iter().map(|p| p.0).min().unwrap();
    let max_x = inked.iter().map(|p| p.0).max().unwrap();
    let max_y = inked.iter().map(|p| p.1).max().unwrap();
    assert!(min_x < px.width / 10, "min_x={min_x}");
    assert!(max_x > px.width * 9 / 10, "max_x={max_x}");
    assert!(max_y > px.height / 2, "max_y={max_y}");
    assert!(inked.iter().all(|p| px.rgba8[((p.1 * px.width + p.0) * 4) as usize] < 64));
}
