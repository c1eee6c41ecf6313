pub use kurbo::{Affine, Vec2};

/// Integer pixel position.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle: signed origin, unsigned extent.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Center of the rect relative to its own origin, truncating.
    pub fn center(self) -> Point {
        Point::new((self.w / 2) as i32, (self.h / 2) as i32)
    }

    /// Hit test that counts the far edges (`x + w`, `y + h`) as inside.
    ///
    /// This is one pixel wider and taller than the drawn area. Widgets rely on it, so it
    /// is kept; use [`PixelRect::contains`] for the half-open test.
    pub fn contains_inclusive(self, p: Point) -> bool {
        let (x, y) = (i64::from(p.x), i64::from(p.y));
        let (x0, y0) = (i64::from(self.x), i64::from(self.y));
        x >= x0 && x <= x0 + i64::from(self.w) && y >= y0 && y <= y0 + i64::from(self.h)
    }

    /// Half-open hit test (`[x, x+w) × [y, y+h)`).
    pub fn contains(self, p: Point) -> bool {
        let (x, y) = (i64::from(p.x), i64::from(p.y));
        let (x0, y0) = (i64::from(self.x), i64::from(self.y));
        x >= x0 && x < x0 + i64::from(self.w) && y >= y0 && y < y0 + i64::from(self.h)
    }
}

/// Straight (non-premultiplied) RGB8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Straight (non-premultiplied) RGBA8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(self) -> Rgb8 {
        Rgb8::new(self.r, self.g, self.b)
    }
}

/// RGB value treated as fully transparent when importing a raster image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ColorKey(pub Rgb8);

impl ColorKey {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Rgb8::new(r, g, b))
    }

    pub fn matches(self, r: u8, g: u8, b: u8) -> bool {
        self.0 == Rgb8::new(r, g, b)
    }
}

/// Compositing rule used when drawing a texture over the frame buffer.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// `dst = src`
    None,
    /// `dstRGB = srcRGB * srcA + dstRGB * (1 - srcA)`, `dstA = srcA + dstA * (1 - srcA)`
    #[default]
    Blend,
    /// `dstRGB = srcRGB * srcA + dstRGB`, `dstA = dstA`
    Add,
    /// `dstRGB = srcRGB * dstRGB`, `dstA = dstA`
    Mod,
}

/// Mirror axis applied before rotation.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
}

impl Flip {
    pub fn to_affine(self, w: f64, h: f64) -> Affine {
        match self {
            Flip::None => Affine::IDENTITY,
            Flip::Horizontal => Affine::new([-1.0, 0.0, 0.0, 1.0, w, 0.0]),
            Flip::Vertical => Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, h]),
        }
    }
}
