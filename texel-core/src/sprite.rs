use crate::foundation::core::{Flip, PixelRect, Point};
use crate::foundation::error::{TexelError, TexelResult};
use crate::texture::Texture;

/// A rectangle inside a texture, in texture pixels.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ClipRegion {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Direction in which [`ClipRegion::strip`] lays out frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl ClipRegion {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Source rectangle for a draw call.
    pub fn to_rect(self) -> PixelRect {
        PixelRect::new(
            i32::try_from(self.x).unwrap_or(i32::MAX),
            i32::try_from(self.y).unwrap_or(i32::MAX),
            self.w,
            self.h,
        )
    }

    /// `count` regions of `w x h`, packed edge to edge along `axis` from the origin.
    pub fn strip(
        origin_x: u32,
        origin_y: u32,
        w: u32,
        h: u32,
        count: u32,
        axis: Axis,
    ) -> Vec<Self> {
        (0..count)
            .map(|i| match axis {
                Axis::Horizontal => {
                    Self::new(origin_x.saturating_add(i.saturating_mul(w)), origin_y, w, h)
                }
                Axis::Vertical => {
                    Self::new(origin_x, origin_y.saturating_add(i.saturating_mul(h)), w, h)
                }
            })
            .collect()
    }

    fn fits(self, width: u32, height: u32) -> bool {
        u64::from(self.x) + u64::from(self.w) <= u64::from(width)
            && u64::from(self.y) + u64::from(self.h) <= u64::from(height)
    }
}

/// A texture with an ordered catalog of regions, drawn by index.
#[derive(Debug)]
pub struct SpriteSheet {
    texture: Texture,
    clips: Vec<ClipRegion>,
}

impl SpriteSheet {
    /// Validate every region against the texture's current size.
    pub fn new(texture: Texture, clips: Vec<ClipRegion>) -> TexelResult<Self> {
        let (width, height) = texture.size();
        if let Some((index, c)) = clips
            .iter()
            .enumerate()
            .find(|(_, c)| !c.fits(width, height))
        {
            return Err(TexelError::InvalidRegion {
                index,
                region: c.to_rect(),
                width,
                height,
            });
        }
        Ok(Self { texture, clips })
    }

    /// Draw region `index` at `(x, y)`.
    pub fn render(&self, index: usize, x: i32, y: i32) -> TexelResult<()> {
        let clip = self.clip(index)?;
        self.texture.render(x, y, Some(clip.to_rect()))
    }

    /// Draw region `index` rotated and mirrored, see [`Texture::render_rotated_flipped`].
    pub fn render_rotated_flipped(
        &self,
        index: usize,
        x: i32,
        y: i32,
        angle_deg: f64,
        pivot: Option<Point>,
        flip: Flip,
    ) -> TexelResult<()> {
        let clip = self.clip(index)?;
        self.texture
            .render_rotated_flipped(x, y, Some(clip.to_rect()), angle_deg, pivot, flip)
    }

    pub fn clip(&self, index: usize) -> TexelResult<ClipRegion> {
        self.clips.get(index).copied().ok_or(TexelError::Index {
            index,
            len: self.clips.len(),
        })
    }

    pub fn clips(&self) -> &[ClipRegion] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Mutable texture access for modulation. Reloading through it is not revalidated.
    pub fn texture_mut(&mut self) -> &mut Texture {
        &mut self.texture
    }
}

#[cfg(test)]
#[path = "../tests/unit/sprite.rs"]
mod tests;
