//! Procedural RGBA bitmaps: the ring glitch texture and particle micro-textures.
//!
//! The glitch texture's vertical axis runs around the ring, so clumps wrap
//! modulo the height; the horizontal axis runs across the band and clamps.

use crate::constants::*;
use crate::error::{Result, SplashError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

/// Rectangular noise patch. Columns `x0..x1` are already clamped; rows start
/// at `y0` and wrap modulo the texture height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clump {
    pub x0: usize,
    pub x1: usize,
    pub y0: usize,
    pub rows: usize,
}

impl Clump {
    pub fn contains(&self, x: usize, y: usize, height: usize) -> bool {
        x >= self.x0 && x < self.x1 && (y + height - self.y0) % height < self.rows
    }

    fn row_iter(&self, height: usize) -> impl Iterator<Item = usize> {
        let y0 = self.y0;
        (0..self.rows.min(height)).map(move |dy| (y0 + dy) % height)
    }
}

/// RGBA8 pixel buffer with a re-upload flag.
#[derive(Clone, Debug)]
pub struct GlitchTexture {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    clumps: SmallVec<[Clump; CLUMP_COUNT_MAX]>,
    dirty: bool,
}

impl GlitchTexture {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw bytes, row-major, four channels per pixel.
    pub fn bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn texels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn texels_mut(&mut self) -> &mut [[u8; 4]] {
        bytemuck::cast_slice_mut(&mut self.pixels)
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        self.texels()[y * self.width + x]
    }

    /// Clumps stamped when the texture was generated.
    pub fn clumps(&self) -> &[Clump] {
        &self.clumps
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the dirty flag and clears it; the renderer re-uploads on `true`.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// Tiny checker texture owned by one particle.
#[derive(Clone, Debug)]
pub struct MicroTexture {
    pixels: Vec<u8>,
}

impl MicroTexture {
    pub const SIZE: usize = MICRO_TEXTURE_SIZE;

    pub fn bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn texels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Seeded generator for ring textures and particle micro-textures.
pub struct TextureGenerator<R = StdRng> {
    rng: R,
    width: usize,
    height: usize,
}

impl TextureGenerator<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TextureGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            width: TEXTURE_WIDTH,
            height: TEXTURE_HEIGHT,
        }
    }

    /// Override the output resolution. Both sides must be non-zero.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    /// Allocate a base-colour texture and, with `with_glitch`, stamp
    /// `CLUMP_COUNT_MIN..=CLUMP_COUNT_MAX` noise clumps onto it.
    pub fn generate(&mut self, with_glitch: bool) -> Result<GlitchTexture> {
        let (width, height) = (self.width, self.height);
        let mut pixels = try_alloc(width, height)?;
        for _ in 0..width * height {
            pixels.extend_from_slice(&TEXTURE_BASE_COLOR);
        }
        let mut tex = GlitchTexture {
            width,
            height,
            pixels,
            clumps: SmallVec::new(),
            dirty: true,
        };
        if with_glitch {
            let count = self.rng.gen_range(CLUMP_COUNT_MIN..=CLUMP_COUNT_MAX);
            for _ in 0..count {
                let clump = self.pick_clump();
                self.stamp(&mut tex, clump);
                tex.clumps.push(clump);
            }
        }
        Ok(tex)
    }

    /// Swap the red and blue channels inside one fresh clump region.
    /// Pixels outside the region are untouched; the buffer is reused.
    pub fn mutate(&mut self, tex: &mut GlitchTexture) -> Clump {
        let clump = self.pick_clump_for(tex.width, tex.height);
        let (width, height) = (tex.width, tex.height);
        let texels = tex.texels_mut();
        for y in clump.row_iter(height) {
            for x in clump.x0..clump.x1 {
                texels[y * width + x].swap(0, 2);
            }
        }
        tex.dirty = true;
        clump
    }

    /// Checker of `MICRO_CELL_SIZE` cells, each translucent or transparent.
    pub fn micro_texture(&mut self) -> Result<MicroTexture> {
        let size = MicroTexture::SIZE;
        let mut pixels = try_alloc(size, size)?;
        pixels.resize(size * size * 4, 0);
        let cells = size.div_ceil(MICRO_CELL_SIZE);
        let mut lit: SmallVec<[bool; 16]> = SmallVec::with_capacity(cells * cells);
        for _ in 0..cells * cells {
            lit.push(self.rng.gen_bool(0.5));
        }
        let texels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(&mut pixels);
        for y in 0..size {
            for x in 0..size {
                if lit[(y / MICRO_CELL_SIZE) * cells + x / MICRO_CELL_SIZE] {
                    texels[y * size + x] = [255, 255, 255, MICRO_ALPHA];
                }
            }
        }
        Ok(MicroTexture { pixels })
    }

    fn pick_clump(&mut self) -> Clump {
        self.pick_clump_for(self.width, self.height)
    }

    fn pick_clump_for(&mut self, width: usize, height: usize) -> Clump {
        let cx = self.rng.gen_range(0..width);
        let cy = self.rng.gen_range(0..height);
        let w = self.rng.gen_range(CLUMP_WIDTH_MIN..=CLUMP_WIDTH_MAX);
        let h = self.rng.gen_range(CLUMP_HEIGHT_MIN..=CLUMP_HEIGHT_MAX);
        let x0 = cx.saturating_sub(w / 2);
        let x1 = (x0 + w).min(width);
        let y0 = (cy + height - (h / 2) % height) % height;
        Clump {
            x0,
            x1,
            y0,
            rows: h.min(height),
        }
    }

    fn stamp(&mut self, tex: &mut GlitchTexture, clump: Clump) {
        let (width, height) = (tex.width, tex.height);
        let texels = tex.texels_mut();
        for y in clump.row_iter(height) {
            for x in clump.x0..clump.x1 {
                if self.rng.gen_bool(CLUMP_FILL_PROBABILITY) {
                    texels[y * width + x] = TEXTURE_ALT_COLOR;
                }
            }
        }
    }
}

fn try_alloc(width: usize, height: usize) -> Result<Vec<u8>> {
    let len = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or(SplashError::TextureAlloc { width, height })?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| SplashError::TextureAlloc { width, height })?;
    Ok(buf)
}
