use std::io::Cursor;
use std::path::Path;

use image::{imageops, DynamicImage, ImageFormat, RgbaImage};

use crate::hypixel::stats::Slot;
use crate::render::error::{RenderError, RenderResult};

/// Pastes `items[i]` onto the base image at `layout[i]` and returns the PNG, rewound and ready to read.
///
/// Sprites are alpha-composited over the base. Empty slots leave the base showing.
pub fn composite(base_path: &Path, items: &[Slot], layout: &[(u32, u32)], sprite_root: &Path) -> RenderResult<Cursor<Vec<u8>>> {
    if items.len() > layout.len() {
        return Err(RenderError::TooManyItems { count: items.len(), slots: layout.len() });
    }

    let mut canvas = image::open(base_path)?.to_rgba8();

    for (item, &(x, y)) in items.iter().zip(layout) {
        let Slot::Sprite(name) = item else {
            continue;
        };
        let sprite = load_sprite(sprite_root, name)?;
        imageops::overlay(&mut canvas, &sprite, i64::from(x), i64::from(y));
    }

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(canvas).write_to(&mut buffer, ImageFormat::Png)?;
    buffer.set_position(0);

    Ok(buffer)
}

fn load_sprite(sprite_root: &Path, name: &str) -> RenderResult<RgbaImage> {
    // Names come from remote data, keep them inside the sprite directory.
    if name.contains(&['/', '\\'][..]) || name.contains("..") {
        return Err(RenderError::UnknownItem(name.to_string()));
    }

    let path = sprite_root.join(format!("{name}.png"));
    if !path.is_file() {
        return Err(RenderError::UnknownItem(name.to_string()));
    }

    Ok(image::open(&path)?.to_rgba8())
}
