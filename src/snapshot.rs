//! Writing and comparing PNG snapshots of bitmaps
//!
//! Used by tests to dump what a drawing produced and compare it against a
//! stored image.

use std::path::Path;

/// Read an image file as 8 bit RGB
pub fn read_file<P: AsRef<Path>>(filename: P) -> crate::Result<(Vec<u8>,usize,usize)> {
    let img = image::open(filename)?.to_rgb8();
    let (w, h) = img.dimensions();
    let buf = img.into_raw();
    Ok((buf, w as usize, h as usize))
}

/// Write 8 bit RGB data as an image; the format follows the file extension
pub fn write_file<P: AsRef<Path>>(buf: &[u8], width: usize, height: usize, filename: P) -> crate::Result<()> {
    image::save_buffer(filename, buf, width as u32, height as u32, image::ColorType::Rgb8)?;
    Ok(())
}

/// Compare two image files pixel by pixel
///
/// Differences are logged at `debug` level.
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> crate::Result<bool> {
    let (d1,w1,h1) = read_file(f1)?;
    let (d2,w2,h2) = read_file(f2)?;
    if w1 != w2 || h1 != h2 {
        return Ok(false);
    }
    let mut flag = true;
    for (i,(v1,v2)) in d1.iter().zip(d2.iter()).enumerate() {
        if v1 != v2 {
            log::debug!("{} [{},{},{}]: {} {}", i, (i/3)%w1,(i/3)/w1,i%3, v1,v2);
            flag = false;
        }
    }
    Ok(flag)
}
