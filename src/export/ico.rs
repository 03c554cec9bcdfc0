//! Windows `.ico` writing.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::icon::IconSet;

/// Encodes every image of `set` as one PNG-compressed entry.
///
/// Entries keep the order of the set. An empty set is rejected, since an
/// icon directory without entries is not a valid `.ico`.
pub fn write_ico<W: Write>(set: &IconSet, writer: W) -> io::Result<()> {
    if set.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "icon set has no images"));
    }
    log::debug!("encoding {} ico entries", set.len());

    let mut dir = ico::IconDir::new(ico::ResourceType::Icon);
    for image in set {
        let (width, height) = image.data.dimensions();
        let rgba = ico::IconImage::from_rgba_data(width, height, image.data.as_raw().clone());
        dir.add_entry(ico::IconDirEntry::encode(&rgba)?);
    }
    dir.write(writer)
}

/// Writes `set` to the file at `path`, replacing it.
pub fn save_ico(set: &IconSet, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_ico(set, &mut writer)?;
    writer.flush()
}
