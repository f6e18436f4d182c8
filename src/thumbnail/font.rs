use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use anyhow::{Context, Result, anyhow};
use once_cell::sync::Lazy;
use tracing::{debug, warn};

const SYSTEM_CANDIDATES: [&str; 6] = [
    "C:/Windows/Fonts/arialbd.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];

static SYSTEM_FONT: Lazy<Option<PathBuf>> = Lazy::new(|| {
    SYSTEM_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
});

pub fn read_font(path: &Path) -> Result<FontVec> {
    let data =
        fs::read(path).with_context(|| format!("Failed to read font file: {}", path.display()))?;
    FontVec::try_from_vec(data)
        .map_err(|err| anyhow!("Invalid font file {}: {err}", path.display()))
}

/// A configured font must load; otherwise the first bold system font found
/// is used, and `None` means titles are drawn without text.
pub fn resolve_font(configured: Option<&Path>) -> Result<Option<FontVec>> {
    if let Some(path) = configured {
        return read_font(path).map(Some);
    }

    let Some(path) = SYSTEM_FONT.as_deref() else {
        warn!("No usable system font found; thumbnail text will be skipped");
        return Ok(None);
    };

    match read_font(path) {
        Ok(font) => {
            debug!(font = %path.display(), "Using system font");
            Ok(Some(font))
        }
        Err(err) => {
            warn!(font = %path.display(), error = %err, "System font unusable; skipping text");
            Ok(None)
        }
    }
}
