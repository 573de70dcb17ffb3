//! Blueprint export and report generation
//!
//! Writes a PNG of the canvas raster and a plain-text design report with a
//! RON appendix of the scene snapshot. All failures are recoverable; the
//! caller surfaces them in the status bar and the scene is never touched.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::app::{HouseConfig, Session};
use crate::scene::SceneSnapshot;

/// Error type for export operations
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Image(image::ImageError),
    Serialize(ron::Error),
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Image(e)
    }
}

impl From<ron::Error> for ExportError {
    fn from(e: ron::Error) -> Self {
        ExportError::Serialize(e)
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::Image(e) => write!(f, "Image error: {}", e),
            ExportError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

const REPORT_APPENDIX_HEADER: &str = "Layout data (RON):";

/// Encode an RGBA buffer as PNG.
pub fn save_png<P: AsRef<Path>>(
    path: P,
    rgba: &[u8],
    width: u32,
    height: u32,
) -> Result<(), ExportError> {
    image::save_buffer(
        path.as_ref(),
        rgba,
        width,
        height,
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(())
}

/// Copy a screen-space region out of the current frame's pixels.
///
/// The GPU readback is bottom-up; rows are flipped so the result reads
/// top-down like the canvas. Coordinates are logical pixels and are scaled
/// by the DPI factor of the backbuffer.
pub fn grab_region(rect: crate::ui::Rect) -> (Vec<u8>, u32, u32) {
    use macroquad::prelude::{get_screen_data, screen_dpi_scale};

    let screen = get_screen_data();
    let img_w = screen.width as i32;
    let img_h = screen.height as i32;

    let dpi = screen_dpi_scale();
    let x0 = ((rect.x * dpi) as i32).clamp(0, img_w);
    let y0 = ((rect.y * dpi) as i32).clamp(0, img_h);
    let w = ((rect.w * dpi) as i32).min(img_w - x0).max(0);
    let h = ((rect.h * dpi) as i32).min(img_h - y0).max(0);

    let mut out = Vec::with_capacity((w * h * 4) as usize);
    for row in 0..h {
        let src_row = img_h - 1 - (y0 + row);
        let start = ((src_row * img_w + x0) * 4) as usize;
        let end = start + (w * 4) as usize;
        out.extend_from_slice(&screen.bytes[start..end]);
    }
    (out, w as u32, h as u32)
}

/// Write the design report: header, house configuration, item inventory,
/// optional blueprint image reference, and the RON layout appendix.
pub fn write_report<P: AsRef<Path>>(
    path: P,
    config: &HouseConfig,
    session: &Session,
    snapshot: &SceneSnapshot,
    blueprint_image: Option<&Path>,
) -> Result<(), ExportError> {
    let text = render_report(config, session, snapshot, blueprint_image)?;
    fs::write(path, text)?;
    Ok(())
}

fn render_report(
    config: &HouseConfig,
    session: &Session,
    snapshot: &SceneSnapshot,
    blueprint_image: Option<&Path>,
) -> Result<String, ExportError> {
    let mut out = String::new();
    out.push_str("SnapPlan Design Report\n");
    out.push_str("======================\n\n");
    out.push_str(&format!("Designer: {} ({})\n\n", session.username, session.role));

    out.push_str("House configuration:\n");
    out.push_str(&format!("  Width:     {} m\n", config.width));
    out.push_str(&format!("  Height:    {} m\n", config.height));
    out.push_str(&format!("  Bedrooms:  {}\n", config.bedrooms));
    out.push_str(&format!("  Bathrooms: {}\n", config.bathrooms));
    out.push_str(&format!("  Kitchens:  {}\n", config.kitchens));
    out.push_str(&format!(
        "  Garden:    {}\n\n",
        if config.garden { "yes" } else { "no" }
    ));

    out.push_str(&format!("Blueprint items:\n  Rooms ({}):\n", snapshot.rooms.len()));
    for room in &snapshot.rooms {
        out.push_str(&format!(
            "    - {} at ({:.0}, {:.0}), {:.0}x{:.0}\n",
            room.name, room.x, room.y, room.width, room.height
        ));
    }
    out.push_str(&format!("  Furniture ({}):\n", snapshot.furniture.len()));
    for item in &snapshot.furniture {
        out.push_str(&format!(
            "    - {} at ({:.0}, {:.0}), {:.0}x{:.0}\n",
            item.kind, item.x, item.y, item.width, item.height
        ));
    }
    out.push_str(&format!("  Structures ({}):\n", snapshot.structures.len()));
    for structure in &snapshot.structures {
        out.push_str(&format!(
            "    - {} at ({:.0}, {:.0}), {:.0}x{:.0}\n",
            structure.name, structure.x, structure.y, structure.width, structure.height
        ));
    }
    out.push('\n');

    if let Some(image_path) = blueprint_image {
        out.push_str(&format!("Blueprint image: {}\n\n", image_path.display()));
    }

    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());
    let layout = ron::ser::to_string_pretty(snapshot, pretty)?;
    out.push_str(REPORT_APPENDIX_HEADER);
    out.push('\n');
    out.push_str(&layout);
    out.push('\n');

    Ok(out)
}

/// Ask the user where to save a file. Native targets only; the wasm build
/// has no dialog and the designer reports that in the status bar instead.
#[cfg(not(target_arch = "wasm32"))]
pub fn prompt_save_path(
    title: &str,
    filter_name: &str,
    extension: &str,
    default_name: &str,
) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter(filter_name, &[extension])
        .set_file_name(default_name)
        .save_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneStore;

    fn config() -> HouseConfig {
        HouseConfig {
            width: 20,
            height: 15,
            bedrooms: 3,
            bathrooms: 2,
            kitchens: 1,
            garden: true,
        }
    }

    fn session() -> Session {
        Session {
            username: "ada".to_string(),
            role: "Designer".to_string(),
        }
    }

    #[test]
    fn report_contains_configuration_and_inventory() {
        let store = SceneStore::new(600.0, 400.0);
        let text = render_report(&config(), &session(), &store.snapshot(), None).unwrap();
        assert!(text.contains("Designer: ada (Designer)"));
        assert!(text.contains("Bedrooms:  3"));
        assert!(text.contains("Garden:    yes"));
        assert!(text.contains("Structures (1):"));
        assert!(text.contains("House Outline"));
    }

    #[test]
    fn report_appendix_round_trips_through_ron() {
        let mut store = SceneStore::new(600.0, 400.0);
        let mut room = crate::scene::Room::new("Bedroom 1", 100.0, 80.0, crate::scene::Rgba::LIGHT_BLUE);
        room.set_position(250.0, 160.0);
        store.add_room(room);
        let snapshot = store.snapshot();

        let text = render_report(&config(), &session(), &snapshot, None).unwrap();
        let (_, appendix) = text.split_once(REPORT_APPENDIX_HEADER).unwrap();
        let parsed: SceneSnapshot = ron::from_str(appendix.trim()).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn report_writes_to_disk() {
        let path = std::env::temp_dir().join("snapplan_report_test.txt");
        let store = SceneStore::new(600.0, 400.0);
        write_report(&path, &config(), &session(), &store.snapshot(), None).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("SnapPlan Design Report"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn export_errors_render_their_source() {
        let missing = write_report(
            "/nonexistent-dir/snapplan.txt",
            &config(),
            &session(),
            &SceneStore::new(600.0, 400.0).snapshot(),
            None,
        );
        match missing {
            Err(e @ ExportError::Io(_)) => assert!(e.to_string().starts_with("IO error")),
            other => panic!("expected an IO error, got {:?}", other.map(|_| ())),
        }
    }
}
