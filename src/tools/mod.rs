use crate::error::{Result, RoundError};
use crate::models::{Cell, OccupancyGrid};
use image::{GrayImage, ImageFormat, Luma};
use std::fs;
use std::path::{Path, PathBuf};

const BLACK: Luma<u8> = Luma([0]);
const WHITE: Luma<u8> = Luma([255]);

/// Render the occupancy grid as a grayscale image, `scale` pixels per cell.
///
/// Occupied cells are black on a white background.
pub fn bitmap_image(grid: &OccupancyGrid, scale: u32) -> Result<GrayImage> {
    if grid.is_empty() {
        return Err(RoundError::NothingToRender);
    }
    if scale == 0 {
        return Err(RoundError::InvalidConfig(
            "bitmap scale must be at least 1".to_string(),
        ));
    }

    let width = grid.width() as u32 * scale;
    let height = grid.height() as u32 * scale;
    let mut img = GrayImage::from_pixel(width, height, WHITE);
    for (cell, _) in grid.occupied() {
        let x0 = cell.col as u32 * scale;
        let y0 = cell.row as u32 * scale;
        for y in y0..y0 + scale {
            for x in x0..x0 + scale {
                img.put_pixel(x, y, BLACK);
            }
        }
    }
    Ok(img)
}

/// Render the grid and write it as a PNG.
pub fn save_bitmap<P: AsRef<Path>>(grid: &OccupancyGrid, scale: u32, path: P) -> Result<()> {
    let img = bitmap_image(grid, scale)?;
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Summary statistics for an occupancy grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStats {
    /// Columns in the grid.
    pub width: usize,
    /// Rows in the grid.
    pub height: usize,
    /// Count of occupied cells.
    pub occupied: usize,
    /// Total cells in the grid.
    pub total: usize,
    /// Ratio of occupied cells to total cells.
    pub fill_ratio: f64,
}

/// Compute occupancy stats for a grid.
pub fn grid_stats(grid: &OccupancyGrid) -> GridStats {
    let mut occupied = 0usize;
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if grid.is_occupied(Cell::new(col, row)) {
                occupied += 1;
            }
        }
    }
    let total = grid.width() * grid.height();
    let fill_ratio = if total == 0 {
        0.0
    } else {
        occupied as f64 / total as f64
    };
    GridStats {
        width: grid.width(),
        height: grid.height(),
        occupied,
        total,
        fill_ratio,
    }
}

/// Where `input` lands inside `output_dir`, keeping its file name.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.join("rounded.svg"),
    }
}

/// Every `.svg` file under `root`, recursively, in sorted order.
pub fn collect_svgs<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    let mut stack = vec![root.as_ref().to_path_buf()];
    let mut svgs = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                if ext.to_string_lossy().eq_ignore_ascii_case("svg") {
                    svgs.push(path);
                }
            }
        }
    }

    svgs.sort();
    svgs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NodeId;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_nanos();
        let sequence = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!("qr_round_tools_{nanos}_{sequence}"));
        fs::create_dir_all(&path).expect("failed to create temp dir");
        path
    }

    fn diagonal() -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(2, 2);
        grid.set(Cell::new(0, 0), NodeId::new(0));
        grid.set(Cell::new(1, 1), NodeId::new(1));
        grid
    }

    #[test]
    fn bitmap_image_scales_cells() {
        let img = bitmap_image(&diagonal(), 3).expect("render");
        assert_eq!(img.dimensions(), (6, 6));
        assert_eq!(img.get_pixel(0, 0), &BLACK);
        assert_eq!(img.get_pixel(2, 2), &BLACK);
        assert_eq!(img.get_pixel(3, 0), &WHITE);
        assert_eq!(img.get_pixel(0, 3), &WHITE);
        assert_eq!(img.get_pixel(5, 5), &BLACK);
    }

    #[test]
    fn bitmap_image_rejects_empty_grid() {
        let result = bitmap_image(&OccupancyGrid::default(), 4);
        assert!(matches!(result, Err(RoundError::NothingToRender)));
    }

    #[test]
    fn bitmap_image_rejects_zero_scale() {
        let result = bitmap_image(&diagonal(), 0);
        assert!(matches!(result, Err(RoundError::InvalidConfig(_))));
    }

    #[test]
    fn grid_stats_counts_cells() {
        let stats = grid_stats(&diagonal());
        assert_eq!(stats.occupied, 2);
        assert_eq!(stats.total, 4);
        assert!((stats.fill_ratio - 0.5).abs() < f64::EPSILON);

        let empty = grid_stats(&OccupancyGrid::default());
        assert_eq!(empty.total, 0);
        assert_eq!(empty.fill_ratio, 0.0);
    }

    #[test]
    fn save_bitmap_writes_png() {
        let dir = temp_dir();
        let path = dir.join("grid.png");
        save_bitmap(&diagonal(), 2, &path).expect("save");
        let loaded = image::open(&path).expect("reload").to_luma8();
        assert_eq!(loaded.dimensions(), (4, 4));
        assert_eq!(loaded.get_pixel(0, 0), &BLACK);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn collect_svgs_walks_directories() {
        let dir = temp_dir();
        fs::create_dir_all(dir.join("nested")).expect("mkdir");
        fs::write(dir.join("b.svg"), "<svg/>").expect("write");
        fs::write(dir.join("nested").join("a.SVG"), "<svg/>").expect("write");
        fs::write(dir.join("notes.txt"), "x").expect("write");

        let found = collect_svgs(&dir);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| {
            p.extension()
                .map(|e| e.eq_ignore_ascii_case("svg"))
                .unwrap_or(false)
        }));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn output_path_keeps_file_name() {
        let out = output_path_for(Path::new("/in/code.svg"), Path::new("/out"));
        assert_eq!(out, PathBuf::from("/out/code.svg"));
    }
}
