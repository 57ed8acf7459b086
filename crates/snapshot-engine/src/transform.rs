//! Transform-string composition.
//!
//! The effects subsystem supplies CSS-style transform strings (3D screen
//! transform, crop, zoom); the snapshot combines them into one string for
//! the renderer. Ordering matters: the 3D screen transform applies first,
//! then the composed crop+zoom.

/// Compose crop and zoom into one transform fragment.
pub fn compose_crop_zoom(crop: Option<&str>, zoom: Option<&str>) -> Option<String> {
    join_transforms(&[crop, zoom])
}

/// Compose the full per-frame transform: 3D screen transform first, then
/// crop+zoom. Empty or missing parts collapse cleanly; all-empty input
/// yields an empty string (identity).
pub fn compose_transforms(
    screen_3d: Option<&str>,
    crop: Option<&str>,
    zoom: Option<&str>,
) -> String {
    let crop_zoom = compose_crop_zoom(crop, zoom);
    join_transforms(&[screen_3d, crop_zoom.as_deref()]).unwrap_or_default()
}

fn join_transforms(parts: &[Option<&str>]) -> Option<String> {
    let non_empty: Vec<&str> = parts
        .iter()
        .filter_map(|part| part.map(str::trim))
        .filter(|part| !part.is_empty())
        .collect();

    if non_empty.is_empty() {
        None
    } else {
        Some(non_empty.join(" "))
    }
}
