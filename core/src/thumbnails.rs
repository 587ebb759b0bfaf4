//! Thumbnail to [`Image`] mapping.

use crate::types::{Image, ImageState, ImageType, Thumbnail, ThumbnailState};

const FALLBACK_GENERIC: &str = "https://t0.rbxcdn.com/bf5841143a43ff8b754b7026159a2a18";
const FALLBACK_BLOCKED: &str = "https://t3.rbxcdn.com/9fc30fe577bf95e045c9a3d4abaca05d";

/// Image shown in place of a thumbnail that has no URL yet.
///
/// Error, Pending and InReview reuse the generic image until Roblox
/// publishes dedicated art for them (Error should be the "torn paper" one).
pub fn thumbnail_fallback(state: ThumbnailState) -> &'static str {
    match state {
        ThumbnailState::Error => FALLBACK_GENERIC,
        ThumbnailState::Blocked => FALLBACK_BLOCKED,
        ThumbnailState::Pending => FALLBACK_GENERIC,
        ThumbnailState::InReview => FALLBACK_GENERIC,
        ThumbnailState::Completed => FALLBACK_GENERIC,
        ThumbnailState::TemporarilyUnavailable => FALLBACK_GENERIC,
    }
}

/// Map thumbnails to images of `kind`, all `size` pixels square.
pub fn map_thumbnails_to_images(thumbnails: Vec<Thumbnail>, kind: ImageType, size: u32) -> Vec<Image> {
    thumbnails
        .into_iter()
        .map(|thumbnail| Image {
            url: if thumbnail.image_url.is_empty() {
                thumbnail_fallback(thumbnail.state).to_string()
            } else {
                thumbnail.image_url
            },
            kind,
            state: if thumbnail.state == ThumbnailState::Completed {
                ImageState::Ready
            } else {
                ImageState::Unknown
            },
            width: size,
            height: size,
            source_id: thumbnail.target_id,
        })
        .collect()
}
