use subtitles::{SubtitleSource, TrackCatalog};
use tracing::info;

use crate::{error::Result, types::LanguageInfo, video_id::resolve_video_id};

pub async fn available_languages<S>(source: &S, video_id: &str) -> Result<Vec<LanguageInfo>>
where
    S: SubtitleSource + ?Sized,
{
    let video_id = resolve_video_id(video_id)?;
    let catalog = source.list_tracks(&video_id).await?;
    let languages = languages_from_catalog(&catalog);
    info!("{} offers {} transcript languages", video_id, languages.len());
    Ok(languages)
}

/// Manual tracks first, then automatic tracks for languages without a manual one
pub fn languages_from_catalog(catalog: &TrackCatalog) -> Vec<LanguageInfo> {
    let manual = catalog.manual.iter();
    let automatic = catalog
        .automatic
        .iter()
        .filter(|track| catalog.find_manual(&track.language_code).is_none());

    manual
        .chain(automatic)
        .map(|track| LanguageInfo {
            language_code: track.language_code.clone(),
            language_name: track.language_name.clone(),
            is_generated: track.is_generated,
            is_translatable: true,
        })
        .collect()
}
