use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::{
    FetchedSubtitles, Result, SubtitleError, SubtitleFormat, SubtitleSource, Track, TrackCatalog,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_LANGUAGE: &str = "en";
const WORKDIR_PREFIX: &str = "yt-transcript-";

/// Subtitle source backed by the `yt-dlp` command line tool
#[derive(Debug, Clone)]
pub struct YtDlpSource {
    binary: PathBuf,
    timeout: Duration,
    default_language: String,
    /// Parent of the per-call download dirs; the system temp dir when unset
    temp_root: Option<PathBuf>,
}

impl Default for YtDlpSource {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

impl YtDlpSource {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: DEFAULT_TIMEOUT,
            default_language: DEFAULT_LANGUAGE.to_string(),
            temp_root: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    pub fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={}", video_id)
    }

    /// Bound the whole operation; dropping the future kills the child and removes the temp dir
    async fn bounded<T>(&self, work: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.timeout, work).await {
            Ok(result) => result,
            Err(_) => {
                warn!("yt-dlp did not finish within {:?}", self.timeout);
                Err(SubtitleError::Timeout {
                    millis: self.timeout.as_millis() as u64,
                })
            }
        }
    }

    async fn run(&self, args: &[&str]) -> Result<Output> {
        debug!("Running {} {}", self.binary.display(), args.join(" "));

        let child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SubtitleError::AcquisitionFailed(format!(
                    "Failed to execute {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(&stderr));
        }
        Ok(output)
    }

    async fn catalog(&self, video_id: &str) -> Result<TrackCatalog> {
        let url = Self::watch_url(video_id);
        let output = self
            .run(&["--skip-download", "--dump-single-json", "--no-warnings", &url])
            .await?;
        TrackCatalog::from_info_json(&String::from_utf8_lossy(&output.stdout))
    }

    async fn download(&self, video_id: &str, track: &Track) -> Result<(SubtitleFormat, String)> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKDIR_PREFIX);
        let workdir = match &self.temp_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        let template = workdir.path().join("%(id)s.%(ext)s");
        let template = template.to_string_lossy();
        let url = Self::watch_url(video_id);
        let write_flag = if track.is_generated {
            "--write-auto-subs"
        } else {
            "--write-subs"
        };

        self.run(&[
            "--skip-download",
            "--no-warnings",
            write_flag,
            "--sub-langs",
            &track.language_code,
            "--sub-format",
            SubtitleFormat::PREFERENCE,
            "-o",
            &template,
            &url,
        ])
        .await?;

        let (format, path) = find_subtitle_file(workdir.path()).await?;
        debug!("Reading {} subtitles from {}", format, path.display());
        let bytes = tokio::fs::read(&path).await?;
        Ok((format, String::from_utf8_lossy(&bytes).into_owned()))
    }
}

async fn find_subtitle_file(dir: &Path) -> Result<(SubtitleFormat, PathBuf)> {
    let mut found: Vec<(SubtitleFormat, PathBuf)> = Vec::new();
    let mut unsupported = Vec::new();

    let mut read_dir = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let path = entry.path();
        let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
            continue;
        };
        match SubtitleFormat::from_extension(extension) {
            Some(format) => found.push((format, path)),
            None => unsupported.push(extension.to_string()),
        }
    }

    // Variants are declared in preference order
    found.sort_by_key(|(format, _)| *format as u8);
    match found.into_iter().next() {
        Some(hit) => Ok(hit),
        None if !unsupported.is_empty() => Err(SubtitleError::Format(format!(
            "Unsupported subtitle format: {}",
            unsupported.join(", ")
        ))),
        None => Err(SubtitleError::NoSubtitlesAvailable),
    }
}

/// Map yt-dlp's stderr onto the failure kinds callers act on
pub fn classify_failure(stderr: &str) -> SubtitleError {
    let lowered = stderr.to_lowercase();
    let message = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .unwrap_or("yt-dlp exited with an error")
        .to_string();

    if ["http error 429", "too many requests", "rate-limit", "rate limit"]
        .iter()
        .any(|needle| lowered.contains(needle))
    {
        SubtitleError::RateLimited(message)
    } else if lowered.contains("there are no subtitles") {
        SubtitleError::NoSubtitlesAvailable
    } else {
        SubtitleError::AcquisitionFailed(message)
    }
}

#[async_trait]
impl SubtitleSource for YtDlpSource {
    async fn list_tracks(&self, video_id: &str) -> Result<TrackCatalog> {
        info!("Listing subtitle tracks for {}", video_id);
        self.bounded(self.catalog(video_id)).await
    }

    async fn fetch(&self, video_id: &str, language: Option<&str>) -> Result<FetchedSubtitles> {
        info!("Fetching subtitles for {} (language: {:?})", video_id, language);
        self.bounded(async {
            let catalog = self.catalog(video_id).await?;
            let track = catalog.select(language, &self.default_language)?;
            debug!(
                "Selected {} track {}",
                if track.is_generated { "automatic" } else { "manual" },
                track.language_code
            );

            let (format, content) = self.download(video_id, track).await?;
            let entries = format.parse(&content)?;

            Ok(FetchedSubtitles {
                entries,
                language_code: track.language_code.clone(),
                language_name: track.language_name.clone(),
                is_generated: track.is_generated,
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TranscriptEntry;
    use tempfile::TempDir;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            YtDlpSource::watch_url("jNQXAC9IVRw"),
            "https://www.youtube.com/watch?v=jNQXAC9IVRw"
        );
    }

    #[test]
    fn test_classify_rate_limit() {
        let stderr = "WARNING: something\nERROR: Unable to download webpage: HTTP Error 429: Too Many Requests\n";
        match classify_failure(stderr) {
            SubtitleError::RateLimited(message) => assert!(message.contains("429")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_classify_generic_failure_keeps_last_line() {
        let stderr = "ERROR: [youtube] abc: Video unavailable\n\n";
        match classify_failure(stderr) {
            SubtitleError::AcquisitionFailed(message) => {
                assert_eq!(message, "ERROR: [youtube] abc: Video unavailable")
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(classify_failure(""), SubtitleError::AcquisitionFailed(_)));
    }

    #[tokio::test]
    async fn test_find_subtitle_file_prefers_vtt() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("id.en.json3"), "{}").unwrap();
        std::fs::write(dir.path().join("id.en.vtt"), "WEBVTT").unwrap();

        let (format, path) = find_subtitle_file(dir.path()).await.unwrap();
        assert_eq!(format, SubtitleFormat::Vtt);
        assert!(path.ends_with("id.en.vtt"));
    }

    #[tokio::test]
    async fn test_find_subtitle_file_reports_missing_and_unsupported() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            find_subtitle_file(dir.path()).await,
            Err(SubtitleError::NoSubtitlesAvailable)
        ));

        std::fs::write(dir.path().join("id.en.srv3"), "<xml/>").unwrap();
        assert!(matches!(
            find_subtitle_file(dir.path()).await,
            Err(SubtitleError::Format(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_binary_is_acquisition_failure() {
        let source = YtDlpSource::new("/nonexistent/yt-dlp-binary");
        let result = source.fetch("jNQXAC9IVRw", None).await;
        assert!(matches!(result, Err(SubtitleError::AcquisitionFailed(_))));
    }

    #[tokio::test]
    async fn test_slow_extractor_times_out() {
        let source = YtDlpSource::default().with_timeout(Duration::from_millis(20));
        let result = source
            .bounded(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;
        let error = result.unwrap_err();
        assert!(matches!(error, SubtitleError::Timeout { millis: 20 }));
        assert_eq!(error.to_string(), "Subtitle acquisition timed out after 20ms");
    }

    #[cfg(unix)]
    const INFO_JSON: &str = r#"{"id": "jNQXAC9IVRw", "subtitles": {"en": [{"ext": "vtt", "name": "English"}]}}"#;

    /// Write an executable stand-in for yt-dlp that answers the metadata
    /// query and runs `download` for the subtitle download
    #[cfg(unix)]
    fn fake_yt_dlp(dir: &Path, download: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = format!(
            "#!/bin/sh\ncase \"$*\" in\n  *--dump-single-json*) printf '%s' '{}' ;;\n  *) {} ;;\nesac\n",
            INFO_JSON, download
        );
        let path = dir.join("yt-dlp");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    fn leftover_workdirs(root: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(root)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(WORKDIR_PREFIX))
            })
            .collect()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_during_download_removes_workdir() {
        let bin = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let source = YtDlpSource::new(fake_yt_dlp(bin.path(), "exec sleep 5"))
            .with_timeout(Duration::from_millis(500))
            .with_temp_root(root.path());

        let result = source.fetch("jNQXAC9IVRw", None).await;

        assert!(matches!(result, Err(SubtitleError::Timeout { millis: 500 })));
        assert!(leftover_workdirs(root.path()).is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_downloads_and_parses_selected_track() {
        // Fill yt-dlp's output template the way the real tool would
        let download = r#"out=""; prev=""
    for arg in "$@"; do [ "$prev" = "-o" ] && out="$arg"; prev="$arg"; done
    file=$(printf '%s' "$out" | sed 's/%(id)s/jNQXAC9IVRw/; s/%(ext)s/en.vtt/')
    printf 'WEBVTT\n\n00:00:01.000 --> 00:00:03.000\nHello world\n\n00:00:04.000 --> 00:00:05.500\nSecond line\n' > "$file""#;

        let bin = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let source = YtDlpSource::new(fake_yt_dlp(bin.path(), download)).with_temp_root(root.path());

        let fetched = source.fetch("jNQXAC9IVRw", None).await.unwrap();

        assert_eq!(fetched.language_code, "en");
        assert_eq!(fetched.language_name, "English");
        assert!(!fetched.is_generated);
        assert_eq!(
            fetched.entries,
            vec![
                TranscriptEntry::new("Hello world", 1.0, 2.0),
                TranscriptEntry::new("Second line", 4.0, 1.5),
            ]
        );
        assert!(leftover_workdirs(root.path()).is_empty());
    }
}
