use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::detection::domain::detector_init_error::CascadeResolveError;

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Where OpenCV packages usually install their bundled cascades.
const SYSTEM_CASCADE_DIRS: &[&str] = &[
    "/usr/share/opencv4/haarcascades",
    "/usr/local/share/opencv4/haarcascades",
    "/usr/share/opencv/haarcascades",
    "/usr/local/share/opencv/haarcascades",
    "/opt/homebrew/share/opencv4/haarcascades",
];

/// Resolve a cascade classifier definition file.
///
/// Resolution order:
/// 1. Explicit path (must exist; never falls through)
/// 2. OpenCV system data directories
/// 3. User cache directory (platform-specific)
/// 4. Download from URL to cache
pub fn resolve(
    explicit: Option<&Path>,
    name: &str,
    url: &str,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, CascadeResolveError> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(CascadeResolveError::NotFound(path.to_path_buf()))
        };
    }

    if let Some(found) = find_in(&system_cascade_dirs(), name) {
        log::debug!("Using system cascade {}", found.display());
        return Ok(found);
    }

    resolve_in_cache(&cascade_cache_dir()?, name, url, progress)
}

/// System directories that may hold OpenCV's bundled cascades.
pub fn system_cascade_dirs() -> Vec<PathBuf> {
    SYSTEM_CASCADE_DIRS.iter().map(PathBuf::from).collect()
}

/// First `dir/name` that exists, in the order given.
pub fn find_in(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    dirs.iter().map(|d| d.join(name)).find(|p| p.is_file())
}

/// Platform-specific cascade cache directory.
///
/// - macOS: `~/Library/Application Support/Lookout/cascades/`
/// - Linux: `$XDG_CACHE_HOME/Lookout/cascades/` or `~/.cache/Lookout/cascades/`
/// - Windows: `%LOCALAPPDATA%/Lookout/cascades/`
pub fn cascade_cache_dir() -> Result<PathBuf, CascadeResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("Lookout").join("cascades"))
            .ok_or(CascadeResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("Lookout").join("cascades"))
            .ok_or(CascadeResolveError::NoCacheDir)
    }
}

fn resolve_in_cache(
    cache_dir: &Path,
    name: &str,
    url: &str,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, CascadeResolveError> {
    let cached_path = cache_dir.join(name);
    if cached_path.is_file() {
        return Ok(cached_path);
    }

    fs::create_dir_all(cache_dir).map_err(CascadeResolveError::CacheDir)?;
    log::info!("Downloading {name} from {url}");
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), CascadeResolveError> {
    let temp_path = dest.with_extension("part");

    let result = download_inner(url, dest, &temp_path, progress);

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn download_inner(
    url: &str,
    dest: &Path,
    temp_path: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), CascadeResolveError> {
    let write_err = |path: &Path, source: std::io::Error| CascadeResolveError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| CascadeResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    let mut file = fs::File::create(temp_path).map_err(|e| write_err(temp_path, e))?;

    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = response
            .read(&mut buf)
            .map_err(|e| write_err(temp_path, e))?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n])
            .map_err(|e| write_err(temp_path, e))?;
        downloaded += n as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(|e| write_err(temp_path, e))?;
    drop(file);

    fs::rename(temp_path, dest).map_err(|e| write_err(dest, e))?;

    Ok(())
}
