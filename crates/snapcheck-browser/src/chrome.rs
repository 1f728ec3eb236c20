use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Locate a Chrome or Chromium binary.
///
/// A custom path, when given, must point at an existing executable and is
/// never silently substituted. Otherwise the platform install locations are
/// checked first, then `PATH`.
pub fn locate_chrome(custom: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = custom {
        return validate(path);
    }

    for path in install_locations() {
        if let Ok(found) = validate(&path) {
            return Ok(found);
        }
    }

    for name in [
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
    ] {
        if let Ok(found) = which::which(name) {
            return Ok(found);
        }
    }

    Err(Error::Browser(
        "Chrome not found. Install Chrome/Chromium or pass --chrome-path.".to_string(),
    ))
}

/// Platform-specific install locations, most common first.
fn install_locations() -> Vec<PathBuf> {
    #[cfg(target_os = "macos")]
    return vec![
        PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
        PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
    ];

    #[cfg(target_os = "linux")]
    return vec![
        PathBuf::from("/usr/bin/google-chrome"),
        PathBuf::from("/usr/bin/google-chrome-stable"),
        PathBuf::from("/usr/bin/chromium"),
        PathBuf::from("/usr/bin/chromium-browser"),
    ];

    #[cfg(target_os = "windows")]
    return vec![
        PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
        PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
    ];

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    return vec![];
}

fn validate(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::Browser(format!(
            "Chrome not found at: {}",
            path.display()
        )));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = std::fs::metadata(path)?;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(Error::Browser(format!(
                "Chrome binary not executable: {}",
                path.display()
            )));
        }
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_accepts_executable_custom_path() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let result = locate_chrome(Some(path));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), path);
    }

    #[test]
    fn test_locate_rejects_missing_custom_path() {
        let result = locate_chrome(Some(Path::new("/nonexistent/chrome")));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Chrome not found"));
    }

    #[cfg(unix)]
    #[test]
    fn test_locate_rejects_non_executable_custom_path() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::set_permissions(temp.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        let result = locate_chrome(Some(temp.path()));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not executable"));
    }
}
