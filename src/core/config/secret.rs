use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

const KEY_BYTES: usize = 64;

/// Where the JWT signing key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum KeyOrigin {
    Environment,
    File(PathBuf),
    Generated(PathBuf),
}

/// `SECRET_KEY` wins; otherwise the key file is reused, or created with a fresh key.
pub(super) fn resolve_signing_key(
    from_env: Option<String>,
    key_file: Option<String>,
) -> (String, KeyOrigin) {
    if let Some(key) = from_env {
        return (key, KeyOrigin::Environment);
    }

    let path = key_file
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(".secret_key"));

    if let Some(key) = read_key(&path) {
        return (key, KeyOrigin::File(path));
    }

    let key = generate_key();
    match persist_key(&path, &key) {
        Ok(()) => (key, KeyOrigin::Generated(path)),
        // Another process created the file first; use its key so tokens stay verifiable.
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => match read_key(&path) {
            Some(existing) => (existing, KeyOrigin::File(path)),
            None => (key, KeyOrigin::Generated(path)),
        },
        Err(err) => {
            tracing::warn!(
                error = %err,
                path = %path.display(),
                "Signing key not persisted; tokens will not survive a restart"
            );
            (key, KeyOrigin::Generated(path))
        }
    }
}

fn read_key(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    let key = contents.trim();
    (!key.is_empty()).then(|| key.to_string())
}

fn persist_key(path: &Path, key: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(key.as_bytes())?;
    file.sync_all()
}

fn generate_key() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("learning-api-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("signing.key")
    }

    #[test]
    fn environment_key_is_used_verbatim() {
        let (key, origin) = resolve_signing_key(Some("from-env".to_string()), None);
        assert_eq!(key, "from-env");
        assert_eq!(origin, KeyOrigin::Environment);
    }

    #[test]
    fn generated_key_is_persisted_and_reused() {
        let path = scratch_path("reuse");
        let file = Some(path.display().to_string());

        let (first, origin) = resolve_signing_key(None, file.clone());
        assert_eq!(origin, KeyOrigin::Generated(path.clone()));
        assert!(first.len() >= KEY_BYTES);

        let (second, origin) = resolve_signing_key(None, file);
        assert_eq!(origin, KeyOrigin::File(path.clone()));
        assert_eq!(first, second);

        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn generated_keys_differ() {
        assert_ne!(generate_key(), generate_key());
    }
}
