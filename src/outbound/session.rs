use crate::domain::session::{SessionError, SessionPort, UserSession};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Keeps the logged-in user's session as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionPort for FileSessionStore {
    async fn write_user_session(&self, params: UserSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_vec_pretty(&params)?;
        let staging = self.path.with_extension("tmp");
        let mut file = create_private(&staging).await?;
        file.write_all(&contents).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&staging, &self.path).await.map_err(|err| {
            tracing::error!(path = %self.path.display(), "failed to store session: {err}");
            SessionError::WriteSessionError
        })?;

        Ok(())
    }

    async fn get_user_session(&self) -> Result<Option<UserSession>, SessionError> {
        let contents = match fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_slice::<UserSession>(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "unreadable session file: {err}");
                Err(SessionError::ReadSessionError)
            }
        }
    }

    async fn flush(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Creates `path` readable by its owner only. A leftover file from an
/// interrupted write is removed first so the mode applies at creation.
async fn create_private(path: &Path) -> std::io::Result<fs::File> {
    match fs::remove_file(path).await {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    options.open(path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::SessionTokens;
    use std::time::{Duration, SystemTime};
    use uuid::Uuid;

    fn user_session() -> UserSession {
        UserSession {
            session_tokens: SessionTokens {
                access_token: "access".to_string(),
                refresh_token: "refresh".to_string(),
                access_token_expires_at: SystemTime::now() + Duration::from_secs(300),
                refresh_token_expires_at: SystemTime::now() + Duration::from_secs(3600),
            },
            user_id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            full_name: Some("Ada Lovelace".to_string()),
        }
    }

    #[tokio::test]
    async fn test_missing_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        assert!(store.get_user_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));
        let session = user_session();

        store.write_user_session(session.clone()).await.unwrap();
        let stored = store.get_user_session().await.unwrap().unwrap();

        assert_eq!(session.user_id, stored.user_id);
        assert_eq!("access", stored.session_tokens.access_token);
        assert_eq!(
            session.session_tokens.refresh_token_expires_at,
            stored.session_tokens.refresh_token_expires_at
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.write_user_session(user_session()).await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(0o600, mode & 0o777);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_leftover_staging_file_is_replaced() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        let staging = dir.path().join("session.tmp");
        std::fs::write(&staging, "stale").unwrap();
        std::fs::set_permissions(&staging, std::fs::Permissions::from_mode(0o644)).unwrap();

        store.write_user_session(user_session()).await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(0o600, mode & 0o777);
        assert!(!staging.exists());
        assert!(store.get_user_session().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_flush() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.write_user_session(user_session()).await.unwrap();

        store.flush().await.unwrap();
        assert!(store.get_user_session().await.unwrap().is_none());

        // flushing twice is fine
        store.flush().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = FileSessionStore::new(path).get_user_session().await;

        assert!(matches!(result, Err(SessionError::ReadSessionError)));
    }
}
