use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jiff::Timestamp;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::{Result, StoreError};
use crate::records::{NewPrompt, NewVideo, Prompt, Video};
use crate::RecordStore;

const SCHEMA: &str = r"
    CREATE TABLE IF NOT EXISTS prompts (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        template TEXT NOT NULL,
        created_at_ms INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS videos (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        path TEXT NOT NULL,
        transcription TEXT NULL,
        created_at_ms INTEGER NOT NULL
    );
";

/// SQLite-backed record store
///
/// A single connection is shared behind a mutex and every query runs on
/// the blocking thread pool, so concurrent writers are serialized here.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the database file and ensure the schema exists
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Database(format!("failed to create {}: {e}", parent.display())))?;
        }

        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened sqlite record store");

        Self::from_connection(conn)
    }

    /// Store that lives only as long as the process
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn run<T, F>(&self, query: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Task("sqlite connection mutex poisoned".to_owned()))?;
            query(&guard)
        })
        .await?
    }
}

fn now_ms() -> i64 {
    Timestamp::now().as_millisecond()
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    let ms: i64 = row.get(idx)?;
    Timestamp::from_millisecond(ms).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

fn prompt_from_row(row: &Row<'_>) -> rusqlite::Result<Prompt> {
    Ok(Prompt {
        id: row.get(0)?,
        title: row.get(1)?,
        template: row.get(2)?,
        created_at: timestamp(row, 3)?,
    })
}

fn video_from_row(row: &Row<'_>) -> rusqlite::Result<Video> {
    Ok(Video {
        id: row.get(0)?,
        name: row.get(1)?,
        path: row.get(2)?,
        transcription: row.get(3)?,
        created_at: timestamp(row, 4)?,
    })
}

fn select_video(conn: &Connection, id: &str) -> Result<Option<Video>> {
    let video = conn
        .query_row(
            "SELECT id, name, path, transcription, created_at_ms FROM videos WHERE id = ?1",
            params![id],
            video_from_row,
        )
        .optional()?;

    Ok(video)
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn list_prompts(&self) -> Result<Vec<Prompt>> {
        self.run(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, title, template, created_at_ms FROM prompts ORDER BY rowid")?;
            let prompts = stmt
                .query_map([], prompt_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(prompts)
        })
        .await
    }

    async fn create_prompt(&self, prompt: NewPrompt) -> Result<Prompt> {
        self.run(move |conn| {
            let id = uuid::Uuid::new_v4().to_string();
            let created_at_ms = now_ms();

            conn.execute(
                "INSERT INTO prompts (id, title, template, created_at_ms) VALUES (?1, ?2, ?3, ?4)",
                params![id, prompt.title, prompt.template, created_at_ms],
            )?;

            conn.query_row(
                "SELECT id, title, template, created_at_ms FROM prompts WHERE id = ?1",
                params![id],
                prompt_from_row,
            )
            .map_err(StoreError::from)
        })
        .await
    }

    async fn create_video(&self, video: NewVideo) -> Result<Video> {
        self.run(move |conn| {
            let id = uuid::Uuid::new_v4().to_string();

            conn.execute(
                "INSERT INTO videos (id, name, path, transcription, created_at_ms) VALUES (?1, ?2, ?3, NULL, ?4)",
                params![id, video.name, video.path, now_ms()],
            )?;

            select_video(conn, &id)?.ok_or(StoreError::NotFound(id))
        })
        .await
    }

    async fn find_video(&self, id: &str) -> Result<Option<Video>> {
        let id = id.to_owned();
        self.run(move |conn| select_video(conn, &id)).await
    }

    async fn set_transcription(&self, id: &str, transcription: &str) -> Result<Video> {
        let id = id.to_owned();
        let transcription = transcription.to_owned();

        self.run(move |conn| {
            let updated = conn.execute(
                "UPDATE videos SET transcription = ?1 WHERE id = ?2",
                params![transcription, id],
            )?;

            if updated == 0 {
                return Err(StoreError::NotFound(id));
            }

            select_video(conn, &id)?.ok_or(StoreError::NotFound(id))
        })
        .await
    }

    async fn list_videos(&self) -> Result<Vec<Video>> {
        self.run(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, path, transcription, created_at_ms FROM videos ORDER BY rowid",
            )?;
            let videos = stmt
                .query_map([], video_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(videos)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_video(name: &str) -> NewVideo {
        NewVideo {
            name: name.to_owned(),
            path: format!("/tmp/uploads/{name}"),
        }
    }

    #[tokio::test]
    async fn prompts_are_empty_initially() {
        let store = SqliteStore::in_memory().unwrap();

        assert!(store.list_prompts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn prompts_list_in_creation_order() {
        let store = SqliteStore::in_memory().unwrap();

        for title in ["YouTube title", "YouTube description", "Tweet thread"] {
            store
                .create_prompt(NewPrompt {
                    title: title.to_owned(),
                    template: format!("{title}: {{transcription}}"),
                })
                .await
                .unwrap();
        }

        let titles: Vec<_> = store
            .list_prompts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, ["YouTube title", "YouTube description", "Tweet thread"]);
    }

    #[tokio::test]
    async fn listing_ignores_wall_clock_steps() {
        let store = SqliteStore::in_memory().unwrap();

        let first = store
            .create_prompt(NewPrompt {
                title: "first".to_owned(),
                template: "{transcription}".to_owned(),
            })
            .await
            .unwrap();
        store.create_video(new_video("a.mp3")).await.unwrap();

        // Simulate the clock stepping backwards before the second insert.
        store
            .run(|conn| {
                conn.execute("UPDATE prompts SET created_at_ms = created_at_ms + 60000", [])?;
                conn.execute("UPDATE videos SET created_at_ms = created_at_ms + 60000", [])?;
                Ok(())
            })
            .await
            .unwrap();

        store
            .create_prompt(NewPrompt {
                title: "second".to_owned(),
                template: "{transcription}".to_owned(),
            })
            .await
            .unwrap();
        store.create_video(new_video("b.mp3")).await.unwrap();

        let prompts = store.list_prompts().await.unwrap();
        assert_eq!(prompts[0].id, first.id);
        assert_eq!(prompts[1].title, "second");
        assert!(prompts[0].created_at > prompts[1].created_at);

        let names: Vec<_> = store.list_videos().await.unwrap().into_iter().map(|v| v.name).collect();
        assert_eq!(names, ["a.mp3", "b.mp3"]);
    }

    #[tokio::test]
    async fn created_video_has_no_transcription() {
        let store = SqliteStore::in_memory().unwrap();

        let video = store.create_video(new_video("sample.mp3")).await.unwrap();

        assert_eq!(video.name, "sample.mp3");
        assert_eq!(video.path, "/tmp/uploads/sample.mp3");
        assert_eq!(video.transcription, None);
        assert_eq!(store.find_video(&video.id).await.unwrap(), Some(video));
    }

    #[tokio::test]
    async fn find_unknown_video_returns_none() {
        let store = SqliteStore::in_memory().unwrap();

        assert_eq!(store.find_video("does-not-exist").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_transcription_overwrites_previous_value() {
        let store = SqliteStore::in_memory().unwrap();
        let video = store.create_video(new_video("sample.mp3")).await.unwrap();

        store.set_transcription(&video.id, "first pass").await.unwrap();
        let updated = store.set_transcription(&video.id, "second pass").await.unwrap();

        assert_eq!(updated.transcription.as_deref(), Some("second pass"));
        assert_eq!(
            store.find_video(&video.id).await.unwrap().unwrap().transcription.as_deref(),
            Some("second pass")
        );
    }

    #[tokio::test]
    async fn set_transcription_on_unknown_video_is_not_found() {
        let store = SqliteStore::in_memory().unwrap();

        let err = store.set_transcription("missing", "text").await.unwrap_err();

        assert!(matches!(err, StoreError::NotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn file_backed_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("clipscribe.sqlite");

        let id = {
            let store = SqliteStore::open(&path).unwrap();
            store.create_video(new_video("sample.mp3")).await.unwrap().id
        };

        let reopened = SqliteStore::open(&path).unwrap();
        let videos = reopened.list_videos().await.unwrap();

        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id, id);
    }
}
