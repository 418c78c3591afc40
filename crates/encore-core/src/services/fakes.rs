//! In-memory port fakes shared by the service tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{ExportJob, Playlist};
use crate::error::RepoError;
use crate::ports::{
    Attachment, Cache, CacheError, CatalogStore, Delivery, ExportQueue, MailError, Mailer,
    QueueError,
};

pub type EventLog = Arc<Mutex<Vec<String>>>;

#[derive(Default)]
pub struct FakeCache {
    entries: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
    log: Mutex<Option<EventLog>>,
}

impl FakeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every cache operation behave like an unreachable backend.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::Relaxed);
    }

    fn attach_log(&self, log: EventLog) {
        *self.log.lock().unwrap() = Some(log);
    }

    fn record(&self, event: &str) {
        if let Some(log) = self.log.lock().unwrap().as_ref() {
            log.lock().unwrap().push(event.to_string());
        }
    }
}

#[async_trait]
impl Cache for FakeCache {
    async fn get(&self, key: &str) -> Option<String> {
        if self.failing.load(Ordering::Relaxed) {
            return None;
        }
        self.entries.lock().unwrap().get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) -> Result<(), CacheError> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(CacheError::Connection("cache down".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(CacheError::Connection("cache down".to_string()));
        }
        self.record("cache_delete");
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    albums: HashSet<String>,
    playlists: HashMap<String, Playlist>,
    likes: Mutex<HashSet<(String, String)>>,
    covers: Mutex<HashMap<String, String>>,
    hide_precheck: AtomicBool,
    log: Mutex<Option<EventLog>>,
}

impl FakeCatalog {
    pub fn with_albums(ids: &[&str]) -> Self {
        Self {
            albums: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_playlist(playlist: Playlist) -> Self {
        Self {
            playlists: HashMap::from([(playlist.id.clone(), playlist)]),
            ..Self::default()
        }
    }

    /// Simulate the check-then-act race window: the duplicate pre-check
    /// reports no edge, leaving the unique index as the only guard.
    pub fn hide_likes_from_precheck(&self) {
        self.hide_precheck.store(true, Ordering::Relaxed);
    }

    /// Route this store's and the given cache's writes into one shared log,
    /// so tests can assert ordering across the two collaborators.
    pub fn share_event_log(&self, cache: &FakeCache) -> EventLog {
        let log = EventLog::default();
        *self.log.lock().unwrap() = Some(log.clone());
        cache.attach_log(log.clone());
        log
    }

    fn record(&self, event: &str) {
        if let Some(log) = self.log.lock().unwrap().as_ref() {
            log.lock().unwrap().push(event.to_string());
        }
    }
}

#[async_trait]
impl CatalogStore for FakeCatalog {
    async fn album_exists(&self, album_id: &str) -> Result<bool, RepoError> {
        Ok(self.albums.contains(album_id))
    }

    async fn count_album_likes(&self, album_id: &str) -> Result<u64, RepoError> {
        let likes = self.likes.lock().unwrap();
        Ok(likes.iter().filter(|(a, _)| a == album_id).count() as u64)
    }

    async fn has_album_like(&self, album_id: &str, user_id: &str) -> Result<bool, RepoError> {
        if self.hide_precheck.load(Ordering::Relaxed) {
            return Ok(false);
        }
        let likes = self.likes.lock().unwrap();
        Ok(likes.contains(&(album_id.to_string(), user_id.to_string())))
    }

    async fn insert_album_like(&self, album_id: &str, user_id: &str) -> Result<(), RepoError> {
        let mut likes = self.likes.lock().unwrap();
        let edge = (album_id.to_string(), user_id.to_string());
        if likes.contains(&edge) {
            return Err(RepoError::Constraint(
                "duplicate key value violates unique constraint".to_string(),
            ));
        }
        likes.insert(edge);
        drop(likes);
        self.record("insert_like");
        Ok(())
    }

    async fn delete_album_like(&self, album_id: &str, user_id: &str) -> Result<bool, RepoError> {
        let removed = self
            .likes
            .lock()
            .unwrap()
            .remove(&(album_id.to_string(), user_id.to_string()));
        if removed {
            self.record("delete_like");
        }
        Ok(removed)
    }

    async fn playlist_with_songs(&self, playlist_id: &str) -> Result<Option<Playlist>, RepoError> {
        Ok(self.playlists.get(playlist_id).cloned())
    }

    async fn update_album_cover(&self, album_id: &str, cover_url: &str) -> Result<bool, RepoError> {
        if !self.albums.contains(album_id) {
            return Ok(false);
        }
        self.covers
            .lock()
            .unwrap()
            .insert(album_id.to_string(), cover_url.to_string());
        Ok(true)
    }
}

#[derive(Default)]
pub struct FakeQueue {
    jobs: Mutex<VecDeque<ExportJob>>,
    acked: AtomicUsize,
}

impl FakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    pub fn acked(&self) -> usize {
        self.acked.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ExportQueue for FakeQueue {
    async fn enqueue(&self, job: ExportJob) -> Result<(), QueueError> {
        self.jobs.lock().unwrap().push_back(job);
        Ok(())
    }

    async fn dequeue(&self) -> Result<Delivery, QueueError> {
        // Tests pre-load the queue, so an empty queue means the test is over.
        let job = self.jobs.lock().unwrap().pop_front().ok_or(QueueError::Closed)?;
        let receipt = job.id.clone();
        Ok(Delivery { job, receipt })
    }

    async fn ack(&self, _delivery: Delivery) -> Result<(), QueueError> {
        self.acked.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: Attachment,
}

#[derive(Default)]
pub struct FakeMailer {
    sent: Mutex<Vec<Arc<SentMail>>>,
    failing: AtomicBool,
}

impl FakeMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::Relaxed);
    }

    pub fn sent(&self) -> Vec<Arc<SentMail>> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: &Attachment,
    ) -> Result<(), MailError> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(MailError::Unreachable("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(Arc::new(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            attachment: attachment.clone(),
        }));
        Ok(())
    }
}
