//! Where `set_locale` sends the new preference.

use std::{
    sync::{Arc, mpsc},
    thread::{self, JoinHandle},
};

use crate::store::LocalePreferenceStore;

/// How locale changes reach durable storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Persistence {
    /// Write synchronously inside `set_locale`.
    #[default]
    Inline,
    /// Queue writes to a dedicated thread so slow storage never blocks lookups.
    Background,
}

enum Job {
    Save(String),
    Clear,
    Flush(mpsc::Sender<()>),
}

pub(crate) enum Persister {
    Inline(Arc<LocalePreferenceStore>),
    Background(BackgroundWriter),
}

impl Persister {
    pub(crate) fn new(store: Arc<LocalePreferenceStore>, mode: Persistence) -> Self {
        match mode {
            Persistence::Inline => Persister::Inline(store),
            Persistence::Background => match BackgroundWriter::spawn(store.clone()) {
                Ok(writer) => Persister::Background(writer),
                Err(e) => {
                    tracing::warn!("cannot start preference writer thread, writing inline: {}", e);
                    Persister::Inline(store)
                }
            },
        }
    }

    pub(crate) fn save(&self, locale: &str) {
        match self {
            Persister::Inline(store) => store.save(locale),
            Persister::Background(writer) => writer.send(Job::Save(locale.to_string())),
        }
    }

    pub(crate) fn clear(&self) {
        match self {
            Persister::Inline(store) => store.clear(),
            Persister::Background(writer) => writer.send(Job::Clear),
        }
    }

    pub(crate) fn flush(&self) {
        if let Persister::Background(writer) = self {
            writer.flush();
        }
    }

    pub(crate) fn mode(&self) -> Persistence {
        match self {
            Persister::Inline(_) => Persistence::Inline,
            Persister::Background(_) => Persistence::Background,
        }
    }
}

pub(crate) struct BackgroundWriter {
    tx: Option<mpsc::Sender<Job>>,
    handle: Option<JoinHandle<()>>,
    // Used when the writer thread has gone away.
    store: Arc<LocalePreferenceStore>,
}

impl BackgroundWriter {
    fn spawn(store: Arc<LocalePreferenceStore>) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<Job>();
        let worker_store = store.clone();
        let handle = thread::Builder::new()
            .name("lingo-preference-writer".to_string())
            .spawn(move || {
                for job in rx {
                    match job {
                        Job::Save(locale) => worker_store.save(&locale),
                        Job::Clear => worker_store.clear(),
                        Job::Flush(done) => {
                            let _ = done.send(());
                        }
                    }
                }
            })?;

        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
            store,
        })
    }

    fn send(&self, job: Job) {
        let Some(tx) = &self.tx else {
            return;
        };
        if let Err(mpsc::SendError(job)) = tx.send(job) {
            tracing::warn!("preference writer thread is gone, writing inline");
            match job {
                Job::Save(locale) => self.store.save(&locale),
                Job::Clear => self.store.clear(),
                Job::Flush(_) => {}
            }
        }
    }

    /// Block until every job queued before this call has run.
    fn flush(&self) {
        let (done_tx, done_rx) = mpsc::channel();
        self.send(Job::Flush(done_tx));
        let _ = done_rx.recv();
    }
}

impl Drop for BackgroundWriter {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop once the queue is drained.
        self.tx.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::warn!("preference writer thread panicked");
        }
    }
}
