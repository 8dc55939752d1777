use std::{
    io::Cursor,
    sync::{
        Arc, Mutex, RwLock,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    thread,
    time::Duration,
};

use flume::Sender;
use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, warn};

use crate::{
    audio::{
        error::AudioError,
        traits::PreviewOutput,
        util::{construct_sink, setup_device_config},
    },
    event::events::Event,
};

const MONITOR_INTERVAL: Duration = Duration::from_millis(1000 / 8);

/// The one shared audio output for the session.
///
/// Preview bytes are fetched and decoded off the event loop; a generation
/// counter drops loads superseded before they finished. End-of-stream is
/// detected by a monitor thread watching the sink drain and surfaced as
/// [`Event::PreviewEnded`]; [`pause`](PreviewOutput::pause) surfaces
/// [`Event::PreviewPaused`]. Play intent (`want_playing`) mirrors the
/// paused flag the coordinator reads, independent of whether the load has
/// landed in the sink yet.
pub struct PreviewEngine {
    _stream: OutputStream,
    sink: Arc<Sink>,
    http: reqwest::Client,
    event_tx: Sender<Event>,
    source_url: Arc<RwLock<Option<String>>>,
    want_playing: Arc<AtomicBool>,
    is_audible: Arc<AtomicBool>,
    load_generation: Arc<AtomicU64>,
    load_task: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl PreviewEngine {
    pub fn new(event_tx: Sender<Event>) -> color_eyre::Result<Self> {
        let (device, stream_config, sample_format) = setup_device_config()?;
        let (stream, sink) = construct_sink(device, &stream_config, sample_format)?;

        let engine = Self {
            _stream: stream,
            sink: Arc::new(sink),
            http: reqwest::Client::new(),
            event_tx,
            source_url: Arc::new(RwLock::new(None)),
            want_playing: Arc::new(AtomicBool::new(false)),
            is_audible: Arc::new(AtomicBool::new(false)),
            load_generation: Arc::new(AtomicU64::new(0)),
            load_task: Mutex::new(None),
        };

        engine.start_monitor();
        Ok(engine)
    }

    fn start_monitor(&self) {
        let sink = self.sink.clone();
        let audible = self.is_audible.clone();
        let want_playing = self.want_playing.clone();
        let event_tx = self.event_tx.clone();

        thread::spawn(move || {
            loop {
                if audible.load(Ordering::Relaxed) && sink.empty() {
                    audible.store(false, Ordering::Relaxed);
                    want_playing.store(false, Ordering::Relaxed);
                    let _ = event_tx.send(Event::PreviewEnded);
                }
                thread::sleep(MONITOR_INTERVAL);
            }
        });
    }
}

impl PreviewOutput for PreviewEngine {
    fn set_source(&self, url: &str) {
        let generation = self.load_generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.source_url.write().unwrap() = Some(url.to_string());
        self.is_audible.store(false, Ordering::Relaxed);
        self.sink.stop();

        let http = self.http.clone();
        let sink = self.sink.clone();
        let event_tx = self.event_tx.clone();
        let want_playing = self.want_playing.clone();
        let audible = self.is_audible.clone();
        let load_generation = self.load_generation.clone();
        let url = url.to_string();

        let mut task_guard = self.load_task.lock().unwrap();
        if let Some(task) = task_guard.take() {
            task.abort();
        }

        *task_guard = Some(tokio::spawn(async move {
            let bytes = match fetch_preview(&http, &url).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(url = url.as_str(), error = %e, "preview_fetch_failed");
                    want_playing.store(false, Ordering::Relaxed);
                    let _ = event_tx.send(Event::PreviewError(e.to_string()));
                    return;
                }
            };

            let decoded = tokio::task::spawn_blocking(move || {
                Decoder::builder()
                    .with_data(Cursor::new(bytes))
                    .with_hint("mp3")
                    .with_gapless(true)
                    .build()
            })
            .await;

            let decoder = match decoded {
                Ok(Ok(decoder)) => decoder,
                Ok(Err(e)) => {
                    warn!(url = url.as_str(), error = %e, "preview_decode_failed");
                    want_playing.store(false, Ordering::Relaxed);
                    let _ = event_tx
                        .send(Event::PreviewError(AudioError::Decoding(e.to_string()).to_string()));
                    return;
                }
                Err(e) => {
                    warn!(url = url.as_str(), error = %e, "preview_decode_task_failed");
                    want_playing.store(false, Ordering::Relaxed);
                    let _ = event_tx
                        .send(Event::PreviewError(AudioError::Decoding(e.to_string()).to_string()));
                    return;
                }
            };

            if load_generation.load(Ordering::SeqCst) != generation {
                debug!(url = url.as_str(), "preview_load_superseded");
                return;
            }

            sink.append(decoder);
            if want_playing.load(Ordering::Relaxed) {
                sink.play();
                audible.store(true, Ordering::Relaxed);
            }
            let _ = event_tx.send(Event::PreviewStarted(url));
        }));
    }

    fn play(&self) {
        self.want_playing.store(true, Ordering::Relaxed);
        self.sink.play();
        if !self.sink.empty() {
            self.is_audible.store(true, Ordering::Relaxed);
        }
    }

    fn pause(&self) {
        self.sink.pause();
        self.is_audible.store(false, Ordering::Relaxed);
        if self.want_playing.swap(false, Ordering::Relaxed) {
            let _ = self.event_tx.send(Event::PreviewPaused);
        }
    }

    fn is_paused(&self) -> bool {
        !self.want_playing.load(Ordering::Relaxed)
    }

    fn source(&self) -> Option<String> {
        self.source_url.read().unwrap().clone()
    }
}

async fn fetch_preview(http: &reqwest::Client, url: &str) -> Result<Vec<u8>, AudioError> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| AudioError::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(AudioError::Network(format!(
            "preview fetch returned status {}",
            response.status().as_u16()
        )));
    }

    Ok(response
        .bytes()
        .await
        .map_err(|e| AudioError::Network(e.to_string()))?
        .to_vec())
}
