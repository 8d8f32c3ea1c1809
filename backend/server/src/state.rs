use std::sync::Arc;

use tokio::sync::Mutex;

use super::{config::Config, recorder::Recorder, store::JsonFileStore};

pub struct State {
    pub config: Config,
    pub recorder: Mutex<Recorder>,
}

impl State {
    pub fn new() -> Arc<Self> {
        Self::with_config(Config::load())
    }

    pub fn with_config(config: Config) -> Arc<Self> {
        let recorder = Recorder::open(Box::new(JsonFileStore::new(&config.data_file)));

        Self::with_recorder(config, recorder)
    }

    pub fn with_recorder(config: Config, recorder: Recorder) -> Arc<Self> {
        Arc::new(Self {
            config,
            recorder: Mutex::new(recorder),
        })
    }
}
