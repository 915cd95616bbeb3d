use std::path::PathBuf;

use tutorial_datastore::DataStore;

use crate::{GenerativeModel, PollConfig, TutorialGenerator};

pub struct TutorialGeneratorBuilder<D = (), M = ()> {
    videos_dir: PathBuf,
    store: D,
    model: M,
    poll_config: PollConfig,
}

impl TutorialGeneratorBuilder {
    pub fn new(videos_dir: impl Into<PathBuf>) -> Self {
        Self {
            videos_dir: videos_dir.into(),
            store: (),
            model: (),
            poll_config: PollConfig::default(),
        }
    }
}

impl<D, M> TutorialGeneratorBuilder<D, M> {
    pub fn store<D2: DataStore + Send + Sync + 'static>(
        self,
        store: D2,
    ) -> TutorialGeneratorBuilder<D2, M> {
        TutorialGeneratorBuilder {
            videos_dir: self.videos_dir,
            store,
            model: self.model,
            poll_config: self.poll_config,
        }
    }

    pub fn model<M2: GenerativeModel + Send + Sync + 'static>(
        self,
        model: M2,
    ) -> TutorialGeneratorBuilder<D, M2> {
        TutorialGeneratorBuilder {
            videos_dir: self.videos_dir,
            store: self.store,
            model,
            poll_config: self.poll_config,
        }
    }

    pub fn poll_config(mut self, poll_config: PollConfig) -> Self {
        self.poll_config = poll_config;
        self
    }
}

impl<D, M> TutorialGeneratorBuilder<D, M>
where
    D: DataStore + Send + Sync + 'static,
    M: GenerativeModel + Send + Sync + 'static,
{
    pub fn build(self) -> TutorialGenerator<D, M> {
        TutorialGenerator {
            videos_dir: self.videos_dir,
            store: self.store,
            model: self.model,
            poll_config: self.poll_config,
        }
    }
}
