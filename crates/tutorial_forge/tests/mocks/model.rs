use std::{
    collections::VecDeque,
    path::Path,
    sync::{Arc, Mutex},
};

use tutorial_forge::{AssetHandle, AssetState, GenerativeModel};

/// Scripted stand-in for the remote generative service.
///
/// `upload_asset` returns a handle in `initial_state`; each `get_asset` call
/// pops the next state from `poll_states` (repeating the last one once the
/// script runs out).
#[derive(Clone)]
pub struct MockModel {
    pub text_reply: String,
    pub initial_state: AssetState,
    pub poll_states: Arc<Mutex<VecDeque<AssetState>>>,
    pub generate_calls: Arc<Mutex<Vec<String>>>,
    pub asset_prompt_calls: Arc<Mutex<Vec<String>>>,
    pub get_asset_calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockModel {
    pub fn new(text_reply: &str) -> Self {
        Self {
            text_reply: text_reply.to_string(),
            initial_state: AssetState::Ready,
            poll_states: Arc::new(Mutex::new(VecDeque::new())),
            generate_calls: Arc::new(Mutex::new(Vec::new())),
            asset_prompt_calls: Arc::new(Mutex::new(Vec::new())),
            get_asset_calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new("")
        }
    }

    pub fn with_initial_state(mut self, state: AssetState) -> Self {
        self.initial_state = state;
        self
    }

    pub fn with_poll_states(self, states: impl IntoIterator<Item = AssetState>) -> Self {
        *self.poll_states.lock().unwrap() = states.into_iter().collect();
        self
    }

    fn handle(&self, state: AssetState) -> AssetHandle {
        AssetHandle {
            name: "files/mock-asset".to_string(),
            display_name: Some("demo.mp4".to_string()),
            uri: "https://mock.invalid/files/mock-asset".to_string(),
            mime_type: Some("video/mp4".to_string()),
            state,
        }
    }
}

impl GenerativeModel for MockModel {
    const GENERATION_MODEL: &'static str = "mock-gemini";

    type Error = anyhow::Error;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.generate_calls.lock().unwrap().push(prompt.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.text_reply.clone())
    }

    async fn upload_asset(
        &self,
        _path: &Path,
        _display_name: &str,
        _mime_type: &str,
    ) -> Result<AssetHandle, Self::Error> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.handle(self.initial_state))
    }

    async fn get_asset(&self, name: &str) -> Result<AssetHandle, Self::Error> {
        self.get_asset_calls.lock().unwrap().push(name.to_string());
        let state = {
            let mut states = self.poll_states.lock().unwrap();
            match states.len() {
                0 => self.initial_state,
                1 => *states.front().unwrap(),
                _ => states.pop_front().unwrap(),
            }
        };
        Ok(self.handle(state))
    }

    async fn generate_with_asset(
        &self,
        _asset: &AssetHandle,
        prompt: &str,
    ) -> Result<String, Self::Error> {
        self.asset_prompt_calls
            .lock()
            .unwrap()
            .push(prompt.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.text_reply.clone())
    }
}
