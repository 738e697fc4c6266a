use super::BackendPrompt;

pub enum Action {
    BackendAbort(),
    BackendRequest(BackendPrompt),
}
