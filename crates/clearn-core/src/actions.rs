#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    ToggleTheme,
    ToggleFontScale,
    SelectQuote(usize),
    OpenChat,
    CloseChat,
    SetDraft(String),
    UseSuggestedPrompt(usize),
    SubmitDraft,
    Submit(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeAction {
    CarouselTick,
    DeliverReply {
        session_id: u64,
        request_id: u64,
        text: String,
    },
    TeardownChat,
}
