#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,
    Refresh,
    CycleTheme,
    ToggleHelp,
    None,
}
